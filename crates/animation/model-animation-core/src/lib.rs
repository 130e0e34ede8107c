//! Model Animation Core (engine-agnostic)
//!
//! Schedules keyframe animations of an articulated model against a scene
//! clock. Each frame the host calls `Model::update` (or
//! `AnimationCollection::update` with its own node storage); newly reached
//! keyframes are written into node transforms and lifecycle callbacks are
//! queued into a `FrameEvents` the host dispatches afterwards.

pub mod animation;
pub mod binding;
pub mod collection;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod events;
pub mod ids;
pub mod model;
pub mod nodes;
pub mod sampling;
pub mod scratch;
pub mod time;
pub mod value;

// Re-exports for consumers (hosts)
pub use animation::{AnimationOptions, AnimationState, ScheduledAnimation};
pub use binding::{ChannelTarget, TargetPath, TargetResolver};
pub use collection::{AnimationCollection, AnimationLibrary};
pub use config::Config;
pub use data::{AnimationDefinition, Channel, Interpolation, Sampler};
pub use document::{parse_model_document_json, ModelDocument};
pub use error::AnimationError;
pub use events::{AnimationCallback, FrameEvents, LifecycleEvent, ListenerId, QueuedEvent, Signal};
pub use ids::{AnimationId, NodeId};
pub use model::Model;
pub use nodes::{NodeStore, NodeTransform};
pub use sampling::animate_channels;
pub use time::JulianDate;
pub use value::{Value, ValueKind};
