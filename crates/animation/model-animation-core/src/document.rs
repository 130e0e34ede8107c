use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::binding::{ChannelTarget, TargetPath, TargetResolver};
use crate::collection::AnimationLibrary;
use crate::data::{AnimationDefinition, Channel, Interpolation, Sampler};
use crate::error::AnimationError;
use crate::ids::NodeId;
use crate::nodes::{NodeStore, NodeTransform};
use crate::value::Value;

/// Parameter every sampler must use as its input.
pub const TIME_PARAMETER: &str = "TIME";

/// A loaded model document: the node table with its rest pose and the named animations.
#[derive(Clone, Debug, Default)]
pub struct ModelDocument {
    nodes: IndexMap<String, NodeTransform>,
    animations: Arc<AnimationLibrary>,
}

impl ModelDocument {
    /// Assemble a document from already-resolved parts. Animation names must be unique;
    /// a later definition replaces an earlier one with the same name.
    pub fn new(nodes: IndexMap<String, NodeTransform>, animations: Vec<AnimationDefinition>) -> Self {
        let library: AnimationLibrary = animations
            .into_iter()
            .map(|a| (a.name().to_string(), Arc::new(a)))
            .collect();
        Self {
            nodes,
            animations: Arc::new(library),
        }
    }

    pub fn from_json(s: &str) -> Result<Self, AnimationError> {
        parse_model_document_json(s)
    }

    #[inline]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.resolve(name)
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Rest-pose node storage, indexed consistently with `node_id`.
    pub fn rest_pose(&self) -> NodeStore {
        NodeStore::new(self.nodes.values().cloned().collect())
    }

    pub fn animation(&self, name: &str) -> Option<&Arc<AnimationDefinition>> {
        self.animations.get(name)
    }

    #[inline]
    pub fn animations(&self) -> &Arc<AnimationLibrary> {
        &self.animations
    }
}

/// Public API: parse a glTF-style JSON document (node table + animations keyed by name)
/// into a validated `ModelDocument`.
///
/// Notes:
/// - Every animation needs a `TIME` parameter; all its samplers must read it as input.
/// - Output parameters are either arrays of tuples (`[[x,y,z], ...]`) or flat arrays
///   chunked by the target's arity. For `weights`, each tuple is one frame of weights.
/// - Channel target ids are resolved against the node table here, once.
pub fn parse_model_document_json(s: &str) -> Result<ModelDocument, AnimationError> {
    let raw: RawDocument = serde_json::from_str(s)?;

    let mut definitions = Vec::with_capacity(raw.animations.len());
    for (name, anim) in &raw.animations {
        definitions.push(build_animation(name, anim, &raw.nodes)?);
    }
    debug!(
        "loaded document: {} nodes, {} animations",
        raw.nodes.len(),
        definitions.len()
    );
    Ok(ModelDocument::new(raw.nodes, definitions))
}

fn build_animation(
    name: &str,
    raw: &RawAnimation,
    resolver: &dyn TargetResolver,
) -> Result<AnimationDefinition, AnimationError> {
    let times = match raw.parameters.get(TIME_PARAMETER) {
        Some(RawParameter::Scalars(t)) => t.clone(),
        Some(RawParameter::Tuples(_)) => {
            return Err(AnimationError::invalid(name, "TIME must be a flat array of seconds"))
        }
        None => return Err(AnimationError::invalid(name, "missing TIME parameter")),
    };

    let mut channels = Vec::with_capacity(raw.channels.len());
    for ch in &raw.channels {
        let sampler = raw.samplers.get(&ch.sampler).ok_or_else(|| {
            AnimationError::invalid(name, format!("unknown sampler {:?}", ch.sampler))
        })?;
        if sampler.input != TIME_PARAMETER {
            return Err(AnimationError::invalid(
                name,
                format!("sampler {:?} input must be TIME, got {:?}", ch.sampler, sampler.input),
            ));
        }
        let output = raw.parameters.get(&sampler.output).ok_or_else(|| {
            AnimationError::invalid(name, format!("unknown parameter {:?}", sampler.output))
        })?;
        let node = resolver
            .resolve(&ch.target.id)
            .ok_or_else(|| AnimationError::UnresolvedTarget {
                animation: name.to_string(),
                node: ch.target.id.clone(),
            })?;

        channels.push(Channel {
            target: ChannelTarget {
                node,
                path: ch.target.path,
            },
            sampler: Sampler {
                interpolation: sampler.interpolation,
                output: to_values(name, &sampler.output, output, ch.target.path)?,
            },
        });
    }

    AnimationDefinition::new(name, times, channels)
}

fn to_values(
    anim: &str,
    param: &str,
    raw: &RawParameter,
    path: TargetPath,
) -> Result<Vec<Value>, AnimationError> {
    let arity = match path {
        TargetPath::Translation | TargetPath::Scale => 3,
        TargetPath::Rotation => 4,
        TargetPath::Weights => {
            return Ok(match raw {
                RawParameter::Scalars(v) => v.iter().map(|w| Value::Weights(vec![*w as f32])).collect(),
                RawParameter::Tuples(v) => v
                    .iter()
                    .map(|t| Value::Weights(t.iter().map(|w| *w as f32).collect()))
                    .collect(),
            })
        }
    };

    let tuples: Vec<&[f64]> = match raw {
        RawParameter::Tuples(v) => v.iter().map(Vec::as_slice).collect(),
        RawParameter::Scalars(v) => {
            if v.len() % arity != 0 {
                return Err(AnimationError::invalid(
                    anim,
                    format!("parameter {param:?} length {} is not a multiple of {arity}", v.len()),
                ));
            }
            v.chunks(arity).collect()
        }
    };

    tuples
        .into_iter()
        .map(|t| match (path, t) {
            (TargetPath::Rotation, [x, y, z, w]) => {
                Ok(Value::Quat([*x as f32, *y as f32, *z as f32, *w as f32]))
            }
            (TargetPath::Translation | TargetPath::Scale, [x, y, z]) => {
                Ok(Value::Vec3([*x as f32, *y as f32, *z as f32]))
            }
            _ => Err(AnimationError::invalid(
                anim,
                format!(
                    "parameter {param:?} has a {}-component value; {path:?} needs {arity}",
                    t.len()
                ),
            )),
        })
        .collect()
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    nodes: IndexMap<String, NodeTransform>,
    #[serde(default)]
    animations: IndexMap<String, RawAnimation>,
}

#[derive(Debug, Deserialize)]
struct RawAnimation {
    parameters: IndexMap<String, RawParameter>,
    #[serde(default)]
    samplers: IndexMap<String, RawSampler>,
    #[serde(default)]
    channels: Vec<RawChannel>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawParameter {
    Scalars(Vec<f64>),
    Tuples(Vec<Vec<f64>>),
}

#[derive(Debug, Deserialize)]
struct RawSampler {
    input: String,
    output: String,
    #[serde(default)]
    interpolation: Interpolation,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    sampler: String,
    target: RawTarget,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    id: String,
    path: TargetPath,
}
