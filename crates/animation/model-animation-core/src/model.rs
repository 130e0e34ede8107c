//! Model: owns the loaded document, the node pose, and the active animations.
//!
//! Methods:
//! - new, load_document, load_document_json, update, node, nodes

use std::sync::Arc;

use log::debug;

use crate::collection::AnimationCollection;
use crate::config::Config;
use crate::document::ModelDocument;
use crate::error::AnimationError;
use crate::events::{FrameEvents, Signal};
use crate::nodes::{NodeStore, NodeTransform};
use crate::time::JulianDate;

#[derive(Debug)]
pub struct Model {
    cfg: Config,
    document: Option<Arc<ModelDocument>>,
    nodes: NodeStore,
    /// Animations scheduled on this model.
    pub active_animations: AnimationCollection,
    /// Raised after a document has been loaded and bound.
    pub document_loaded: Signal<ModelDocument>,
}

impl Model {
    pub fn new(cfg: Config) -> Self {
        Self {
            active_animations: AnimationCollection::new(&cfg),
            cfg,
            document: None,
            nodes: NodeStore::default(),
            document_loaded: Signal::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Install a document: reset nodes to its rest pose and expose its animations.
    /// Animations scheduled against a previous document are removed first.
    pub fn load_document(&mut self, document: ModelDocument) {
        if self.document.is_some() {
            self.active_animations.remove_all();
        }
        let document = Arc::new(document);
        self.nodes = document.rest_pose();
        self.active_animations
            .bind_library(Arc::clone(document.animations()));
        debug!(
            "model loaded {} nodes, {} animations",
            self.nodes.len(),
            document.animations().len()
        );
        self.document = Some(Arc::clone(&document));
        self.document_loaded.raise(&document);
    }

    pub fn load_document_json(&mut self, s: &str) -> Result<(), AnimationError> {
        let document = ModelDocument::from_json(s)?;
        self.load_document(document);
        Ok(())
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    #[inline]
    pub fn document(&self) -> Option<&Arc<ModelDocument>> {
        self.document.as_ref()
    }

    /// Advance active animations to `scene_time`, writing into this model's nodes.
    /// Returns true if any node property changed.
    pub fn update(&mut self, scene_time: JulianDate, events: &mut FrameEvents) -> bool {
        self.active_animations
            .update(scene_time, &mut self.nodes, events)
    }

    pub fn node(&self, name: &str) -> Option<&NodeTransform> {
        let id = self.document.as_ref()?.node_id(name)?;
        self.nodes.get(id)
    }

    #[inline]
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
