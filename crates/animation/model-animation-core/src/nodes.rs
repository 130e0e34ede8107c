//! Node property storage written by the channel sampler.

use serde::{Deserialize, Serialize};

use crate::binding::TargetPath;
use crate::ids::NodeId;
use crate::value::Value;

/// Local transform and morph weights of one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    #[serde(default = "default_translation")]
    pub translation: [f32; 3],
    /// Quaternion (x, y, z, w)
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub weights: Vec<f32>,
}

fn default_translation() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            translation: default_translation(),
            rotation: default_rotation(),
            scale: default_scale(),
            weights: Vec::new(),
        }
    }
}

impl NodeTransform {
    /// Copy `value` into the property named by `path`.
    /// Returns false (leaving the node untouched) when the value kind does not fit the path.
    pub fn write(&mut self, path: TargetPath, value: &Value) -> bool {
        match (path, value) {
            (TargetPath::Translation, Value::Vec3(v)) => self.translation = *v,
            (TargetPath::Scale, Value::Vec3(v)) => self.scale = *v,
            (TargetPath::Rotation, Value::Quat(q)) => self.rotation = *q,
            (TargetPath::Weights, Value::Weights(w)) => {
                self.weights.clear();
                self.weights.extend_from_slice(w);
            }
            _ => return false,
        }
        true
    }

    /// Read a property back as a `Value`.
    pub fn read(&self, path: TargetPath) -> Value {
        match path {
            TargetPath::Translation => Value::Vec3(self.translation),
            TargetPath::Scale => Value::Vec3(self.scale),
            TargetPath::Rotation => Value::Quat(self.rotation),
            TargetPath::Weights => Value::Weights(self.weights.clone()),
        }
    }
}

/// Dense, externally owned node storage indexed by `NodeId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStore {
    nodes: Vec<NodeTransform>,
}

impl NodeStore {
    pub fn new(nodes: Vec<NodeTransform>) -> Self {
        Self { nodes }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&NodeTransform> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeTransform> {
        self.nodes.get_mut(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeTransform> {
        self.nodes.iter()
    }
}
