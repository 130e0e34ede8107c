//! Channel targets and the resolver trait.
//!
//! Channels name their target node by string id in the source document. The
//! loader resolves each id exactly once into a dense `NodeId`, so sampling
//! never performs name lookups.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;
use crate::value::ValueKind;

/// Node property animated by a channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    Weights,
}

impl TargetPath {
    /// Value kind a sampler must produce to drive this property.
    #[inline]
    pub fn value_kind(self) -> ValueKind {
        match self {
            TargetPath::Translation | TargetPath::Scale => ValueKind::Vec3,
            TargetPath::Rotation => ValueKind::Quat,
            TargetPath::Weights => ValueKind::Weights,
        }
    }
}

/// Resolved {node, property} pair a channel writes into.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChannelTarget {
    pub node: NodeId,
    pub path: TargetPath,
}

/// Trait for resolving document node ids to dense handles.
/// The document loader implements this over its node table; hosts with their own
/// scene graph can implement it to bind channels against existing nodes.
pub trait TargetResolver {
    fn resolve(&self, node: &str) -> Option<NodeId>;
}

impl<V> TargetResolver for indexmap::IndexMap<String, V> {
    fn resolve(&self, node: &str) -> Option<NodeId> {
        self.get_index_of(node).map(|i| NodeId(i as u32))
    }
}
