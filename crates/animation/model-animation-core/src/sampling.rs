//! Channel sampling.
//!
//! Model:
//! - Every channel of a definition is sampled at the same keyframe index.
//! - The value at that index is copied into the target node property; no
//!   interpolation with the neighbouring keyframe is performed.
//! - Channels that cannot be applied (missing node, out-of-range index, kind
//!   mismatch) are skipped with a warning and the rest still apply.

use log::{trace, warn};

use crate::data::AnimationDefinition;
use crate::nodes::NodeStore;

/// Write every channel of `definition` at keyframe `index` into `nodes`.
/// Returns the number of channels written.
pub fn animate_channels(definition: &AnimationDefinition, index: usize, nodes: &mut NodeStore) -> usize {
    let mut written = 0;
    for (i, channel) in definition.channels().iter().enumerate() {
        let target = channel.target;
        let Some(value) = channel.sampler.value_at(index) else {
            warn!(
                "animation {:?} channel {i}: keyframe {index} out of range ({} outputs)",
                definition.name(),
                channel.sampler.output.len()
            );
            continue;
        };
        let Some(node) = nodes.get_mut(target.node) else {
            warn!(
                "animation {:?} channel {i}: node {:?} not in store",
                definition.name(),
                target.node
            );
            continue;
        };
        if !node.write(target.path, value) {
            warn!(
                "animation {:?} channel {i}: {:?} cannot hold {:?}",
                definition.name(),
                target.path,
                value.kind()
            );
            continue;
        }
        written += 1;
    }
    trace!(
        "sampled {:?} at keyframe {index} ({written} channels)",
        definition.name()
    );
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{ChannelTarget, TargetPath};
    use crate::data::{Channel, Sampler};
    use crate::ids::NodeId;
    use crate::nodes::NodeTransform;
    use crate::value::Value;

    fn definition(node: NodeId) -> AnimationDefinition {
        AnimationDefinition::new(
            "bounce",
            vec![0.0, 1.0],
            vec![
                Channel {
                    target: ChannelTarget {
                        node,
                        path: TargetPath::Translation,
                    },
                    sampler: Sampler::new(vec![
                        Value::Vec3([0.0, 0.0, 0.0]),
                        Value::Vec3([0.0, 1.0, 0.0]),
                    ]),
                },
                Channel {
                    target: ChannelTarget {
                        node,
                        path: TargetPath::Rotation,
                    },
                    sampler: Sampler::new(vec![
                        Value::Quat([0.0, 0.0, 0.0, 1.0]),
                        Value::Quat([0.0, 1.0, 0.0, 0.0]),
                    ]),
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn copies_values_at_index() {
        let def = definition(NodeId(0));
        let mut nodes = NodeStore::new(vec![NodeTransform::default()]);
        assert_eq!(animate_channels(&def, 1, &mut nodes), 2);
        let node = nodes.get(NodeId(0)).unwrap();
        assert_eq!(node.translation, [0.0, 1.0, 0.0]);
        assert_eq!(node.rotation, [0.0, 1.0, 0.0, 0.0]);

        assert_eq!(animate_channels(&def, 0, &mut nodes), 2);
        assert_eq!(nodes.get(NodeId(0)).unwrap().translation, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn skips_channels_that_cannot_apply() {
        let def = definition(NodeId(3));
        let mut nodes = NodeStore::new(vec![NodeTransform::default()]);
        assert_eq!(animate_channels(&def, 1, &mut nodes), 0);
        assert_eq!(nodes.get(NodeId(0)), Some(&NodeTransform::default()));

        let def = definition(NodeId(0));
        assert_eq!(animate_channels(&def, 7, &mut nodes), 0);
    }
}
