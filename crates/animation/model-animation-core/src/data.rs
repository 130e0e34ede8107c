//! Read-only animation definitions.
//!
//! A definition owns the shared time array and one sampler per channel. It is
//! validated once on construction and shared behind `Arc` by every scheduled
//! animation that plays it.

use serde::{Deserialize, Serialize};

use crate::binding::ChannelTarget;
use crate::error::AnimationError;
use crate::value::Value;

/// Declared interpolation of a sampler. Playback samples at the floor keyframe
/// regardless; the mode is retained for hosts and tooling.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
}

/// Maps a keyframe index to an output value.
#[derive(Clone, Debug, PartialEq)]
pub struct Sampler {
    pub interpolation: Interpolation,
    pub output: Vec<Value>,
}

impl Sampler {
    pub fn new(output: Vec<Value>) -> Self {
        Self {
            interpolation: Interpolation::default(),
            output,
        }
    }

    #[inline]
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.output.get(index)
    }
}

/// Binds one sampler to one node property.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub target: ChannelTarget,
    pub sampler: Sampler,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDefinition {
    name: String,
    times: Vec<f64>,
    channels: Vec<Channel>,
}

impl AnimationDefinition {
    /// Build a definition, checking:
    /// - at least one sample time, all finite and non-decreasing;
    /// - last time > 0 (it divides the normalized playback time);
    /// - every sampler has exactly one output per sample time, of the kind its target expects.
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        channels: Vec<Channel>,
    ) -> Result<Self, AnimationError> {
        let name = name.into();
        let (first, last) = match (times.first(), times.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return Err(AnimationError::invalid(&name, "TIME has no samples")),
        };
        if !first.is_finite() {
            return Err(AnimationError::invalid(&name, "TIME values must be finite"));
        }
        for pair in times.windows(2) {
            if !pair[1].is_finite() {
                return Err(AnimationError::invalid(&name, "TIME values must be finite"));
            }
            if pair[1] < pair[0] {
                return Err(AnimationError::invalid(&name, "TIME must be non-decreasing"));
            }
        }
        if last <= 0.0 {
            return Err(AnimationError::invalid(
                &name,
                format!("last TIME value must be > 0, got {last}"),
            ));
        }

        for (i, channel) in channels.iter().enumerate() {
            if channel.sampler.output.len() != times.len() {
                return Err(AnimationError::invalid(
                    &name,
                    format!(
                        "channel {i} has {} outputs for {} sample times",
                        channel.sampler.output.len(),
                        times.len()
                    ),
                ));
            }
            let expected = channel.target.path.value_kind();
            if let Some(bad) = channel
                .sampler
                .output
                .iter()
                .find(|v| v.kind() != expected)
            {
                return Err(AnimationError::invalid(
                    &name,
                    format!(
                        "channel {i} targets {:?} but produces {:?}",
                        channel.target.path,
                        bad.kind()
                    ),
                ));
            }
        }

        Ok(Self {
            name,
            times,
            channels,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Local animation epoch: the first sample time.
    #[inline]
    pub fn epoch(&self) -> f64 {
        self.times[0]
    }

    /// Last sample time; the unscaled playback duration.
    #[inline]
    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::TargetPath;
    use crate::ids::NodeId;

    fn translation_channel(values: &[[f32; 3]]) -> Channel {
        Channel {
            target: ChannelTarget {
                node: NodeId(0),
                path: TargetPath::Translation,
            },
            sampler: Sampler::new(values.iter().map(|v| Value::Vec3(*v)).collect()),
        }
    }

    #[test]
    fn accepts_well_formed_definition() {
        let def = AnimationDefinition::new(
            "walk",
            vec![0.5, 1.0, 2.0],
            vec![translation_channel(&[[0.0; 3], [1.0; 3], [2.0; 3]])],
        )
        .unwrap();
        assert_eq!(def.epoch(), 0.5);
        assert_eq!(def.last_time(), 2.0);
        assert_eq!(def.sample_count(), 3);
        assert_eq!(def.channels()[0].sampler.value_at(1), Some(&Value::Vec3([1.0; 3])));
        assert_eq!(def.channels()[0].sampler.value_at(3), None);
    }

    #[test]
    fn rejects_bad_times() {
        assert!(AnimationDefinition::new("a", vec![], vec![]).is_err());
        assert!(AnimationDefinition::new("a", vec![0.0], vec![]).is_err());
        assert!(AnimationDefinition::new("a", vec![0.0, 2.0, 1.0], vec![]).is_err());
        assert!(AnimationDefinition::new("a", vec![0.0, f64::NAN], vec![]).is_err());
    }

    #[test]
    fn rejects_mismatched_outputs() {
        let short = AnimationDefinition::new(
            "a",
            vec![0.0, 1.0],
            vec![translation_channel(&[[0.0; 3]])],
        );
        assert!(matches!(short, Err(AnimationError::InvalidDefinition { .. })));

        let mut wrong_kind = translation_channel(&[[0.0; 3], [1.0; 3]]);
        wrong_kind.target.path = TargetPath::Rotation;
        assert!(AnimationDefinition::new("a", vec![0.0, 1.0], vec![wrong_kind]).is_err());
    }
}
