//! Scheduled animations: the per-playback request plus its runtime state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::AnimationDefinition;
use crate::events::AnimationCallback;
use crate::ids::AnimationId;
use crate::time::JulianDate;

/// Two-state lifecycle of a scheduled animation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Stopped,
    Animating,
}

/// Request passed to `AnimationCollection::add`.
#[derive(Clone)]
pub struct AnimationOptions {
    /// Name of an animation in the loaded document.
    pub name: String,
    /// Scene time playback starts at. `None` starts on the first update that sees it.
    pub start_time: Option<JulianDate>,
    /// Playback speed multiplier; must be > 0.
    pub speedup: f64,
    pub looping: bool,
    /// Remove from the collection once playback stops.
    pub remove_on_stop: bool,
    pub start: Option<AnimationCallback>,
    pub update: Option<AnimationCallback>,
    pub stop: Option<AnimationCallback>,
}

impl AnimationOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_time: None,
            speedup: 1.0,
            looping: false,
            remove_on_stop: false,
            start: None,
            update: None,
            stop: None,
        }
    }

    pub fn with_start_time(mut self, start_time: JulianDate) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_speedup(mut self, speedup: f64) -> Self {
        self.speedup = speedup;
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_remove_on_stop(mut self, remove_on_stop: bool) -> Self {
        self.remove_on_stop = remove_on_stop;
        self
    }

    pub fn on_start(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.start = Some(Arc::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.update = Some(Arc::new(f));
        self
    }

    pub fn on_stop(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.stop = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("name", &self.name)
            .field("start_time", &self.start_time)
            .field("speedup", &self.speedup)
            .field("looping", &self.looping)
            .field("remove_on_stop", &self.remove_on_stop)
            .finish_non_exhaustive()
    }
}

/// One playback of an animation definition, owned by an `AnimationCollection`.
pub struct ScheduledAnimation {
    id: AnimationId,
    definition: Arc<AnimationDefinition>,
    start_time: Option<JulianDate>,
    speedup: f64,
    looping: bool,
    remove_on_stop: bool,
    pub(crate) start: Option<AnimationCallback>,
    pub(crate) update: Option<AnimationCallback>,
    pub(crate) stop: Option<AnimationCallback>,

    // Runtime state, written only by the collection's update pass.
    pub(crate) state: AnimationState,
    resolved_start: Option<JulianDate>,
    duration: Option<f64>,
    pub(crate) previous_index: Option<usize>,
}

impl ScheduledAnimation {
    /// Caller has already validated `options.speedup`.
    pub(crate) fn new(
        id: AnimationId,
        options: AnimationOptions,
        definition: Arc<AnimationDefinition>,
    ) -> Self {
        Self {
            id,
            definition,
            start_time: options.start_time,
            speedup: options.speedup,
            looping: options.looping,
            remove_on_stop: options.remove_on_stop,
            start: options.start,
            update: options.update,
            stop: options.stop,
            state: AnimationState::Stopped,
            resolved_start: None,
            duration: None,
            previous_index: None,
        }
    }

    #[inline]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    #[inline]
    pub fn definition(&self) -> &Arc<AnimationDefinition> {
        &self.definition
    }

    /// Requested start time, as passed to `add`.
    #[inline]
    pub fn start_time(&self) -> Option<JulianDate> {
        self.start_time
    }

    #[inline]
    pub fn speedup(&self) -> f64 {
        self.speedup
    }

    #[inline]
    pub fn looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn remove_on_stop(&self) -> bool {
        self.remove_on_stop
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Absolute start (requested start + animation epoch), once the first update has seen it.
    #[inline]
    pub fn resolved_start(&self) -> Option<JulianDate> {
        self.resolved_start
    }

    /// Scaled playback duration in seconds, once the first update has seen it.
    #[inline]
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Last keyframe index written to the nodes, `None` before the first sample.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }

    /// Normalized local time at `scene_time`: 0 at the resolved start, 1 at the end of one run.
    /// Start and duration are resolved on the first call and never recomputed.
    pub(crate) fn normalized_time(&mut self, scene_time: JulianDate) -> f64 {
        let epoch = self.definition.epoch();
        let requested = self.start_time;
        let start = *self
            .resolved_start
            .get_or_insert_with(|| requested.unwrap_or(scene_time).add_seconds(epoch));

        let last = self.definition.last_time();
        let speedup = self.speedup;
        let duration = *self.duration.get_or_insert_with(|| last / speedup);

        start.seconds_difference(&scene_time) / duration
    }

    /// Keyframe index for a normalized time already known to be in-window.
    pub(crate) fn keyframe_index(&self, delta: f64) -> usize {
        let count = self.definition.sample_count();
        let folded = delta - delta.floor();
        ((folded * count as f64).floor() as usize).min(count - 1)
    }
}

impl fmt::Debug for ScheduledAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledAnimation")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("start_time", &self.start_time)
            .field("speedup", &self.speedup)
            .field("looping", &self.looping)
            .field("remove_on_stop", &self.remove_on_stop)
            .field("state", &self.state)
            .field("resolved_start", &self.resolved_start)
            .field("duration", &self.duration)
            .field("previous_index", &self.previous_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> Arc<AnimationDefinition> {
        Arc::new(AnimationDefinition::new("walk", vec![0.0, 1.0, 2.0, 3.0], vec![]).unwrap())
    }

    #[test]
    fn resolves_timing_once() {
        let t0 = JulianDate::new(2_451_545, 0.0);
        let mut anim = ScheduledAnimation::new(
            AnimationId(0),
            AnimationOptions::new("walk").with_speedup(2.0),
            walk(),
        );
        assert_eq!(anim.resolved_start(), None);
        assert_eq!(anim.normalized_time(t0), 0.0);
        assert_eq!(anim.resolved_start(), Some(t0));
        assert_eq!(anim.duration(), Some(1.5));

        // A later first-seen time must not move the start.
        let delta = anim.normalized_time(t0.add_seconds(0.75));
        assert!((delta - 0.5).abs() < 1e-12);
        assert_eq!(anim.resolved_start(), Some(t0));
    }

    #[test]
    fn epoch_offsets_start() {
        let def = Arc::new(AnimationDefinition::new("late", vec![1.0, 2.0], vec![]).unwrap());
        let t0 = JulianDate::from_seconds(10.0);
        let mut anim = ScheduledAnimation::new(
            AnimationId(1),
            AnimationOptions::new("late").with_start_time(t0),
            def,
        );
        let delta = anim.normalized_time(t0);
        assert_eq!(anim.resolved_start(), Some(t0.add_seconds(1.0)));
        assert!(delta < 0.0);
    }

    #[test]
    fn keyframe_index_folds_and_clamps() {
        let anim = ScheduledAnimation::new(AnimationId(0), AnimationOptions::new("walk"), walk());
        assert_eq!(anim.keyframe_index(0.0), 0);
        assert_eq!(anim.keyframe_index(0.5), 2);
        assert_eq!(anim.keyframe_index(0.99), 3);
        assert_eq!(anim.keyframe_index(1.5), 2);
        assert_eq!(anim.keyframe_index(1.0), 0);
    }
}
