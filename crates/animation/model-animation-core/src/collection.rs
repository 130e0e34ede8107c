//! AnimationCollection: ordered set of scheduled animations and the per-frame update pass.
//!
//! Methods:
//! - add, remove, remove_all, contains, get, get_by_id, len, iter
//! - update (resolve timing → state transitions → sample → deferred events → removals)

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;

use crate::animation::{AnimationOptions, AnimationState, ScheduledAnimation};
use crate::config::Config;
use crate::data::AnimationDefinition;
use crate::error::AnimationError;
use crate::events::{FrameEvents, LifecycleEvent, QueuedEvent, Signal};
use crate::ids::{AnimationId, IdAllocator};
use crate::nodes::NodeStore;
use crate::sampling::animate_channels;
use crate::scratch::Scratch;
use crate::time::JulianDate;

/// Named animation definitions of a loaded document.
pub type AnimationLibrary = IndexMap<String, Arc<AnimationDefinition>>;

#[derive(Debug)]
pub struct AnimationCollection {
    /// Raised inside `add` with the new animation.
    pub animation_added: Signal<ScheduledAnimation>,
    /// Raised for each animation leaving the collection, including remove-on-stop removals in `update`.
    pub animation_removed: Signal<ScheduledAnimation>,

    library: Option<Arc<AnimationLibrary>>,
    animations: Vec<ScheduledAnimation>,
    ids: IdAllocator,
    scratch: Scratch,
}

impl AnimationCollection {
    /// Create an unbound collection; `add` fails until `bind_library` is called.
    pub fn new(cfg: &Config) -> Self {
        Self {
            animation_added: Signal::new(),
            animation_removed: Signal::new(),
            library: None,
            animations: Vec::with_capacity(cfg.animations),
            ids: IdAllocator::new(),
            scratch: Scratch::new(cfg),
        }
    }

    /// Make the animations of a loaded document available to `add`.
    pub fn bind_library(&mut self, library: Arc<AnimationLibrary>) {
        self.library = Some(library);
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.library.is_some()
    }

    /// Schedule a playback of the named animation.
    ///
    /// Fails without side effects if no document is bound, the name is unknown,
    /// or `speedup` is not strictly positive.
    pub fn add(&mut self, options: AnimationOptions) -> Result<AnimationId, AnimationError> {
        let library = self
            .library
            .as_ref()
            .ok_or(AnimationError::DocumentNotLoaded)?;
        let definition = library
            .get(&options.name)
            .cloned()
            .ok_or_else(|| AnimationError::UnknownAnimation {
                name: options.name.clone(),
            })?;
        // Written so NaN is rejected too.
        if !(options.speedup > 0.0) {
            return Err(AnimationError::InvalidSpeedup {
                speedup: options.speedup,
            });
        }

        let id = self.ids.alloc_animation();
        debug!("scheduling {:?} as {:?}", options.name, id);
        self.animations
            .push(ScheduledAnimation::new(id, options, definition));
        if let Some(added) = self.animations.last() {
            self.animation_added.raise(added);
        }
        Ok(id)
    }

    /// Remove one animation. Returns false if it is not in this collection.
    pub fn remove(&mut self, id: AnimationId) -> bool {
        match self.position(id) {
            Some(i) => {
                let removed = self.animations.remove(i);
                debug!("removed {:?} ({:?})", removed.name(), id);
                self.animation_removed.raise(&removed);
                true
            }
            None => false,
        }
    }

    /// Remove every animation, raising `animation_removed` for each in order.
    pub fn remove_all(&mut self) {
        let removed = std::mem::take(&mut self.animations);
        debug!("removing all {} animations", removed.len());
        for animation in &removed {
            self.animation_removed.raise(animation);
        }
    }

    #[inline]
    pub fn contains(&self, id: AnimationId) -> bool {
        self.position(id).is_some()
    }

    /// Positional lookup; `None` when `index` is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ScheduledAnimation> {
        self.animations.get(index)
    }

    pub fn get_by_id(&self, id: AnimationId) -> Option<&ScheduledAnimation> {
        self.animations.iter().find(|a| a.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledAnimation> {
        self.animations.iter()
    }

    fn position(&self, id: AnimationId) -> Option<usize> {
        self.animations.iter().position(|a| a.id() == id)
    }

    /// Advance every animation to `scene_time`.
    ///
    /// Newly reached keyframes are written into `nodes`; start/update/stop
    /// callbacks are appended to `events` rather than invoked. Animations that
    /// stop with remove-on-stop set leave the collection after the pass.
    /// Returns true if any channel was sampled.
    pub fn update(
        &mut self,
        scene_time: JulianDate,
        nodes: &mut NodeStore,
        events: &mut FrameEvents,
    ) -> bool {
        self.scratch.begin_frame();
        let mut animated = false;

        for animation in self.animations.iter_mut() {
            let delta = animation.normalized_time(scene_time);
            let id = animation.id();

            if delta >= 0.0 && (delta <= 1.0 || animation.looping()) {
                if animation.state == AnimationState::Stopped {
                    animation.state = AnimationState::Animating;
                    debug!("{:?} ({:?}) started", animation.name(), id);
                    if let Some(cb) = &animation.start {
                        events.push(QueuedEvent::new(LifecycleEvent::Started, id, Arc::clone(cb)));
                    }
                }

                let index = animation.keyframe_index(delta);
                if animation.previous_index != Some(index) {
                    animation.previous_index = Some(index);
                    animate_channels(animation.definition(), index, nodes);
                    if let Some(cb) = &animation.update {
                        events.push(QueuedEvent::new(LifecycleEvent::Updated, id, Arc::clone(cb)));
                    }
                    animated = true;
                }
            } else {
                if animation.state == AnimationState::Animating {
                    animation.state = AnimationState::Stopped;
                    debug!("{:?} ({:?}) stopped", animation.name(), id);
                    if let Some(cb) = &animation.stop {
                        events.push(QueuedEvent::new(LifecycleEvent::Stopped, id, Arc::clone(cb)));
                    }
                }

                if animation.remove_on_stop() {
                    self.scratch.pending_removals.push(id);
                }
            }
        }

        for id in self.scratch.pending_removals.drain(..) {
            if let Some(i) = self.animations.iter().position(|a| a.id() == id) {
                let removed = self.animations.remove(i);
                debug!("removed {:?} ({:?}) on stop", removed.name(), id);
                self.animation_removed.raise(&removed);
            }
        }

        animated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Arc<AnimationLibrary> {
        let mut lib = AnimationLibrary::new();
        lib.insert(
            "spin".to_string(),
            Arc::new(AnimationDefinition::new("spin", vec![0.0, 1.0], vec![]).unwrap()),
        );
        Arc::new(lib)
    }

    #[test]
    fn add_requires_bound_library() {
        let mut animations = AnimationCollection::new(&Config::default());
        assert!(!animations.is_bound());
        assert_eq!(
            animations.add(AnimationOptions::new("spin")),
            Err(AnimationError::DocumentNotLoaded)
        );
        animations.bind_library(library());
        assert!(animations.add(AnimationOptions::new("spin")).is_ok());
    }

    #[test]
    fn remove_on_stop_uses_collection_scratch() {
        let mut animations = AnimationCollection::new(&Config::default());
        animations.bind_library(library());
        let t0 = JulianDate::from_seconds(0.0);
        let id = animations
            .add(
                AnimationOptions::new("spin")
                    .with_start_time(t0)
                    .with_remove_on_stop(true),
            )
            .unwrap();

        let mut nodes = NodeStore::default();
        let mut events = FrameEvents::new();
        animations.update(t0, &mut nodes, &mut events);
        assert!(animations.contains(id));
        animations.update(t0.add_seconds(2.0), &mut nodes, &mut events);
        assert!(!animations.contains(id));
        assert!(animations.scratch.pending_removals.is_empty());
    }
}
