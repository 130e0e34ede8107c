//! Notification plumbing.
//!
//! Two mechanisms:
//! - `Signal<T>`: synchronous broadcast, used by the collection for
//!   added/removed notifications. Listeners receive a shared reference and so
//!   cannot mutate the collection that raised them.
//! - `FrameEvents`: a caller-owned queue that the update pass appends
//!   per-animation lifecycle callbacks to. The host fires them with
//!   `dispatch()` once the update has returned.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::AnimationId;

/// Zero-argument lifecycle callback attached to a scheduled animation.
pub type AnimationCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by `Signal::add_listener`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u32);

type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// Broadcast signal delivering `&T` to every listener in registration order.
pub struct Signal<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u32,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(l, _)| *l == id) {
            Some(i) => {
                self.listeners.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn raise(&mut self, payload: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(payload);
        }
    }
}

/// Which lifecycle transition queued an event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Stopped → Animating
    Started,
    /// A new keyframe was sampled this frame
    Updated,
    /// Animating → Stopped
    Stopped,
}

/// One deferred callback.
#[derive(Clone)]
pub struct QueuedEvent {
    pub kind: LifecycleEvent,
    pub animation: AnimationId,
    callback: AnimationCallback,
}

impl QueuedEvent {
    pub fn new(kind: LifecycleEvent, animation: AnimationId, callback: AnimationCallback) -> Self {
        Self {
            kind,
            animation,
            callback,
        }
    }

    #[inline]
    pub fn fire(&self) {
        (self.callback)()
    }
}

impl fmt::Debug for QueuedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedEvent")
            .field("kind", &self.kind)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

/// Outgoing events collected during one frame, in enqueue order.
#[derive(Clone, Debug, Default)]
pub struct FrameEvents {
    events: Vec<QueuedEvent>,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, event: QueuedEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedEvent> {
        self.events.iter()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Fire every queued callback in order, leaving the queue empty.
    /// Returns how many callbacks were fired.
    pub fn dispatch(&mut self) -> usize {
        let count = self.events.len();
        for event in self.events.drain(..) {
            event.fire();
        }
        count
    }
}
