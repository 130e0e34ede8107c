//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled animation owned by an `AnimationCollection`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u32);

/// Dense index of a node in a loaded document / `NodeStore`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Monotonic allocator for AnimationId.
/// Ids are never reused within one collection, so a stale handle can't alias a newer record.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_animation: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_animation(&mut self) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation = self.next_animation.wrapping_add(1);
        id
    }
}
