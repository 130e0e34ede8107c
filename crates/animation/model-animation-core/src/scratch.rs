//! Scratch buffers and frame lifecycle.
//!
//! Owned by each collection so independent collections never share state.

use crate::config::Config;
use crate::ids::AnimationId;

#[derive(Debug, Default)]
pub struct Scratch {
    /// Animations that stopped with remove-on-stop set during the current pass.
    pub pending_removals: Vec<AnimationId>,
}

impl Scratch {
    pub fn new(cfg: &Config) -> Self {
        Self {
            pending_removals: Vec::with_capacity(cfg.scratch_removals),
        }
    }

    #[inline]
    pub fn begin_frame(&mut self) {
        self.pending_removals.clear();
    }
}
