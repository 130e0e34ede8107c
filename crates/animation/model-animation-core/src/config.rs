//! Core configuration for model-animation-core.

use serde::{Deserialize, Serialize};

/// Capacity hints for the collection and per-frame buffers.
/// None of these are limits; buffers grow past them as needed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity of the scheduled-animation list.
    pub animations: usize,
    /// Initial capacity of the pending-removal scratch buffer.
    pub scratch_removals: usize,
    /// Initial capacity of `FrameEvents` created through `Config::frame_events`.
    pub events_per_frame: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animations: 8,
            scratch_removals: 8,
            events_per_frame: 32,
        }
    }
}

impl Config {
    /// Allocate an outgoing event queue sized for this configuration.
    pub fn frame_events(&self) -> crate::events::FrameEvents {
        crate::events::FrameEvents::with_capacity(self.events_per_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"animations": 64}"#).unwrap();
        assert_eq!(cfg.animations, 64);
        assert_eq!(cfg.scratch_removals, Config::default().scratch_removals);
        assert_eq!(cfg.events_per_frame, Config::default().events_per_frame);
    }
}
