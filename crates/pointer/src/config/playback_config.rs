use crate::config::{
    default_erase_delay_ms, default_remote_timeout_secs, default_thinking_cycles,
    default_thinking_pause_ms, default_type_delay_ms,
};

use std::time::Duration;

use pointer_core::PlaybackTiming;
use serde::{Deserialize, Serialize};

/// Keystroke playback timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay after each synthetic backspace.
    #[serde(default = "default_erase_delay_ms")]
    pub erase_delay_ms: u64,
    /// Delay after each typed response character.
    #[serde(default = "default_type_delay_ms")]
    pub type_delay_ms: u64,
    /// Number of "..." animation cycles.
    #[serde(default = "default_thinking_cycles")]
    pub thinking_cycles: u32,
    /// Pause before each animation cycle.
    #[serde(default = "default_thinking_pause_ms")]
    pub thinking_pause_ms: u64,
    /// Remote processor timeout.
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            erase_delay_ms: default_erase_delay_ms(),
            type_delay_ms: default_type_delay_ms(),
            thinking_cycles: default_thinking_cycles(),
            thinking_pause_ms: default_thinking_pause_ms(),
            remote_timeout_secs: default_remote_timeout_secs(),
        }
    }
}

impl PlaybackConfig {
    /// Timing handed to the playback engine.
    pub fn timing(&self) -> PlaybackTiming {
        PlaybackTiming {
            erase_delay: Duration::from_millis(self.erase_delay_ms),
            type_delay: Duration::from_millis(self.type_delay_ms),
            thinking_cycles: self.thinking_cycles,
            thinking_pause: Duration::from_millis(self.thinking_pause_ms),
            remote_timeout: Duration::from_secs(self.remote_timeout_secs),
        }
    }
}
