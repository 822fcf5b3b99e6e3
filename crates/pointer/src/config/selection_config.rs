use crate::config::default_copy_settle_ms;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Clipboard-based selection reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Wait between the simulated copy and the clipboard read.
    #[serde(default = "default_copy_settle_ms")]
    pub copy_settle_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            copy_settle_ms: default_copy_settle_ms(),
        }
    }
}

impl SelectionConfig {
    /// Settle time as a duration.
    pub fn copy_settle(&self) -> Duration {
        Duration::from_millis(self.copy_settle_ms)
    }
}
