use crate::config::default_inline_enabled;

use serde::{Deserialize, Serialize};

/// Inline capture behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineConfig {
    /// When false every trigger broadcasts context instead of capturing.
    #[serde(default = "default_inline_enabled")]
    pub enabled: bool,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            enabled: default_inline_enabled(),
        }
    }
}
