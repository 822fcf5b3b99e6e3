use crate::{
    AppResult,
    config::{default_cooldown_ms, default_hotkey_key, default_hotkey_modifiers},
};

use std::time::Duration;

use pointer_core::HotkeySpec;
use serde::{Deserialize, Serialize};

/// Hotkey combination and debounce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Modifier names, e.g. `["cmd", "shift"]`.
    #[serde(default = "default_hotkey_modifiers")]
    pub modifiers: Vec<String>,
    /// Primary key name.
    #[serde(default = "default_hotkey_key")]
    pub key: String,
    /// Minimum interval between two triggers.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// User-facing label for the combination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            modifiers: default_hotkey_modifiers(),
            key: default_hotkey_key(),
            cooldown_ms: default_cooldown_ms(),
            description: None,
        }
    }
}

impl HotkeyConfig {
    /// Parse the configured combination.
    #[track_caller]
    pub fn spec(&self) -> AppResult<HotkeySpec> {
        Ok(HotkeySpec::parse(&self.modifiers, &self.key)?)
    }

    /// Store `spec` as the configured combination.
    pub fn set_spec(&mut self, spec: &HotkeySpec, description: Option<String>) {
        self.modifiers = spec.modifiers().map(|m| m.name().to_string()).collect();
        self.key = spec.key().to_string();
        self.description = description;
    }

    /// Label shown to the user; the combination itself when none was set.
    pub fn description_or(&self, spec: &HotkeySpec) -> String {
        self.description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| spec.to_string())
    }

    /// Cooldown as a duration.
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}
