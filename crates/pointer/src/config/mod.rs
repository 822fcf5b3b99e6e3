mod hotkey_config;
mod inline_config;
mod playback_config;
mod selection_config;
#[allow(clippy::module_inception)]
mod config;
mod server_config;

pub(crate) use {
    config::Config, hotkey_config::HotkeyConfig, inline_config::InlineConfig,
    playback_config::PlaybackConfig, selection_config::SelectionConfig,
    server_config::ServerConfig,
};

pub(crate) const DEFAULT_PORT: u16 = 8765;
pub(crate) const DEFAULT_REMOTE_ENDPOINT: &str = "http://127.0.0.1:8766/api/process-query";
pub(crate) const DEFAULT_HOTKEY_MODIFIERS: [&str; 2] = ["cmd", "shift"];
pub(crate) const DEFAULT_HOTKEY_KEY: &str = "k";
pub(crate) const DEFAULT_COOLDOWN_MS: u64 = 500;
pub(crate) const DEFAULT_INLINE_ENABLED: bool = true;
pub(crate) const DEFAULT_ERASE_DELAY_MS: u64 = 50;
pub(crate) const DEFAULT_TYPE_DELAY_MS: u64 = 20;
pub(crate) const DEFAULT_THINKING_CYCLES: u32 = 3;
pub(crate) const DEFAULT_THINKING_PAUSE_MS: u64 = 300;
pub(crate) const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_COPY_SETTLE_MS: u64 = 100;

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_remote_endpoint() -> String {
    DEFAULT_REMOTE_ENDPOINT.to_string()
}

pub(crate) fn default_hotkey_modifiers() -> Vec<String> {
    DEFAULT_HOTKEY_MODIFIERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

pub(crate) fn default_hotkey_key() -> String {
    DEFAULT_HOTKEY_KEY.to_string()
}

pub(crate) fn default_cooldown_ms() -> u64 {
    DEFAULT_COOLDOWN_MS
}

pub(crate) fn default_inline_enabled() -> bool {
    DEFAULT_INLINE_ENABLED
}

pub(crate) fn default_erase_delay_ms() -> u64 {
    DEFAULT_ERASE_DELAY_MS
}

pub(crate) fn default_type_delay_ms() -> u64 {
    DEFAULT_TYPE_DELAY_MS
}

pub(crate) fn default_thinking_cycles() -> u32 {
    DEFAULT_THINKING_CYCLES
}

pub(crate) fn default_thinking_pause_ms() -> u64 {
    DEFAULT_THINKING_PAUSE_MS
}

pub(crate) fn default_remote_timeout_secs() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_SECS
}

pub(crate) fn default_copy_settle_ms() -> u64 {
    DEFAULT_COPY_SETTLE_MS
}
