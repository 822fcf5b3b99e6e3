use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Screen coordinates of the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// Context captured when the hotkey fires. Built once, consumed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSnapshot {
    /// Pointer position at trigger time.
    pub position: Position,
    /// Selected text, empty when nothing was selected or reading failed.
    pub selected_text: String,
    /// Whether `selected_text` holds a real selection.
    pub has_selection: bool,
    /// Whether the focused element accepts typed text.
    pub is_text_field: bool,
    /// Human-readable description of the focused element.
    pub focused_element: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    /// Screen capture is not taken; always `false`. Clients read the field.
    pub has_screenshot: bool,
}

/// Events pushed to connected clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// The hotkey fired outside inline mode.
    HotkeyPressed(ContextSnapshot),
}

pub(crate) fn unix_seconds(at: SystemTime) -> f64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
