//! Platform-neutral key model shared by the listener, the hotkey gate and
//! the playback engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Modifier keys that can take part in a hotkey combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Command on macOS, the Windows/Super key elsewhere.
    Cmd,
    /// Control.
    Ctrl,
    /// Alt / Option.
    Alt,
    /// Shift.
    Shift,
}

impl Modifier {
    /// All modifiers in display order.
    pub const ALL: [Modifier; 4] = [Modifier::Cmd, Modifier::Ctrl, Modifier::Alt, Modifier::Shift];

    /// Parse a modifier name, accepting the common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cmd" | "command" | "meta" | "super" | "win" => Some(Modifier::Cmd),
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "alt" | "option" | "opt" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Modifier::Cmd => "cmd",
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A physical key, independent of keyboard layout state.
///
/// Character keys are stored lowercase so that `k` and `K` name the same
/// physical key when matching hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A modifier key (left and right variants collapse to one).
    Modifier(Modifier),
    /// A character-producing key.
    Char(char),
    /// Space bar.
    Space,
    /// Return / Enter.
    Enter,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Backspace (delete-left).
    Backspace,
    /// Function key F1..F12.
    Function(u8),
    /// Any key the model does not name, keyed by the platform code.
    Other(u32),
}

impl Key {
    /// Character key, normalized to lowercase.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }

    /// Parse a key name such as `k`, `space`, `enter` or `f5`.
    ///
    /// Modifier names parse to [`Key::Modifier`].
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(modifier) = Modifier::from_name(name) {
            return Some(Key::Modifier(modifier));
        }

        let lowered = name.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "space" => return Some(Key::Space),
            "enter" | "return" => return Some(Key::Enter),
            "tab" => return Some(Key::Tab),
            "escape" | "esc" => return Some(Key::Escape),
            "backspace" => return Some(Key::Backspace),
            _ => {}
        }

        if let Some(number) = lowered.strip_prefix('f')
            && let Ok(n) = number.parse::<u8>()
            && (1..=12).contains(&n)
        {
            return Some(Key::Function(n));
        }

        let mut chars = lowered.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() && !c.is_control() => Some(Key::char(c)),
            _ => None,
        }
    }

    /// Whether this key is a modifier.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Modifier(_))
    }
}

impl From<Modifier> for Key {
    fn from(modifier: Modifier) -> Self {
        Key::Modifier(modifier)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Modifier(m) => write!(f, "{m}"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("space"),
            Key::Enter => f.write_str("enter"),
            Key::Tab => f.write_str("tab"),
            Key::Escape => f.write_str("escape"),
            Key::Backspace => f.write_str("backspace"),
            Key::Function(n) => write!(f, "f{n}"),
            Key::Other(code) => write!(f, "key#{code}"),
        }
    }
}

/// Raw input delivered by the native listener.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down. `text` is what the platform reports the key would
    /// type under the current layout and modifiers, when it reports anything.
    KeyDown {
        /// Physical key.
        key: Key,
        /// Layout-aware text for the press.
        text: Option<String>,
    },
    /// A key was released.
    KeyUp {
        /// Physical key.
        key: Key,
    },
    /// The pointer moved to screen coordinates.
    PointerMoved {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
}
