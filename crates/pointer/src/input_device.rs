//! Synthetic keyboard input through enigo.

use pointer_core::{
    CoreError, CoreResult, Key, Modifier,
    collaborators::{InputDevice, InputDeviceFactory},
};

use std::panic::Location;

use enigo::{Direction, Enigo, Keyboard, Settings};
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Map a core key to the enigo key that produces it.
pub(crate) fn to_enigo_key(key: Key) -> Option<enigo::Key> {
    let mapped = match key {
        Key::Modifier(Modifier::Cmd) => enigo::Key::Meta,
        Key::Modifier(Modifier::Ctrl) => enigo::Key::Control,
        Key::Modifier(Modifier::Alt) => enigo::Key::Alt,
        Key::Modifier(Modifier::Shift) => enigo::Key::Shift,
        Key::Char(c) => enigo::Key::Unicode(c),
        Key::Space => enigo::Key::Space,
        Key::Enter => enigo::Key::Return,
        Key::Tab => enigo::Key::Tab,
        Key::Escape => enigo::Key::Escape,
        Key::Backspace => enigo::Key::Backspace,
        Key::Function(n) => match n {
            1 => enigo::Key::F1,
            2 => enigo::Key::F2,
            3 => enigo::Key::F3,
            4 => enigo::Key::F4,
            5 => enigo::Key::F5,
            6 => enigo::Key::F6,
            7 => enigo::Key::F7,
            8 => enigo::Key::F8,
            9 => enigo::Key::F9,
            10 => enigo::Key::F10,
            11 => enigo::Key::F11,
            12 => enigo::Key::F12,
            _ => return None,
        },
        Key::Other(code) => enigo::Key::Other(code),
    };
    Some(mapped)
}

/// Opens an [`EnigoDevice`] on the calling thread.
///
/// Enigo is not `Send`, so each playback run or copy chord creates its own
/// instance on the worker that uses it. `Enigo::new()` is cheap.
#[derive(Debug, Default)]
pub struct EnigoInput;

impl EnigoInput {
    /// Create the factory.
    pub fn new() -> Self {
        Self
    }
}

impl InputDeviceFactory for EnigoInput {
    #[track_caller]
    #[instrument(skip(self))]
    fn open(&self) -> CoreResult<Box<dyn InputDevice>> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| CoreError::InputDevice {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Synthetic keyboard opened");

        Ok(Box::new(EnigoDevice { enigo }))
    }
}

/// One thread-bound synthetic keyboard.
pub struct EnigoDevice {
    enigo: Enigo,
}

impl EnigoDevice {
    #[track_caller]
    fn key(&mut self, key: Key, direction: Direction) -> CoreResult<()> {
        let mapped = to_enigo_key(key).ok_or_else(|| CoreError::InputDevice {
            reason: format!("No synthetic key for {}", key),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.enigo
            .key(mapped, direction)
            .map_err(|e| CoreError::InputDevice {
                reason: format!("Failed to send {} {:?}: {}", key, direction, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl InputDevice for EnigoDevice {
    fn press(&mut self, key: Key) -> CoreResult<()> {
        self.key(key, Direction::Press)
    }

    fn release(&mut self, key: Key) -> CoreResult<()> {
        self.key(key, Direction::Release)
    }

    fn tap(&mut self, key: Key) -> CoreResult<()> {
        self.key(key, Direction::Click)
    }

    fn type_char(&mut self, c: char) -> CoreResult<()> {
        // Text entry does not synthesize a line break on every platform.
        if c == '\n' {
            return self.key(Key::Enter, Direction::Click);
        }

        let mut buf = [0u8; 4];
        self.enigo
            .text(c.encode_utf8(&mut buf))
            .map_err(|e| CoreError::InputDevice {
                reason: format!("Failed to type {:?}: {}", c, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
