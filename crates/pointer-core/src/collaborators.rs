//! Interfaces to the platform and network services the core drives.
//!
//! Implementations live in the desktop binary; tests use in-memory fakes.
//! Every call is best-effort from the core's point of view: errors are caught
//! where the call is made and never reach the listener thread.

use crate::{CoreResult, keys::Key};

use std::{future::Future, sync::Arc};

/// Role and owning application of the focused UI element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusedElement {
    /// Accessibility role, e.g. `AXTextField`.
    pub role: String,
    /// Name of the application that owns the element.
    pub app_name: String,
}

/// System clipboard text access.
pub trait Clipboard: Send + Sync {
    /// Current clipboard text (empty when the clipboard holds no text).
    fn read_text(&self) -> CoreResult<String>;

    /// Replace the clipboard text.
    fn write_text(&self, text: &str) -> CoreResult<()>;
}

/// Describes the currently focused UI element.
pub trait FocusInspector: Send + Sync {
    /// Inspect the focused element.
    fn inspect(&self) -> CoreResult<FocusedElement>;
}

/// Synthetic keyboard.
///
/// Not required to be `Send`: platform keyboards are often thread-bound, so
/// one is opened per worker through an [`InputDeviceFactory`].
pub trait InputDevice {
    /// Press and hold `key`.
    fn press(&mut self, key: Key) -> CoreResult<()>;

    /// Release `key`.
    fn release(&mut self, key: Key) -> CoreResult<()>;

    /// Type one character as text, independent of layout.
    fn type_char(&mut self, c: char) -> CoreResult<()>;

    /// Press and release `key`.
    fn tap(&mut self, key: Key) -> CoreResult<()> {
        self.press(key)?;
        self.release(key)
    }
}

/// Opens an [`InputDevice`] on the calling thread.
pub trait InputDeviceFactory: Send + Sync {
    /// Open a device bound to the current thread.
    fn open(&self) -> CoreResult<Box<dyn InputDevice>>;
}

/// Reply from the remote processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReply {
    /// HTTP status code.
    pub status: u16,
    /// Response text on success, error body otherwise.
    pub body: String,
}

impl RemoteReply {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The agent endpoint that answers inline queries.
///
/// The call itself is unbounded; the playback engine applies the timeout.
pub trait RemoteProcessor: Send + Sync + 'static {
    /// Send `query` and return the reply.
    fn process(&self, query: &str) -> impl Future<Output = CoreResult<RemoteReply>> + Send;
}

/// One duplex client connection, seen from the sending side.
///
/// `send` must not block: implementations enqueue the payload for the
/// connection's own writer and report failure if that is impossible.
pub trait ConnectionSink: Send + Sync {
    /// Queue a serialized event for delivery.
    fn send(&self, payload: Arc<str>) -> CoreResult<()>;
}
