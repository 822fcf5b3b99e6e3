//! System clipboard access through arboard.

use pointer_core::{CoreError, CoreResult, collaborators::Clipboard};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::instrument;

/// Clipboard backed by the OS clipboard.
///
/// A fresh `arboard::Clipboard` is opened per call: the handle is not `Sync`
/// on every platform and calls come from several worker threads.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create the clipboard adapter.
    pub fn new() -> Self {
        Self
    }

    #[track_caller]
    fn open() -> CoreResult<arboard::Clipboard> {
        arboard::Clipboard::new().map_err(|e| CoreError::Clipboard {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Clipboard for SystemClipboard {
    #[instrument(skip(self))]
    fn read_text(&self) -> CoreResult<String> {
        match Self::open()?.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(CoreError::Clipboard {
                reason: format!("Failed to read clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[instrument(skip(self, text))]
    fn write_text(&self, text: &str) -> CoreResult<()> {
        let mut clipboard = Self::open()?;
        let result = if text.is_empty() {
            clipboard.clear()
        } else {
            clipboard.set_text(text)
        };

        result.map_err(|e| CoreError::Clipboard {
            reason: format!("Failed to set clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
