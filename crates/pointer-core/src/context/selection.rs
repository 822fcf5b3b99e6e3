use crate::{
    CoreResult,
    collaborators::{Clipboard, InputDeviceFactory},
    keys::{Key, Modifier},
    modifier_guard::{ModifierGuard, clipboard_modifier},
};

use std::{sync::Arc, time::Duration};

use tracing::{debug, instrument, warn};

/// Default wait between the simulated copy and the clipboard read.
pub const DEFAULT_COPY_SETTLE: Duration = Duration::from_millis(100);

/// Text selected in the foreground application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected text (empty when nothing was selected).
    pub text: String,
    /// Whether a non-blank selection was found.
    pub has_selection: bool,
}

/// Reads the foreground selection.
pub trait SelectionReader: Send + Sync {
    /// Read the selection. Never fails; problems yield an empty selection.
    fn read_selection(&self) -> Selection;
}

/// Reads the selection by simulating the copy chord and reading the clipboard.
///
/// The previous clipboard text is restored afterwards. The clipboard is
/// cleared before copying so that an empty selection is not mistaken for
/// stale clipboard contents.
pub struct ClipboardSelectionReader {
    clipboard: Arc<dyn Clipboard>,
    input: Arc<dyn InputDeviceFactory>,
    modifier: Modifier,
    settle: Duration,
}

impl ClipboardSelectionReader {
    /// Create a reader using the platform copy chord.
    pub fn new(clipboard: Arc<dyn Clipboard>, input: Arc<dyn InputDeviceFactory>) -> Self {
        Self {
            clipboard,
            input,
            modifier: clipboard_modifier(),
            settle: DEFAULT_COPY_SETTLE,
        }
    }

    /// Override the wait between copy and read.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Override the copy-chord modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    fn simulate_copy(&self) -> CoreResult<()> {
        let mut device = self.input.open()?;
        let mut guard = ModifierGuard::press(&mut *device, self.modifier)?;
        guard.device_mut().tap(Key::Char('c'))?;
        Ok(())
    }

    fn restore(&self, previous: &str) {
        if let Err(e) = self.clipboard.write_text(previous) {
            warn!(error = ?e, "Failed to restore clipboard");
        }
    }
}

impl SelectionReader for ClipboardSelectionReader {
    #[instrument(skip(self))]
    fn read_selection(&self) -> Selection {
        let previous = self.clipboard.read_text().unwrap_or_else(|e| {
            debug!(error = ?e, "No previous clipboard text");
            String::new()
        });

        if let Err(e) = self.clipboard.write_text("") {
            warn!(error = ?e, "Failed to clear clipboard before copy");
        }

        if let Err(e) = self.simulate_copy() {
            warn!(error = ?e, "Simulated copy failed");
            self.restore(&previous);
            return Selection::default();
        }

        std::thread::sleep(self.settle);

        let text = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = ?e, "Failed to read copied selection");
                String::new()
            }
        };

        self.restore(&previous);

        let has_selection = !text.trim().is_empty();
        debug!(text_len = text.len(), has_selection, "Selection read");

        Selection {
            text,
            has_selection,
        }
    }
}
