//! Inline capture state machine.
//!
//! A trigger in a text field starts capturing keystrokes; the next trigger
//! stops capturing and turns the captured text into a [`PlaybackRequest`].
//! Triggers outside text fields are left for the broadcast path.

use crate::{
    capture::{BufferEdit, KeystrokeBuffer},
    keys::Key,
};

use tracing::{debug, info};

/// Characters leaked into the target field by the hotkey itself: one on the
/// press that starts capture and one on the press that ends it.
pub const HOTKEY_ECHO_CHARS: usize = 2;

/// Capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Not capturing; triggers go to the broadcast path unless in a text field.
    Idle,
    /// Buffering keystrokes typed into the focused text field.
    Capturing,
}

/// Work produced by one inline capture, consumed by one playback run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// The captured text, sent to the remote processor as the query.
    pub text: String,
    /// Characters to erase from the field before playback starts.
    pub erase_count: usize,
}

/// Result of feeding a trigger into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Capture started; nothing is broadcast.
    CaptureStarted,
    /// Capture ended. `None` when the trimmed capture was empty.
    CaptureFinished(Option<PlaybackRequest>),
    /// Not an inline trigger; build a full snapshot and broadcast it.
    Broadcast,
}

/// Decides between inline capture and context broadcast.
#[derive(Debug)]
pub struct InlineCaptureStateMachine {
    state: CaptureState,
    buffer: KeystrokeBuffer,
    inline_enabled: bool,
}

impl Default for InlineCaptureStateMachine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InlineCaptureStateMachine {
    /// Create an idle machine. With `inline_enabled == false` every trigger
    /// takes the broadcast path.
    pub fn new(inline_enabled: bool) -> Self {
        Self {
            state: CaptureState::Idle,
            buffer: KeystrokeBuffer::new(),
            inline_enabled,
        }
    }

    /// Whether text-field triggers start inline capture.
    pub fn inline_enabled(&self) -> bool {
        self.inline_enabled
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Whether keystrokes are being captured.
    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// Captured text so far.
    pub fn buffer(&self) -> &KeystrokeBuffer {
        &self.buffer
    }

    /// Feed a hotkey trigger.
    pub fn on_trigger(&mut self, is_text_field: bool) -> TriggerOutcome {
        match self.state {
            CaptureState::Idle if is_text_field && self.inline_enabled => {
                self.buffer.clear();
                self.state = CaptureState::Capturing;
                info!("Inline capture started");
                TriggerOutcome::CaptureStarted
            }
            CaptureState::Idle => TriggerOutcome::Broadcast,
            CaptureState::Capturing => {
                let text = self.buffer.as_string();
                let erase_count = self.buffer.len() + HOTKEY_ECHO_CHARS;
                self.buffer.clear();
                self.state = CaptureState::Idle;

                if text.trim().is_empty() {
                    info!("Inline capture finished with no text");
                    return TriggerOutcome::CaptureFinished(None);
                }

                info!(
                    text_len = text.chars().count(),
                    erase_count, "Inline capture finished"
                );
                TriggerOutcome::CaptureFinished(Some(PlaybackRequest { text, erase_count }))
            }
        }
    }

    /// Feed a key press that is not part of a held hotkey.
    ///
    /// Ignored unless capturing.
    pub fn on_key(&mut self, key: Key, text: Option<&str>) -> BufferEdit {
        if self.state != CaptureState::Capturing {
            return BufferEdit::Ignored;
        }

        let edit = self.buffer.apply(key, text);
        if edit != BufferEdit::Ignored {
            debug!(buffer_len = self.buffer.len(), ?edit, "Capture buffer edited");
        }
        edit
    }
}
