//! Pointer Core Library
//!
//! Input-capture and command-dispatch core of the Pointer desktop assistant:
//! hotkey detection, inline keystroke capture, context snapshots, client
//! broadcast and synthetic keystroke playback. Platform and network services
//! are reached through the traits in [`collaborators`].
//!
//! # Example
//!
//! ```
//! use pointer_core::{InlineCaptureStateMachine, Key, TriggerOutcome};
//!
//! let mut machine = InlineCaptureStateMachine::new(true);
//! assert_eq!(machine.on_trigger(true), TriggerOutcome::CaptureStarted);
//!
//! for c in "hi".chars() {
//!     machine.on_key(Key::char(c), None);
//! }
//!
//! match machine.on_trigger(true) {
//!     TriggerOutcome::CaptureFinished(Some(request)) => {
//!         assert_eq!(request.text, "hi");
//!         assert_eq!(request.erase_count, 4);
//!     }
//!     other => unreachable!("unexpected outcome: {other:?}"),
//! }
//! ```

mod broadcast;
mod capture;
pub mod collaborators;
mod context;
mod dispatch;
mod error;
mod hotkey;
mod input_core;
mod keys;
mod modifier_guard;
mod playback;

pub use {
    broadcast::{BroadcastReport, Broadcaster, ConnectionHandle, ConnectionRegistry},
    capture::{
        BufferEdit, CaptureState, HOTKEY_ECHO_CHARS, InlineCaptureStateMachine, KeystrokeBuffer,
        PlaybackRequest, TriggerOutcome,
    },
    context::{
        ClientEvent, ClipboardSelectionReader, ContextSnapshot, ContextSnapshotBuilder,
        DEFAULT_COPY_SETTLE, EDITABLE_ROLES, FocusProbe, Position, Selection, SelectionReader,
        TERMINAL_APPS, is_text_field,
    },
    dispatch::{DEFAULT_MAX_IN_FLIGHT, Dispatcher, SerialWorker},
    error::{CoreError, Result as CoreResult},
    hotkey::{DEFAULT_COOLDOWN, HotkeyControl, HotkeyGate, HotkeySpec, KeyStateTracker},
    input_core::{CONTEXT_QUEUE_CAPACITY, InputCore, start_context_worker},
    keys::{InputEvent, Key, Modifier},
    modifier_guard::{ModifierGuard, clipboard_modifier},
    playback::{
        DEFAULT_ERASE_DELAY, DEFAULT_REMOTE_TIMEOUT, DEFAULT_THINKING_CYCLES,
        DEFAULT_THINKING_PAUSE, DEFAULT_TYPE_DELAY, DispatchedPlayback, EMPTY_RESPONSE_TEXT,
        ERROR_MARKER, KeystrokePlaybackEngine, PlaybackLauncher, PlaybackOutcome, PlaybackStage,
        PlaybackTiming, THINKING_TEXT,
    },
};

#[cfg(test)]
mod tests;
