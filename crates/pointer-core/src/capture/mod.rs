mod buffer;
mod state_machine;

pub use {
    buffer::{BufferEdit, KeystrokeBuffer},
    state_machine::{
        CaptureState, HOTKEY_ECHO_CHARS, InlineCaptureStateMachine, PlaybackRequest,
        TriggerOutcome,
    },
};
