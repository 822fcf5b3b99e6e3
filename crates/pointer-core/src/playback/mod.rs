mod engine;
mod timing;

pub use {
    engine::{
        DispatchedPlayback, EMPTY_RESPONSE_TEXT, ERROR_MARKER, KeystrokePlaybackEngine,
        PlaybackLauncher, PlaybackOutcome, PlaybackStage, THINKING_TEXT,
    },
    timing::{
        DEFAULT_ERASE_DELAY, DEFAULT_REMOTE_TIMEOUT, DEFAULT_THINKING_CYCLES,
        DEFAULT_THINKING_PAUSE, DEFAULT_TYPE_DELAY, PlaybackTiming,
    },
};
