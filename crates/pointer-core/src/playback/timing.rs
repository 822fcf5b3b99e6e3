use std::time::Duration;

/// Delay between synthetic backspaces.
///
/// Some applications drop key events that arrive faster than they repaint;
/// 50ms is reliable across native and Electron text fields.
pub const DEFAULT_ERASE_DELAY: Duration = Duration::from_millis(50);

/// Delay between typed response characters.
pub const DEFAULT_TYPE_DELAY: Duration = Duration::from_millis(20);

/// Number of times the thinking dots are erased and retyped.
pub const DEFAULT_THINKING_CYCLES: u32 = 3;

/// Pause between thinking animation cycles.
pub const DEFAULT_THINKING_PAUSE: Duration = Duration::from_millis(300);

/// Upper bound on the remote processor call.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Timing knobs for one playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    /// Delay after each backspace and after each "Thinking..." character.
    pub erase_delay: Duration,
    /// Delay after each response character.
    pub type_delay: Duration,
    /// Dot animation cycles.
    pub thinking_cycles: u32,
    /// Pause before each animation cycle.
    pub thinking_pause: Duration,
    /// Remote call timeout.
    pub remote_timeout: Duration,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            erase_delay: DEFAULT_ERASE_DELAY,
            type_delay: DEFAULT_TYPE_DELAY,
            thinking_cycles: DEFAULT_THINKING_CYCLES,
            thinking_pause: DEFAULT_THINKING_PAUSE,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

impl PlaybackTiming {
    /// No delays at all, for driving the engine against fakes.
    pub fn instant(remote_timeout: Duration) -> Self {
        Self {
            erase_delay: Duration::ZERO,
            type_delay: Duration::ZERO,
            thinking_cycles: DEFAULT_THINKING_CYCLES,
            thinking_pause: Duration::ZERO,
            remote_timeout,
        }
    }
}
