//! Synthetic keystroke playback.
//!
//! One run erases the captured query from the focused field, shows an
//! animated "Thinking..." placeholder while the remote processor works, then
//! replaces the placeholder with the answer:
//!
//! `Erasing -> Thinking -> Waiting -> ErasingThinking -> Typing -> Done`
//!
//! Remote failures are not errors here: they become the text that gets typed.

use crate::{
    CoreError, CoreResult,
    capture::PlaybackRequest,
    collaborators::{InputDevice, InputDeviceFactory, RemoteProcessor},
    dispatch::Dispatcher,
    keys::Key,
    playback::PlaybackTiming,
};

use std::{fmt, panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

/// Placeholder shown while waiting for the remote processor.
pub const THINKING_TEXT: &str = "Thinking...";

/// Prefix of every failure text typed back to the user.
pub const ERROR_MARKER: &str = "Error:";

/// Typed when the remote processor answers with an empty body.
pub const EMPTY_RESPONSE_TEXT: &str = "No response generated";

const THINKING_DOTS: usize = 3;

/// Playback stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStage {
    /// Removing the captured query and hotkey echo.
    Erasing,
    /// Typing and animating the placeholder.
    Thinking,
    /// Waiting for the remote processor.
    Waiting,
    /// Removing the placeholder.
    ErasingThinking,
    /// Typing the response.
    Typing,
    /// Finished.
    Done,
}

impl fmt::Display for PlaybackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackStage::Erasing => "erasing",
            PlaybackStage::Thinking => "thinking",
            PlaybackStage::Waiting => "waiting",
            PlaybackStage::ErasingThinking => "erasing-thinking",
            PlaybackStage::Typing => "typing",
            PlaybackStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every stage ran; `response` was typed.
    Completed {
        /// The text typed into the field.
        response: String,
    },
    /// A keystroke stage failed and the run stopped there.
    Aborted {
        /// Stage that failed.
        stage: PlaybackStage,
        /// Failure description.
        reason: String,
    },
}

/// Accepts playback requests from the listener thread.
pub trait PlaybackLauncher: Send + Sync {
    /// Start a run without waiting for it. Must not block.
    fn launch(&self, request: PlaybackRequest);
}

/// Drives one playback run per request.
pub struct KeystrokePlaybackEngine<P> {
    input: Arc<dyn InputDeviceFactory>,
    processor: Arc<P>,
    timing: PlaybackTiming,
}

impl<P> Clone for KeystrokePlaybackEngine<P> {
    fn clone(&self) -> Self {
        Self {
            input: Arc::clone(&self.input),
            processor: Arc::clone(&self.processor),
            timing: self.timing,
        }
    }
}

impl<P: RemoteProcessor> KeystrokePlaybackEngine<P> {
    /// Create an engine.
    pub fn new(
        input: Arc<dyn InputDeviceFactory>,
        processor: Arc<P>,
        timing: PlaybackTiming,
    ) -> Self {
        Self {
            input,
            processor,
            timing,
        }
    }

    /// Timing in use.
    pub fn timing(&self) -> PlaybackTiming {
        self.timing
    }

    /// Execute one run to completion. Never panics and never returns an error:
    /// failures are logged and reported in the outcome.
    pub async fn run(&self, request: PlaybackRequest) -> PlaybackOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("playback", run_id = %run_id, erase_count = request.erase_count);

        async move {
            info!(query_len = request.text.chars().count(), "Playback started");

            let input = Arc::clone(&self.input);
            let timing = self.timing;
            let erase_count = request.erase_count;
            if let Err((stage, e)) = run_keystrokes(PlaybackStage::Erasing, move || {
                let mut device = input.open().map_err(|e| (PlaybackStage::Erasing, e))?;
                erase(&mut *device, erase_count, timing.erase_delay)
                    .map_err(|e| (PlaybackStage::Erasing, e))?;
                show_thinking(&mut *device, &timing).map_err(|e| (PlaybackStage::Thinking, e))
            })
            .await
            {
                return abort(stage, e);
            }

            let response = self.resolve_response(&request.text).await;

            let input = Arc::clone(&self.input);
            let typed = response.clone();
            if let Err((stage, e)) = run_keystrokes(PlaybackStage::ErasingThinking, move || {
                let mut device = input.open().map_err(|e| (PlaybackStage::ErasingThinking, e))?;
                erase(
                    &mut *device,
                    THINKING_TEXT.chars().count(),
                    timing.erase_delay,
                )
                .map_err(|e| (PlaybackStage::ErasingThinking, e))?;
                type_text(&mut *device, &typed, timing.type_delay)
                    .map_err(|e| (PlaybackStage::Typing, e))
            })
            .await
            {
                return abort(stage, e);
            }

            info!(response_len = response.chars().count(), "Playback complete");
            PlaybackOutcome::Completed { response }
        }
        .instrument(span)
        .await
    }

    /// Call the remote processor, turning every failure into typed text.
    async fn resolve_response(&self, query: &str) -> String {
        let timeout = self.timing.remote_timeout;

        match tokio::time::timeout(timeout, self.processor.process(query)).await {
            Ok(Ok(reply)) if reply.is_success() => {
                if reply.body.trim().is_empty() {
                    EMPTY_RESPONSE_TEXT.to_string()
                } else {
                    reply.body
                }
            }
            Ok(Ok(reply)) => {
                warn!(status = reply.status, body = %reply.body, "Remote processor returned failure status");
                format!(
                    "{ERROR_MARKER} remote processor returned status {}",
                    reply.status
                )
            }
            Ok(Err(e)) => {
                warn!(error = ?e, "Remote processor call failed");
                format!("{ERROR_MARKER} remote processor unreachable")
            }
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis(), "Remote processor timed out");
                format!("{ERROR_MARKER} request timed out after {timeout:?}")
            }
        }
    }
}

type StageResult = Result<(), (PlaybackStage, CoreError)>;

/// Run keystroke work on the blocking pool: platform keyboards are
/// thread-bound and the inter-key delays are plain sleeps. A panic is
/// reported against `entry`, the first stage of the section.
async fn run_keystrokes<F>(entry: PlaybackStage, work: F) -> StageResult
where
    F: FnOnce() -> StageResult + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) => Err((
            entry,
            CoreError::InputDevice {
                reason: format!("Keystroke task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            },
        )),
    }
}

fn abort(stage: PlaybackStage, e: CoreError) -> PlaybackOutcome {
    error!(%stage, error = ?e, "Playback aborted");
    PlaybackOutcome::Aborted {
        stage,
        reason: e.to_string(),
    }
}

fn erase(device: &mut dyn InputDevice, count: usize, delay: Duration) -> CoreResult<()> {
    for _ in 0..count {
        device.tap(Key::Backspace)?;
        std::thread::sleep(delay);
    }
    Ok(())
}

fn type_text(device: &mut dyn InputDevice, text: &str, delay: Duration) -> CoreResult<()> {
    for c in text.chars() {
        device.type_char(c)?;
        std::thread::sleep(delay);
    }
    Ok(())
}

fn show_thinking(device: &mut dyn InputDevice, timing: &PlaybackTiming) -> CoreResult<()> {
    type_text(device, THINKING_TEXT, timing.erase_delay)?;

    let dots = &THINKING_TEXT[THINKING_TEXT.len() - THINKING_DOTS..];
    for _ in 0..timing.thinking_cycles {
        std::thread::sleep(timing.thinking_pause);
        erase(device, THINKING_DOTS, timing.erase_delay)?;
        type_text(device, dots, timing.erase_delay)?;
    }

    Ok(())
}

/// Launches each request as an independent job on a [`Dispatcher`].
pub struct DispatchedPlayback<P> {
    engine: KeystrokePlaybackEngine<P>,
    dispatcher: Dispatcher,
}

impl<P: RemoteProcessor> DispatchedPlayback<P> {
    /// Launch runs of `engine` through `dispatcher`.
    pub fn new(engine: KeystrokePlaybackEngine<P>, dispatcher: Dispatcher) -> Self {
        Self { engine, dispatcher }
    }
}

impl<P: RemoteProcessor> PlaybackLauncher for DispatchedPlayback<P> {
    fn launch(&self, request: PlaybackRequest) {
        let engine = self.engine.clone();
        let result = self.dispatcher.spawn("playback", async move {
            let _ = engine.run(request).await;
        });

        if let Err(e) = result {
            warn!(error = ?e, "Playback request dropped");
        }
    }
}
