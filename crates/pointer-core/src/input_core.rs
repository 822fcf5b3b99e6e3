//! Listener-thread coordinator.
//!
//! [`InputCore`] owns everything the native listener callback touches: the
//! pressed-key set, the hotkey gate and the capture state machine. Its
//! handler never blocks; slow work leaves the thread as values handed to a
//! worker (a [`FocusProbe`] for broadcasts, a [`PlaybackRequest`] for inline
//! answers).

use crate::{
    broadcast::Broadcaster,
    capture::{InlineCaptureStateMachine, PlaybackRequest, TriggerOutcome},
    context::{ClientEvent, ContextSnapshotBuilder, FocusProbe, Position},
    dispatch::SerialWorker,
    hotkey::{HotkeyGate, HotkeySpec, KeyStateTracker},
    keys::{InputEvent, Key, Modifier},
    playback::PlaybackLauncher,
};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

/// Queue depth of the context broadcast worker.
pub const CONTEXT_QUEUE_CAPACITY: usize = 8;

/// Start the worker that completes snapshots (including the selection read)
/// and broadcasts them, one trigger at a time.
pub fn start_context_worker(
    handle: &Handle,
    builder: Arc<ContextSnapshotBuilder>,
    broadcaster: Broadcaster,
) -> (SerialWorker<FocusProbe>, JoinHandle<()>) {
    SerialWorker::start(handle, CONTEXT_QUEUE_CAPACITY, move |probe: FocusProbe| {
        let snapshot = builder.complete(probe, true);
        debug!(
            has_selection = snapshot.has_selection,
            focused = %snapshot.focused_element,
            "Context snapshot built"
        );

        match broadcaster.broadcast(&ClientEvent::HotkeyPressed(snapshot)) {
            Ok(report) if report.attempted == 0 => {
                warn!("Hotkey pressed but no frontend is connected");
            }
            Ok(report) => {
                info!(
                    delivered = report.delivered,
                    failed = report.failed(),
                    "Hotkey context broadcast"
                );
            }
            Err(e) => warn!(error = ?e, "Failed to broadcast hotkey context"),
        }
    })
}

/// Routes native input events through hotkey detection and inline capture.
pub struct InputCore {
    tracker: KeyStateTracker,
    gate: HotkeyGate,
    hotkey_rx: watch::Receiver<Arc<HotkeySpec>>,
    machine: InlineCaptureStateMachine,
    builder: Arc<ContextSnapshotBuilder>,
    context_worker: SerialWorker<FocusProbe>,
    playback: Arc<dyn PlaybackLauncher>,
    pointer: Position,
}

impl InputCore {
    /// Assemble the coordinator.
    pub fn new(
        mut hotkey_rx: watch::Receiver<Arc<HotkeySpec>>,
        cooldown: Duration,
        inline_enabled: bool,
        builder: Arc<ContextSnapshotBuilder>,
        context_worker: SerialWorker<FocusProbe>,
        playback: Arc<dyn PlaybackLauncher>,
    ) -> Self {
        let spec = Arc::clone(&*hotkey_rx.borrow_and_update());

        Self {
            tracker: KeyStateTracker::new(),
            gate: HotkeyGate::new(spec, cooldown),
            hotkey_rx,
            machine: InlineCaptureStateMachine::new(inline_enabled),
            builder,
            context_worker,
            playback,
            pointer: Position::default(),
        }
    }

    /// Handle one event at the current time.
    pub fn handle(&mut self, event: InputEvent) -> Option<TriggerOutcome> {
        self.handle_at(event, Instant::now())
    }

    /// Handle one event at `now`. Returns the trigger outcome when the event
    /// fired the hotkey.
    pub fn handle_at(&mut self, event: InputEvent, now: Instant) -> Option<TriggerOutcome> {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Position { x, y };
                None
            }
            InputEvent::KeyUp { key } => {
                self.tracker.key_up(key);
                self.gate.on_key_up(&key);
                None
            }
            InputEvent::KeyDown { key, text } => self.on_key_down(key, text.as_deref(), now),
        }
    }

    /// Pressed keys and capture state are dropped; the hotkey and cooldown
    /// clock are kept.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.machine = InlineCaptureStateMachine::new(self.inline_enabled());
    }

    /// Pressed-key tracker.
    pub fn tracker(&self) -> &KeyStateTracker {
        &self.tracker
    }

    /// Capture state machine.
    pub fn machine(&self) -> &InlineCaptureStateMachine {
        &self.machine
    }

    /// Combination currently matched against.
    pub fn active_hotkey(&self) -> &Arc<HotkeySpec> {
        self.gate.spec()
    }

    fn inline_enabled(&self) -> bool {
        self.machine.inline_enabled()
    }

    fn on_key_down(&mut self, key: Key, text: Option<&str>, now: Instant) -> Option<TriggerOutcome> {
        self.refresh_hotkey();
        self.tracker.key_down(key);

        if self.gate.on_key_down(&self.tracker, now) {
            return Some(self.on_trigger());
        }

        if self.machine.is_capturing()
            && !self.tracker.is_superset(self.gate.spec())
            && !self.is_shortcut(text)
        {
            self.machine.on_key(key, text);
        }

        None
    }

    /// Shortcut chords type nothing into the field. Alt only counts when the
    /// platform produced no text for it.
    fn is_shortcut(&self, text: Option<&str>) -> bool {
        let held = |m: Modifier| self.tracker.is_pressed(&Key::Modifier(m));
        held(Modifier::Cmd) || held(Modifier::Ctrl) || (held(Modifier::Alt) && text.is_none())
    }

    fn on_trigger(&mut self) -> TriggerOutcome {
        info!(hotkey = %self.gate.spec(), "Hotkey triggered");

        let probe = self.builder.probe(self.pointer);
        let outcome = self.machine.on_trigger(probe.is_text_field);

        match &outcome {
            TriggerOutcome::CaptureStarted => {}
            TriggerOutcome::CaptureFinished(Some(request)) => self.launch_playback(request.clone()),
            TriggerOutcome::CaptureFinished(None) => {}
            TriggerOutcome::Broadcast => {
                if let Err(e) = self.context_worker.submit(probe) {
                    warn!(error = ?e, "Context broadcast dropped");
                }
            }
        }

        outcome
    }

    fn launch_playback(&self, request: PlaybackRequest) {
        debug!(erase_count = request.erase_count, "Handing request to playback");
        self.playback.launch(request);
    }

    fn refresh_hotkey(&mut self) {
        if self.hotkey_rx.has_changed().unwrap_or(false) {
            let spec = Arc::clone(&*self.hotkey_rx.borrow_and_update());
            self.gate.replace_spec(spec);
        }
    }
}
