//! Process-level facade over the listener, the hotkey and the connections.

use crate::{
    AppResult, EnigoInput, HttpRemoteProcessor, KeyboardListener, PlatformFocusInspector,
    SystemClipboard, config::Config,
};

use pointer_core::{
    Broadcaster, ClipboardSelectionReader, ConnectionHandle, ConnectionRegistry,
    ContextSnapshotBuilder, DEFAULT_MAX_IN_FLIGHT, DispatchedPlayback, Dispatcher, HotkeyControl,
    HotkeySpec, InputCore, KeystrokePlaybackEngine, start_context_worker,
};

use std::sync::Arc;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{info, instrument};
use uuid::Uuid;

/// Wires the core to the platform adapters and exposes the operations the
/// outer surfaces need.
pub struct PointerService {
    listener: KeyboardListener,
    hotkey: HotkeyControl,
    registry: ConnectionRegistry,
    _context_worker: JoinHandle<()>,
}

impl PointerService {
    /// Build every component from `config`. Workers run on `handle`.
    ///
    /// Nothing touches the OS until [`start`](Self::start).
    #[track_caller]
    #[instrument(skip(config, handle))]
    pub fn build(config: &Config, handle: &Handle) -> AppResult<Self> {
        let hotkey = HotkeyControl::new(config.hotkey.spec()?);
        let registry = ConnectionRegistry::new();

        let clipboard = Arc::new(SystemClipboard::new());
        let input = Arc::new(EnigoInput::new());

        let selection = ClipboardSelectionReader::new(clipboard, input.clone())
            .with_settle(config.selection.copy_settle());
        let builder = Arc::new(ContextSnapshotBuilder::new(
            Arc::new(PlatformFocusInspector::new()),
            Arc::new(selection),
        ));

        let (context_worker, context_join) = start_context_worker(
            handle,
            Arc::clone(&builder),
            Broadcaster::new(registry.clone()),
        );

        let processor = Arc::new(HttpRemoteProcessor::new(
            config.server.remote_endpoint.clone(),
        )?);
        let engine = KeystrokePlaybackEngine::new(input, processor, config.playback.timing());
        let playback = DispatchedPlayback::new(
            engine,
            Dispatcher::new(handle.clone(), DEFAULT_MAX_IN_FLIGHT),
        );

        let core = InputCore::new(
            hotkey.subscribe(),
            config.hotkey.cooldown(),
            config.inline.enabled,
            builder,
            context_worker,
            Arc::new(playback),
        );

        info!(
            hotkey = %hotkey.current(),
            inline = config.inline.enabled,
            endpoint = %config.server.remote_endpoint,
            "Pointer service assembled"
        );

        Ok(Self {
            listener: KeyboardListener::new(core),
            hotkey,
            registry,
            _context_worker: context_join,
        })
    }

    /// Attach the global keyboard listener.
    #[track_caller]
    pub fn start(&self) -> AppResult<()> {
        self.listener.start()
    }

    /// Stop reacting to keyboard events.
    pub fn stop(&self) {
        self.listener.stop();
    }

    /// Whether the listener is processing events.
    pub fn is_running(&self) -> bool {
        self.listener.is_running()
    }

    /// Replace the active hotkey. Takes effect on the next key event.
    pub fn update_hotkey(&self, spec: HotkeySpec) {
        self.hotkey.update_hotkey(spec);
    }

    /// The active hotkey.
    pub fn current_hotkey(&self) -> Arc<HotkeySpec> {
        self.hotkey.current()
    }

    /// Start broadcasting to a client connection.
    pub fn register_connection(&self, handle: ConnectionHandle) {
        self.registry.register(handle);
    }

    /// Stop broadcasting to a client connection.
    pub fn unregister_connection(&self, id: Uuid) -> bool {
        self.registry.unregister(id)
    }

    /// Number of connected clients.
    pub fn connection_count(&self) -> usize {
        self.registry.count()
    }
}
