use crate::hotkey::HotkeySpec;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Publishes the active hotkey to the listener thread.
///
/// Each update replaces the whole spec. The listener picks it up on its next
/// key event, so at most one event is judged against the old combination.
#[derive(Clone)]
pub struct HotkeyControl {
    tx: watch::Sender<Arc<HotkeySpec>>,
}

impl HotkeyControl {
    /// Start with `initial` as the active combination.
    pub fn new(initial: HotkeySpec) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// Replace the active combination.
    pub fn update_hotkey(&self, spec: HotkeySpec) {
        info!(hotkey = %spec, "Hotkey updated");
        self.tx.send_replace(Arc::new(spec));
    }

    /// The active combination.
    pub fn current(&self) -> Arc<HotkeySpec> {
        Arc::clone(&*self.tx.borrow())
    }

    /// Receiver for the listener side.
    pub fn subscribe(&self) -> watch::Receiver<Arc<HotkeySpec>> {
        self.tx.subscribe()
    }
}
