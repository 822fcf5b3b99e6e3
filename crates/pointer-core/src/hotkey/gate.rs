use crate::{
    hotkey::{HotkeySpec, KeyStateTracker},
    keys::Key,
};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::debug;

/// Default minimum interval between two triggers.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(500);

/// Debounces hotkey activation.
///
/// Fires once when the combination becomes fully held, then stays armed until
/// any key of the combination is released. Independently of arming, two
/// triggers are never closer together than the cooldown.
#[derive(Debug)]
pub struct HotkeyGate {
    spec: Arc<HotkeySpec>,
    armed: bool,
    last_trigger: Option<Instant>,
    cooldown: Duration,
}

impl HotkeyGate {
    /// Create a gate for `spec` with the given cooldown.
    pub fn new(spec: Arc<HotkeySpec>, cooldown: Duration) -> Self {
        Self {
            spec,
            armed: false,
            last_trigger: None,
            cooldown,
        }
    }

    /// Active combination.
    pub fn spec(&self) -> &Arc<HotkeySpec> {
        &self.spec
    }

    /// Swap the active combination.
    ///
    /// The gate disarms so the new chord can fire on its next full press; the
    /// cooldown clock is kept.
    pub fn replace_spec(&mut self, spec: Arc<HotkeySpec>) {
        debug!(old = %self.spec, new = %spec, "Hotkey spec replaced");
        self.spec = spec;
        self.armed = false;
    }

    /// Minimum interval between triggers.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether the chord is being held after having fired.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Evaluate the gate after a key press. Returns `true` when the hotkey
    /// fires.
    pub fn on_key_down(&mut self, tracker: &KeyStateTracker, now: Instant) -> bool {
        if self.armed || !tracker.is_superset(&self.spec) {
            return false;
        }

        if let Some(last) = self.last_trigger {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.cooldown {
                debug!(
                    remaining_ms = (self.cooldown - elapsed).as_millis(),
                    "Hotkey cooldown active"
                );
                return false;
            }
        }

        self.armed = true;
        self.last_trigger = Some(now);
        true
    }

    /// Disarm when any key of the combination is released.
    pub fn on_key_up(&mut self, key: &Key) {
        if self.spec.contains(key) {
            self.armed = false;
        }
    }
}
