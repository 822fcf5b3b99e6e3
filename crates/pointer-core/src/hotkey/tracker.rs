use crate::{hotkey::HotkeySpec, keys::Key};

use std::collections::HashSet;

/// The set of keys currently held down.
///
/// Owned by the listener side and mutated only from the native listener
/// thread. Other components get copies via [`KeyStateTracker::snapshot`].
#[derive(Debug, Default)]
pub struct KeyStateTracker {
    pressed: HashSet<Key>,
}

impl KeyStateTracker {
    /// Create a tracker with nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Repeated presses (auto-repeat) are no-ops.
    pub fn key_down(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Record a key release. Releasing a key that was never seen is a no-op.
    pub fn key_up(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Whether every key of `spec` is currently held.
    pub fn is_superset(&self, spec: &HotkeySpec) -> bool {
        spec.keys().is_subset(&self.pressed)
    }

    /// Whether `key` is currently held.
    pub fn is_pressed(&self, key: &Key) -> bool {
        self.pressed.contains(key)
    }

    /// Copy of the pressed set.
    pub fn snapshot(&self) -> HashSet<Key> {
        self.pressed.clone()
    }

    /// Forget all held keys.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
