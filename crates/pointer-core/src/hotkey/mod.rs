mod control;
mod gate;
mod spec;
mod tracker;

pub use {
    control::HotkeyControl,
    gate::{DEFAULT_COOLDOWN, HotkeyGate},
    spec::HotkeySpec,
    tracker::KeyStateTracker,
};
