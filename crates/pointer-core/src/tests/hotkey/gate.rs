use crate::{
    hotkey::{HotkeyGate, HotkeySpec, KeyStateTracker},
    keys::{Key, Modifier},
};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

const CMD: Key = Key::Modifier(Modifier::Cmd);
const SHIFT: Key = Key::Modifier(Modifier::Shift);
const K: Key = Key::Char('k');

fn hold_chord(tracker: &mut KeyStateTracker) {
    tracker.key_down(CMD);
    tracker.key_down(SHIFT);
    tracker.key_down(K);
}

fn gate(cooldown_ms: u64) -> HotkeyGate {
    HotkeyGate::new(
        Arc::new(HotkeySpec::default()),
        Duration::from_millis(cooldown_ms),
    )
}

/// WHAT: A held chord fires exactly once
/// WHY: Auto-repeat of the primary key must not re-trigger
#[test]
fn given_held_chord_when_key_repeats_then_fires_once() {
    // Given: The chord held
    let mut gate = gate(0);
    let mut tracker = KeyStateTracker::new();
    hold_chord(&mut tracker);
    let t0 = Instant::now();

    // When: The gate is evaluated repeatedly while held
    let fired = (0..5)
        .filter(|i| gate.on_key_down(&tracker, t0 + Duration::from_secs(*i)))
        .count();

    // Then: Only the first evaluation fires
    assert_eq!(fired, 1);
    assert!(gate.is_armed());
}

/// WHAT: Second trigger inside the cooldown is suppressed
/// WHY: Triggers at t=0 and t=0.2 with a 0.5s cooldown fire exactly once
#[test]
fn given_cooldown_when_retriggered_after_200ms_then_suppressed() {
    // Given: A 500ms cooldown and a first trigger at t=0
    let mut gate = gate(500);
    let mut tracker = KeyStateTracker::new();
    let t0 = Instant::now();
    hold_chord(&mut tracker);
    assert!(gate.on_key_down(&tracker, t0));

    // When: The primary key is released and pressed again at t=0.2
    tracker.key_up(K);
    gate.on_key_up(&K);
    tracker.key_down(K);
    let second = gate.on_key_down(&tracker, t0 + Duration::from_millis(200));

    // Then: The second attempt does not fire
    assert!(!second);
}

/// WHAT: Re-press after the cooldown fires again
/// WHY: Releasing any chord key re-arms the gate
#[test]
fn given_release_of_modifier_when_repressed_after_cooldown_then_fires_again() {
    let mut gate = gate(500);
    let mut tracker = KeyStateTracker::new();
    let t0 = Instant::now();
    hold_chord(&mut tracker);
    assert!(gate.on_key_down(&tracker, t0));

    // When: Shift (not the primary key) is released while cmd and k stay held
    tracker.key_up(SHIFT);
    gate.on_key_up(&SHIFT);
    assert!(!gate.is_armed());

    // Then: Pressing shift again after the cooldown fires
    tracker.key_down(SHIFT);
    assert!(gate.on_key_down(&tracker, t0 + Duration::from_millis(600)));
}

/// WHAT: Releasing a key outside the chord keeps the gate armed
/// WHY: Only chord keys end a press-cycle
#[test]
fn given_unrelated_key_release_when_chord_held_then_still_armed() {
    let mut gate = gate(0);
    let mut tracker = KeyStateTracker::new();
    hold_chord(&mut tracker);
    assert!(gate.on_key_down(&tracker, Instant::now()));

    gate.on_key_up(&Key::Char('x'));

    assert!(gate.is_armed());
}

/// WHAT: Replacing the spec switches matching to the new chord
/// WHY: Reconfiguration must not need a listener restart
#[test]
#[allow(clippy::unwrap_used)]
fn given_replaced_spec_when_new_chord_held_then_fires() {
    // Given: A gate on cmd+shift+k, replaced with ctrl+space
    let mut gate = gate(0);
    let new_spec = HotkeySpec::parse(&["ctrl"], "space").unwrap();
    gate.replace_spec(Arc::new(new_spec));

    let mut tracker = KeyStateTracker::new();
    let now = Instant::now();

    // When: The old chord is held
    hold_chord(&mut tracker);

    // Then: It does not fire, but the new one does
    assert!(!gate.on_key_down(&tracker, now));
    tracker.key_down(Key::Modifier(Modifier::Ctrl));
    tracker.key_down(Key::Space);
    assert!(gate.on_key_down(&tracker, now));
}
