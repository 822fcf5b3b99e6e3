use crate::{
    hotkey::{HotkeySpec, KeyStateTracker},
    keys::{Key, Modifier},
};

use std::collections::HashSet;

const CMD: Key = Key::Modifier(Modifier::Cmd);
const SHIFT: Key = Key::Modifier(Modifier::Shift);

/// WHAT: Repeated key-down events do not corrupt the pressed set
/// WHY: OS auto-repeat delivers many downs for one physical press
#[test]
fn given_repeated_key_downs_when_released_once_then_key_not_pressed() {
    // Given: A key pressed three times (auto-repeat)
    let mut tracker = KeyStateTracker::new();
    for _ in 0..3 {
        tracker.key_down(Key::Char('a'));
    }
    assert_eq!(tracker.snapshot().len(), 1);

    // When: Released once
    tracker.key_up(Key::Char('a'));

    // Then: Nothing is pressed
    assert!(tracker.snapshot().is_empty());
}

/// WHAT: Pressed set equals a model replay of physical downs and ups
/// WHY: It must never hold a key that is up, nor lose a key still held
#[test]
fn given_interleaved_event_sequence_when_replayed_then_matches_physical_state() {
    // Given: A scripted sequence with duplicates and stray ups
    let events = [
        (true, CMD),
        (true, SHIFT),
        (true, CMD),
        (true, Key::Char('k')),
        (false, Key::Char('x')),
        (false, SHIFT),
        (true, Key::Char('k')),
        (false, Key::Char('k')),
        (true, SHIFT),
    ];

    let mut tracker = KeyStateTracker::new();
    let mut model: HashSet<Key> = HashSet::new();

    // When/Then: After every event the tracker agrees with the model
    for (down, key) in events {
        if down {
            tracker.key_down(key);
            model.insert(key);
        } else {
            tracker.key_up(key);
            model.remove(&key);
        }
        assert_eq!(tracker.snapshot(), model);
    }

    assert!(tracker.is_pressed(&CMD));
    assert!(tracker.is_pressed(&SHIFT));
    assert!(!tracker.is_pressed(&Key::Char('k')));
}

/// WHAT: Superset check requires every key of the spec
/// WHY: A partial chord must not trigger
#[test]
fn given_partial_and_full_chords_when_checking_superset_then_only_full_matches() {
    let spec = HotkeySpec::default();
    let mut tracker = KeyStateTracker::new();

    tracker.key_down(CMD);
    tracker.key_down(SHIFT);
    assert!(!tracker.is_superset(&spec));

    tracker.key_down(Key::Char('k'));
    assert!(tracker.is_superset(&spec));

    // Extra keys held alongside the chord still match
    tracker.key_down(Key::Modifier(Modifier::Alt));
    assert!(tracker.is_superset(&spec));
}
