use crate::hotkey::{HotkeyControl, HotkeySpec};

use std::sync::Arc;

/// WHAT: Updates replace the whole spec and notify subscribers
/// WHY: The listener must observe complete specs only
#[test]
#[allow(clippy::unwrap_used)]
fn given_subscriber_when_hotkey_updated_then_sees_new_spec() {
    // Given: A control on the default hotkey and a subscriber
    let control = HotkeyControl::new(HotkeySpec::default());
    let mut rx = control.subscribe();
    assert!(!rx.has_changed().unwrap());

    // When: The hotkey is updated
    let replacement = HotkeySpec::from_key_list(&["alt", "space"]).unwrap();
    control.update_hotkey(replacement.clone());

    // Then: The subscriber sees a change carrying the complete new spec
    assert!(rx.has_changed().unwrap());
    let seen = Arc::clone(&*rx.borrow_and_update());
    assert_eq!(*seen, replacement);
    assert_eq!(*control.current(), replacement);
}
