use crate::{
    CoreError,
    hotkey::HotkeySpec,
    keys::{Key, Modifier},
};

/// WHAT: Default hotkey is cmd+shift+k
/// WHY: Matches the shortcut documented for the desktop app
#[test]
fn given_default_spec_when_displayed_then_cmd_shift_k() {
    // Given: The default spec
    let spec = HotkeySpec::default();

    // Then: It contains exactly cmd, shift and k
    assert_eq!(spec.to_string(), "cmd+shift+k");
    assert_eq!(spec.keys().len(), 3);
    assert!(spec.contains(&Key::Modifier(Modifier::Cmd)));
    assert!(spec.contains(&Key::Char('k')));
}

/// WHAT: Flat key lists parse into modifiers plus one primary key
/// WHY: The settings route stores hotkeys as `["cmd", "shift", "k"]`
#[test]
#[allow(clippy::unwrap_used)]
fn given_key_list_when_parsing_then_spec_matches_modifier_form() {
    // Given: The same combination in both configuration forms
    let from_list = HotkeySpec::from_key_list(&["shift", "cmd", "K"]).unwrap();
    let from_parts = HotkeySpec::parse(&["cmd", "shift"], "k").unwrap();

    // Then: They are equal and round-trip to the canonical list
    assert_eq!(from_list, from_parts);
    assert_eq!(from_list.to_key_list(), vec!["cmd", "shift", "k"]);
}

/// WHAT: Lists without a primary key are rejected
/// WHY: A modifier-only chord would fire on every shortcut the user types
#[test]
fn given_modifier_only_list_when_parsing_then_invalid_hotkey() {
    // When: Parsing a list with no primary key
    let result = HotkeySpec::from_key_list(&["cmd", "shift"]);

    // Then: InvalidHotkey is returned
    assert!(matches!(result, Err(CoreError::InvalidHotkey { .. })));
}

/// WHAT: Two primary keys are rejected
/// WHY: The gate matches exactly one non-modifier key
#[test]
fn given_two_primary_keys_when_parsing_then_invalid_hotkey() {
    let result = HotkeySpec::from_key_list(&["cmd", "j", "k"]);

    assert!(matches!(result, Err(CoreError::InvalidHotkey { .. })));
}

/// WHAT: A modifier is not accepted as the primary key
/// WHY: `{modifiers: [cmd], key: shift}` has no primary key
#[test]
fn given_modifier_as_primary_when_building_then_invalid_hotkey() {
    let result = HotkeySpec::parse(&["cmd"], "shift");

    assert!(matches!(result, Err(CoreError::InvalidHotkey { .. })));
}

/// WHAT: Unknown modifier names are rejected
/// WHY: Typos must not silently drop a modifier from the chord
#[test]
fn given_unknown_modifier_when_parsing_then_invalid_hotkey() {
    let result = HotkeySpec::parse(&["cmd", "hyper"], "k");

    assert!(matches!(result, Err(CoreError::InvalidHotkey { .. })));
}
