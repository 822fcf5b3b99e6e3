use crate::{
    collaborators::FocusedElement,
    context::{ClientEvent, ContextSnapshotBuilder, Position, is_text_field},
    tests::fakes::{FakeInspector, FixedSelection},
};

use std::sync::Arc;

fn builder(inspector: FakeInspector, selection: &'static str) -> ContextSnapshotBuilder {
    ContextSnapshotBuilder::new(Arc::new(inspector), Arc::new(FixedSelection(selection)))
}

/// WHAT: Editable roles and terminal apps count as text fields
/// WHY: These decide whether the hotkey starts inline capture
#[test]
fn given_focus_variants_when_classified_then_editable_roles_and_terminals_match() {
    let element = |role: &str, app: &str| FocusedElement {
        role: role.to_string(),
        app_name: app.to_string(),
    };

    assert!(is_text_field(&element("AXTextField", "Safari")));
    assert!(is_text_field(&element("AXTextArea", "Notes")));
    assert!(is_text_field(&element("AXGroup", "iterm2")));
    assert!(!is_text_field(&element("AXButton", "Finder")));
    assert!(!is_text_field(&FocusedElement::default()));
}

/// WHAT: Inspector failure degrades to "not a text field"
/// WHY: Missing accessibility permission must not stop the hotkey
#[test]
fn given_failing_inspector_when_probed_then_unknown_non_text_field() {
    // Given: An inspector that errors
    let builder = builder(FakeInspector::failing(), "");

    // When: Probing
    let probe = builder.probe(Position { x: 1.0, y: 2.0 });

    // Then: The probe is usable and conservative
    assert!(!probe.is_text_field);
    assert!(probe.focused.is_none());
    assert_eq!(probe.descriptor(), "unknown");
}

/// WHAT: Completed snapshot carries position, focus and selection
/// WHY: Clients render the overlay from these fields
#[test]
fn given_selection_when_completed_then_snapshot_has_all_fields() {
    // Given: A focused button with selected text
    let builder = builder(FakeInspector::focused("AXButton", "Finder"), "selected words");
    let probe = builder.probe(Position { x: 10.0, y: 20.0 });

    // When: Completing with a selection read
    let snapshot = builder.complete(probe, true);

    // Then: Every field is filled
    assert_eq!(snapshot.position, Position { x: 10.0, y: 20.0 });
    assert_eq!(snapshot.selected_text, "selected words");
    assert!(snapshot.has_selection);
    assert!(!snapshot.is_text_field);
    assert_eq!(snapshot.focused_element, "AXButton in Finder");
    assert!(snapshot.timestamp > 0.0);
}

/// WHAT: Skipping the selection read leaves the selection empty
/// WHY: The copy chord would disturb inline typing
#[test]
fn given_no_selection_read_when_completed_then_selection_empty() {
    let builder = builder(FakeInspector::focused("AXTextField", "Mail"), "ignored");
    let probe = builder.probe(Position::default());

    let snapshot = builder.complete(probe, false);

    assert!(snapshot.selected_text.is_empty());
    assert!(!snapshot.has_selection);
    assert!(snapshot.is_text_field);
}

/// WHAT: hotkey-pressed event serializes as a tagged message
/// WHY: Connected clients dispatch on `type` and read `data`
#[test]
#[allow(clippy::unwrap_used)]
fn given_snapshot_when_serialized_then_tagged_hotkey_pressed_message() {
    // Given: A snapshot
    let builder = builder(FakeInspector::focused("AXButton", "Finder"), "x");
    let snapshot = builder.complete(builder.probe(Position { x: 3.0, y: 4.0 }), true);

    // When: Wrapped and serialized
    let json = serde_json::to_value(ClientEvent::HotkeyPressed(snapshot)).unwrap();

    // Then: The wire shape matches what clients expect
    assert_eq!(json["type"], "hotkey-pressed");
    assert_eq!(json["data"]["position"]["x"], 3.0);
    assert_eq!(json["data"]["selected_text"], "x");
    assert_eq!(json["data"]["has_selection"], true);
    assert_eq!(json["data"]["is_text_field"], false);
    assert_eq!(json["data"]["focused_element"], "AXButton in Finder");
    assert!(json["data"]["timestamp"].is_f64());
    assert_eq!(json["data"]["has_screenshot"], false);
}
