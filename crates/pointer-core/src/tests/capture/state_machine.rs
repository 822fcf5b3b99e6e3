use crate::{
    capture::{
        BufferEdit, CaptureState, HOTKEY_ECHO_CHARS, InlineCaptureStateMachine, PlaybackRequest,
        TriggerOutcome,
    },
    keys::Key,
};

fn type_text(machine: &mut InlineCaptureStateMachine, text: &str) {
    for c in text.chars() {
        machine.on_key(Key::char(c), Some(&c.to_string()));
    }
}

/// WHAT: Capturing "hello" produces an erase count of 7
/// WHY: Five typed characters plus the two leaked by the hotkey presses
#[test]
fn given_hello_captured_when_second_trigger_then_erase_count_seven() {
    // Given: Capture started in a text field
    let mut machine = InlineCaptureStateMachine::new(true);
    assert_eq!(machine.on_trigger(true), TriggerOutcome::CaptureStarted);

    // When: "hello" is typed and the hotkey fires again
    type_text(&mut machine, "hello");
    let outcome = machine.on_trigger(true);

    // Then: Playback is requested with the full erase count
    assert_eq!(
        outcome,
        TriggerOutcome::CaptureFinished(Some(PlaybackRequest {
            text: "hello".to_string(),
            erase_count: 5 + HOTKEY_ECHO_CHARS,
        }))
    );
    assert_eq!(machine.state(), CaptureState::Idle);
    assert!(machine.buffer().is_empty());
}

/// WHAT: Trigger outside a text field broadcasts
/// WHY: Non-inline triggers deliver context to connected clients
#[test]
fn given_idle_when_trigger_outside_text_field_then_broadcast() {
    let mut machine = InlineCaptureStateMachine::default();

    assert_eq!(machine.on_trigger(false), TriggerOutcome::Broadcast);
    assert_eq!(machine.state(), CaptureState::Idle);
}

/// WHAT: Whitespace-only capture produces no playback
/// WHY: An empty query has nothing to ask the remote processor
#[test]
fn given_whitespace_capture_when_finished_then_no_playback() {
    // Given: Capture containing only spaces and a newline
    let mut machine = InlineCaptureStateMachine::new(true);
    machine.on_trigger(true);
    machine.on_key(Key::Space, None);
    machine.on_key(Key::Enter, None);

    // When: The hotkey fires again
    let outcome = machine.on_trigger(true);

    // Then: Capture ends without a request
    assert_eq!(outcome, TriggerOutcome::CaptureFinished(None));
    assert!(!machine.is_capturing());
}

/// WHAT: The second trigger ends capture even when focus moved away
/// WHY: Capture must never get stuck waiting for a text field
#[test]
fn given_capturing_when_trigger_outside_text_field_then_capture_finishes() {
    let mut machine = InlineCaptureStateMachine::new(true);
    machine.on_trigger(true);
    type_text(&mut machine, "hi");

    let outcome = machine.on_trigger(false);

    assert!(matches!(
        outcome,
        TriggerOutcome::CaptureFinished(Some(PlaybackRequest { erase_count: 4, .. }))
    ));
}

/// WHAT: Keys are ignored while idle
/// WHY: Only text typed between the two triggers is the query
#[test]
fn given_idle_when_keys_typed_then_not_buffered() {
    let mut machine = InlineCaptureStateMachine::new(true);

    let edit = machine.on_key(Key::Char('x'), Some("x"));

    assert_eq!(edit, BufferEdit::Ignored);
    assert!(machine.buffer().is_empty());
}

/// WHAT: Disabled inline mode always broadcasts
/// WHY: Users can opt out of inline capture in settings
#[test]
fn given_inline_disabled_when_trigger_in_text_field_then_broadcast() {
    let mut machine = InlineCaptureStateMachine::new(false);

    assert_eq!(machine.on_trigger(true), TriggerOutcome::Broadcast);
    assert!(!machine.inline_enabled());
}

/// WHAT: Backspaces during capture shrink both text and erase count
/// WHY: Erasing more characters than remain would eat the user's text
#[test]
fn given_corrections_during_capture_when_finished_then_erase_count_matches_remaining() {
    let mut machine = InlineCaptureStateMachine::new(true);
    machine.on_trigger(true);
    type_text(&mut machine, "abcd");
    for _ in 0..6 {
        machine.on_key(Key::Backspace, None);
    }
    type_text(&mut machine, "ok");

    let outcome = machine.on_trigger(true);

    assert_eq!(
        outcome,
        TriggerOutcome::CaptureFinished(Some(PlaybackRequest {
            text: "ok".to_string(),
            erase_count: 4,
        }))
    );
}
