use crate::{
    context::{ClipboardSelectionReader, SelectionReader},
    keys::{Key, Modifier},
    tests::fakes::{FakeClipboard, RecordingInput, Stroke},
};

use std::{sync::Arc, time::Duration};

fn reader(clipboard: &Arc<FakeClipboard>, input: RecordingInput) -> ClipboardSelectionReader {
    ClipboardSelectionReader::new(clipboard.clone(), Arc::new(input))
        .with_modifier(Modifier::Cmd)
        .with_settle(Duration::ZERO)
}

/// WHAT: Selection is read and the previous clipboard restored
/// WHY: Reading context must not clobber what the user copied
#[test]
fn given_selected_text_when_read_then_returned_and_clipboard_restored() {
    // Given: A clipboard holding earlier text and an app with a selection
    let clipboard = Arc::new(FakeClipboard::with_text("earlier copy"));
    let input = RecordingInput::copying(clipboard.clone(), "the selection");
    let reader = reader(&clipboard, input.clone());

    // When: Reading the selection
    let selection = reader.read_selection();

    // Then: The selection is returned and the clipboard is as before
    assert_eq!(selection.text, "the selection");
    assert!(selection.has_selection);
    assert_eq!(clipboard.contents(), "earlier copy");

    // And the copy chord was pressed with the modifier released last
    assert_eq!(
        input.strokes(),
        vec![
            Stroke::Press(Key::Modifier(Modifier::Cmd)),
            Stroke::Press(Key::Char('c')),
            Stroke::Release(Key::Char('c')),
            Stroke::Release(Key::Modifier(Modifier::Cmd)),
        ]
    );
}

/// WHAT: Nothing selected yields an empty selection, not stale clipboard text
/// WHY: The clipboard is cleared before copying
#[test]
fn given_no_selection_when_read_then_empty_and_clipboard_restored() {
    let clipboard = Arc::new(FakeClipboard::with_text("stale"));
    let reader = reader(&clipboard, RecordingInput::new());

    let selection = reader.read_selection();

    assert!(selection.text.is_empty());
    assert!(!selection.has_selection);
    assert_eq!(clipboard.contents(), "stale");
}

/// WHAT: Unavailable input device yields an empty selection
/// WHY: Selection reading is best-effort and never fails the snapshot
#[test]
fn given_broken_input_when_read_then_empty_selection() {
    let clipboard = Arc::new(FakeClipboard::with_text("keep me"));
    let reader = reader(&clipboard, RecordingInput::broken());

    let selection = reader.read_selection();

    assert!(!selection.has_selection);
    assert_eq!(clipboard.contents(), "keep me");
}

/// WHAT: Unreadable clipboard yields an empty selection
/// WHY: Clipboard errors must not propagate to the listener
#[test]
fn given_failing_clipboard_when_read_then_empty_selection() {
    let clipboard = Arc::new(FakeClipboard::failing());
    let reader = reader(&clipboard, RecordingInput::new());

    let selection = reader.read_selection();

    assert!(selection.text.is_empty());
    assert!(!selection.has_selection);
}

/// WHAT: Whitespace-only selection is not a selection
/// WHY: Clients only offer selection actions for real text
#[test]
fn given_whitespace_selection_when_read_then_has_selection_false() {
    let clipboard = Arc::new(FakeClipboard::default());
    let input = RecordingInput::copying(clipboard.clone(), "  \n ");
    let reader = reader(&clipboard, input);

    let selection = reader.read_selection();

    assert_eq!(selection.text, "  \n ");
    assert!(!selection.has_selection);
}
