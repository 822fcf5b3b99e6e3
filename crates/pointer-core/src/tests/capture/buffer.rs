use crate::{
    capture::{BufferEdit, KeystrokeBuffer},
    keys::{Key, Modifier},
};

/// WHAT: Backspace on an empty buffer is a no-op
/// WHY: Erase counts derive from the buffer length and must never underflow
#[test]
fn given_empty_buffer_when_backspace_then_ignored_and_still_empty() {
    // Given: An empty buffer
    let mut buffer = KeystrokeBuffer::new();

    // When: Backspace is applied
    let edit = buffer.apply(Key::Backspace, None);

    // Then: Nothing happens
    assert_eq!(edit, BufferEdit::Ignored);
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
}

/// WHAT: Typed text, corrections and line breaks are tracked in order
/// WHY: The buffer must mirror what the user sees in the field
#[test]
fn given_typing_with_corrections_when_applied_then_buffer_matches_field() {
    // Given: "helo", one backspace, "lo", enter, space
    let mut buffer = KeystrokeBuffer::new();
    for c in "helo".chars() {
        buffer.apply(Key::char(c), Some(&c.to_string()));
    }
    assert_eq!(buffer.apply(Key::Backspace, None), BufferEdit::Deleted);
    buffer.apply(Key::Char('l'), None);
    buffer.apply(Key::Char('o'), Some("o"));
    assert_eq!(buffer.apply(Key::Enter, None), BufferEdit::Inserted);
    assert_eq!(buffer.apply(Key::Space, None), BufferEdit::Inserted);

    // Then: The buffer reads as the field would
    assert_eq!(buffer.as_string(), "hello\n ");
    assert_eq!(buffer.len(), 7);
}

/// WHAT: Layout text wins over the physical key
/// WHY: Shift+1 must be captured as `!`, not `1`
#[test]
fn given_layout_text_when_applied_then_text_is_captured() {
    let mut buffer = KeystrokeBuffer::new();

    buffer.apply(Key::Char('1'), Some("!"));
    buffer.apply(Key::Other(0x2f), Some("é"));

    assert_eq!(buffer.as_string(), "!é");
}

/// WHAT: Non-printing keys do not enter the buffer
/// WHY: Modifiers and navigation keys type nothing into the field
#[test]
fn given_non_printing_keys_when_applied_then_ignored() {
    let mut buffer = KeystrokeBuffer::new();

    let edits = [
        buffer.apply(Key::Modifier(Modifier::Shift), None),
        buffer.apply(Key::Tab, None),
        buffer.apply(Key::Escape, None),
        buffer.apply(Key::Function(5), None),
        buffer.apply(Key::Other(0x7b), None),
        buffer.apply(Key::Char('a'), Some("\u{1b}")),
    ];

    // Control text falls back to the physical char; everything else is ignored
    assert_eq!(&edits[..5], &[BufferEdit::Ignored; 5]);
    assert_eq!(edits[5], BufferEdit::Inserted);
    assert_eq!(buffer.as_string(), "a");
}
