use crate::keys::Key;

/// What a key press did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEdit {
    /// Characters were appended.
    Inserted,
    /// The last character was removed.
    Deleted,
    /// Nothing changed (empty-buffer backspace or an unrecognised key).
    Ignored,
}

/// Ordered characters typed while inline capture is active.
#[derive(Debug, Default, Clone)]
pub struct KeystrokeBuffer {
    chars: Vec<char>,
}

impl KeystrokeBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one character.
    pub fn insert(&mut self, c: char) {
        self.chars.push(c);
    }

    /// Remove the last character. No-op on an empty buffer.
    pub fn delete_last(&mut self) -> bool {
        self.chars.pop().is_some()
    }

    /// Append a line break.
    pub fn newline(&mut self) {
        self.chars.push('\n');
    }

    /// Apply a key press.
    ///
    /// Layout text reported by the platform wins over the physical key so that
    /// shifted characters are captured as typed. Keys that produce no
    /// printable text are ignored.
    pub fn apply(&mut self, key: Key, text: Option<&str>) -> BufferEdit {
        match key {
            Key::Backspace => {
                if self.delete_last() {
                    BufferEdit::Deleted
                } else {
                    BufferEdit::Ignored
                }
            }
            Key::Enter => {
                self.newline();
                BufferEdit::Inserted
            }
            Key::Space => {
                self.insert(' ');
                BufferEdit::Inserted
            }
            Key::Modifier(_) | Key::Tab | Key::Escape | Key::Function(_) => BufferEdit::Ignored,
            Key::Char(_) | Key::Other(_) => {
                let printable = text
                    .filter(|t| !t.is_empty() && t.chars().all(|c| !c.is_control()))
                    .map(|t| t.chars().collect::<Vec<_>>())
                    .or_else(|| match key {
                        Key::Char(c) => Some(vec![c]),
                        _ => None,
                    });

                match printable {
                    Some(chars) => {
                        self.chars.extend(chars);
                        BufferEdit::Inserted
                    }
                    None => BufferEdit::Ignored,
                }
            }
        }
    }

    /// Number of captured characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The captured text.
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Discard all captured characters.
    pub fn clear(&mut self) {
        self.chars.clear();
    }
}
