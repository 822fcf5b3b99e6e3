mod builder;
mod selection;
mod snapshot;

pub use {
    builder::{ContextSnapshotBuilder, EDITABLE_ROLES, FocusProbe, TERMINAL_APPS, is_text_field},
    selection::{ClipboardSelectionReader, DEFAULT_COPY_SETTLE, Selection, SelectionReader},
    snapshot::{ClientEvent, ContextSnapshot, Position},
};
