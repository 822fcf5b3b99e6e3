use crate::{
    collaborators::{FocusInspector, FocusedElement},
    context::{ContextSnapshot, Position, Selection, SelectionReader, snapshot::unix_seconds},
};

use std::{sync::Arc, time::SystemTime};

use tracing::{debug, instrument, warn};

/// Accessibility roles of controls that accept typed text.
pub const EDITABLE_ROLES: &[&str] = &["AXTextField", "AXTextArea", "AXSearchField", "AXComboBox"];

/// Terminal emulators. Their focused element rarely reports an editable role,
/// but keystrokes typed into them land in a prompt.
pub const TERMINAL_APPS: &[&str] = &[
    "Terminal",
    "iTerm2",
    "Warp",
    "Alacritty",
    "kitty",
    "Hyper",
    "WezTerm",
    "Ghostty",
];

/// Whether `element` accepts typed text.
pub fn is_text_field(element: &FocusedElement) -> bool {
    EDITABLE_ROLES.contains(&element.role.as_str())
        || TERMINAL_APPS
            .iter()
            .any(|app| app.eq_ignore_ascii_case(element.app_name.trim()))
}

/// The cheap part of a snapshot: pointer and focus, taken on the listener
/// thread before the inline-mode decision.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusProbe {
    /// Pointer position at trigger time.
    pub position: Position,
    /// Focused element, if the inspector could describe it.
    pub focused: Option<FocusedElement>,
    /// Classification of the focused element.
    pub is_text_field: bool,
    /// Trigger time.
    pub captured_at: SystemTime,
}

impl FocusProbe {
    /// Human-readable focused-element descriptor.
    pub fn descriptor(&self) -> String {
        match &self.focused {
            Some(FocusedElement { role, app_name }) if !role.is_empty() && !app_name.is_empty() => {
                format!("{role} in {app_name}")
            }
            Some(FocusedElement { role, app_name }) if !app_name.is_empty() || !role.is_empty() => {
                format!("{role}{app_name}")
            }
            _ => "unknown".to_string(),
        }
    }
}

/// Assembles [`ContextSnapshot`]s from collaborator queries.
pub struct ContextSnapshotBuilder {
    inspector: Arc<dyn FocusInspector>,
    selection: Arc<dyn SelectionReader>,
}

impl ContextSnapshotBuilder {
    /// Create a builder.
    pub fn new(inspector: Arc<dyn FocusInspector>, selection: Arc<dyn SelectionReader>) -> Self {
        Self {
            inspector,
            selection,
        }
    }

    /// Read focus and classify it. Inspector failures yield "not a text field".
    #[instrument(skip(self))]
    pub fn probe(&self, position: Position) -> FocusProbe {
        let focused = match self.inspector.inspect() {
            Ok(element) => Some(element),
            Err(e) => {
                warn!(error = ?e, "Focus inspection failed, assuming no text field");
                None
            }
        };

        let is_text_field = focused.as_ref().is_some_and(is_text_field);
        debug!(?focused, is_text_field, "Focus probed");

        FocusProbe {
            position,
            focused,
            is_text_field,
            captured_at: SystemTime::now(),
        }
    }

    /// Finish a snapshot.
    ///
    /// The selection is read only when `read_selection` is set; the copy chord
    /// would otherwise disturb text being typed during inline capture.
    #[instrument(skip(self, probe))]
    pub fn complete(&self, probe: FocusProbe, read_selection: bool) -> ContextSnapshot {
        let selection = if read_selection {
            self.selection.read_selection()
        } else {
            Selection::default()
        };

        ContextSnapshot {
            position: probe.position,
            selected_text: selection.text,
            has_selection: selection.has_selection,
            is_text_field: probe.is_text_field,
            focused_element: probe.descriptor(),
            timestamp: unix_seconds(probe.captured_at),
            has_screenshot: false,
        }
    }
}
