use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

/// Core errors with source location tracking.
///
/// Collaborator adapters (clipboard, focus inspector, input device, remote
/// processor, connection transport) report failures through these variants;
/// the core catches them at the call site and degrades instead of propagating.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A hotkey specification could not be parsed or is incomplete.
    #[error("Invalid hotkey: {reason} {location}")]
    InvalidHotkey {
        /// Why the specification was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Synthetic keyboard input failed.
    #[error("Input device error: {reason} {location}")]
    InputDevice {
        /// Description of the input failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Clipboard read or write failed.
    #[error("Clipboard error: {reason} {location}")]
    Clipboard {
        /// Description of the clipboard failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The focused-element inspector could not describe the focused control.
    #[error("Focus inspection failed: {reason} {location}")]
    FocusInspection {
        /// Description of the inspection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sending an event to one connection failed.
    #[error("Send to connection {connection_id} failed: {reason} {location}")]
    Transport {
        /// Connection the send was addressed to.
        connection_id: Uuid,
        /// Description of the transport failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The remote processor call failed before producing a status.
    #[error("Remote call failed: {reason} {location}")]
    RemoteCall {
        /// Description of the remote failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Work could not be handed to a worker.
    #[error("Dispatch failed: {reason} {location}")]
    Dispatch {
        /// Description of the dispatch failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Event serialization failed.
    #[error("Serialization error: {source} {location}")]
    Serialization {
        /// The underlying serde_json error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        CoreError::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
