use crate::{CoreResult, broadcast::ConnectionRegistry, context::ClientEvent};

use std::sync::Arc;

use tracing::{debug, instrument, warn};

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the event was offered to.
    pub attempted: usize,
    /// Connections that accepted the event.
    pub delivered: usize,
}

impl BroadcastReport {
    /// Connections whose send failed.
    pub fn failed(&self) -> usize {
        self.attempted - self.delivered
    }
}

/// Fans events out to every registered connection.
///
/// Each connection sink queues the payload for its own writer, so a slow or
/// dead client never holds up the caller or the other clients. Failed sends
/// are logged and the connection stays registered; the transport notices the
/// disconnect and unregisters it.
#[derive(Clone)]
pub struct Broadcaster {
    registry: ConnectionRegistry,
}

impl Broadcaster {
    /// Create a broadcaster over `registry`.
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// The registry this broadcaster sends to.
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Serialize `event` once and offer it to every connection.
    ///
    /// # Errors
    ///
    /// Only serialization errors are returned; per-connection failures are
    /// reflected in the report.
    #[instrument(skip(self, event))]
    pub fn broadcast(&self, event: &ClientEvent) -> CoreResult<BroadcastReport> {
        let handles = self.registry.handles();
        if handles.is_empty() {
            debug!("No connected clients, event dropped");
            return Ok(BroadcastReport::default());
        }

        let payload: Arc<str> = serde_json::to_string(event)?.into();

        let mut report = BroadcastReport {
            attempted: handles.len(),
            delivered: 0,
        };

        for handle in &handles {
            match handle.sink().send(Arc::clone(&payload)) {
                Ok(()) => report.delivered += 1,
                Err(e) => warn!(connection_id = %handle.id(), error = ?e, "Send to connection failed"),
            }
        }

        debug!(
            attempted = report.attempted,
            delivered = report.delivered,
            "Event broadcast"
        );

        Ok(report)
    }
}
