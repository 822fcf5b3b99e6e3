use crate::collaborators::ConnectionSink;

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{error, info};
use uuid::Uuid;

/// Opaque reference to one live client connection.
#[derive(Clone)]
pub struct ConnectionHandle {
    id: Uuid,
    sink: Arc<dyn ConnectionSink>,
}

impl ConnectionHandle {
    /// Wrap a sink under a fresh connection id.
    pub fn new(sink: Arc<dyn ConnectionSink>) -> Self {
        Self::with_id(Uuid::new_v4(), sink)
    }

    /// Wrap a sink under an id chosen by the transport.
    pub fn with_id(id: Uuid, sink: Arc<dyn ConnectionSink>) -> Self {
        Self { id, sink }
    }

    /// Connection id used for registration and logging.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn sink(&self) -> &Arc<dyn ConnectionSink> {
        &self.sink
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Live connections, shared between the transport and the broadcaster.
///
/// Cloning shares the underlying set.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<Uuid, ConnectionHandle>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection.
    pub fn register(&self, handle: ConnectionHandle) {
        let id = handle.id();
        let count = {
            let mut connections = self.lock();
            connections.insert(id, handle);
            connections.len()
        };
        info!(connection_id = %id, connections = count, "Connection registered");
    }

    /// Remove a connection. Returns `false` if it was not registered.
    pub fn unregister(&self, id: Uuid) -> bool {
        let (removed, count) = {
            let mut connections = self.lock();
            let removed = connections.remove(&id).is_some();
            (removed, connections.len())
        };
        if removed {
            info!(connection_id = %id, connections = count, "Connection unregistered");
        }
        removed
    }

    /// Number of live connections.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Copy of the current handles; the lock is not held while sending.
    pub fn handles(&self) -> Vec<ConnectionHandle> {
        self.lock().values().cloned().collect()
    }

    // Recover from lock poison: the map is still consistent, and the listener
    // thread must keep working.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, ConnectionHandle>> {
        self.connections.lock().unwrap_or_else(|e| {
            error!("Connection registry lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}
