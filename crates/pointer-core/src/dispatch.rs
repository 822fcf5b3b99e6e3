//! Hand-off from the native listener thread to runtime workers.
//!
//! The listener thread must return to the OS immediately, so it never awaits
//! anything: it submits work and moves on. [`Dispatcher`] runs independent
//! jobs (one per playback run) with a bound on how many may be in flight;
//! [`SerialWorker`] runs jobs one at a time in submission order (context
//! broadcasts, whose per-connection order must follow trigger order).

use crate::{CoreError, CoreResult};

use std::{future::Future, panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tokio::{
    runtime::Handle,
    sync::{Semaphore, mpsc},
    task::JoinHandle,
};
use tracing::{debug, warn};

/// Default bound on concurrently running dispatched jobs.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Bounded dispatcher onto a tokio runtime.
///
/// Safe to call from threads that are not part of the runtime.
#[derive(Clone)]
pub struct Dispatcher {
    handle: Handle,
    permits: Arc<Semaphore>,
}

impl Dispatcher {
    /// Dispatch onto `handle`, allowing at most `max_in_flight` jobs at once.
    pub fn new(handle: Handle, max_in_flight: usize) -> Self {
        Self {
            handle,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Runtime handle used for spawning.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Spawn an async job without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Dispatch`] when the in-flight bound is reached;
    /// the job is dropped rather than queued.
    #[track_caller]
    pub fn spawn<F>(&self, label: &'static str, job: F) -> CoreResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|e| CoreError::Dispatch {
                reason: format!("{label}: no worker available ({e})"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(job = label, "Job dispatched");
        self.handle.spawn(async move {
            job.await;
            drop(permit);
        });

        Ok(())
    }
}

/// A single long-lived worker fed through a bounded queue.
///
/// Jobs run on the runtime's blocking pool, so the handler may sleep and call
/// synchronous platform APIs.
pub struct SerialWorker<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for SerialWorker<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send + 'static> SerialWorker<T> {
    /// Start a worker that calls `handler` for every submitted item.
    ///
    /// The worker stops once every `SerialWorker` clone has been dropped.
    pub fn start<H>(handle: &Handle, capacity: usize, mut handler: H) -> (Self, JoinHandle<()>)
    where
        H: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel(capacity.max(1));

        // Single persistent blocking task: blocking_recv() parks without
        // polling and returns None when all senders are gone.
        let join = handle.spawn_blocking(move || {
            while let Some(item) = rx.blocking_recv() {
                handler(item);
            }
            debug!("Serial worker stopped");
        });

        (Self { tx }, join)
    }

    /// Queue an item without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Dispatch`] when the queue is full or the worker
    /// has stopped.
    #[track_caller]
    pub fn submit(&self, item: T) -> CoreResult<()> {
        self.tx.try_send(item).map_err(|e| {
            warn!(error = %e, "Serial worker rejected job");
            CoreError::Dispatch {
                reason: format!("serial worker unavailable: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
