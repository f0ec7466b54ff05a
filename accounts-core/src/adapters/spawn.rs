//! Write scheduler adapters
//!
//! `SpawnScheduler` runs deferred write jobs on a tokio runtime handle,
//! fire-and-forget: failures are logged and never surfaced to the enqueueing
//! caller, and nothing is retried. `InlineScheduler` executes jobs on the
//! calling thread for deterministic tests.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::ports::{PersistenceGateway, WriteJob, WriteScheduler};

fn run_job(gateway: &dyn PersistenceGateway, job: WriteJob) {
    match job {
        WriteJob::Account { id, update } => match gateway.write_account(id, &update) {
            Ok(()) => debug!(id, "deferred account write completed"),
            Err(e) => warn!(id, error = %e, "deferred account write failed"),
        },
    }
}

/// Tokio-backed write scheduler
pub struct SpawnScheduler {
    gateway: Arc<dyn PersistenceGateway>,
    handle: Handle,
}

impl SpawnScheduler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, handle: Handle) -> Self {
        Self { gateway, handle }
    }

    /// Bind to the ambient runtime. Must be called from within a tokio
    /// runtime.
    pub fn from_current(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self::new(gateway, Handle::current())
    }
}

impl WriteScheduler for SpawnScheduler {
    fn enqueue(&self, job: WriteJob) {
        let gateway = Arc::clone(&self.gateway);
        self.handle.spawn_blocking(move || run_job(gateway.as_ref(), job));
    }
}

/// Executes jobs synchronously on `enqueue`; deterministic scheduler for
/// tests and single-threaded embedders
pub struct InlineScheduler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl InlineScheduler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

impl WriteScheduler for InlineScheduler {
    fn enqueue(&self, job: WriteJob) {
        run_job(self.gateway.as_ref(), job);
    }
}
