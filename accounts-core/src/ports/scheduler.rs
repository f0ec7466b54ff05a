//! Write scheduler port - deferred, fire-and-forget storage writes

use serde::{Deserialize, Serialize};

use super::gateway::AccountUpdate;

/// A deferred write, described by value so schedulers can hand it to a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WriteJob {
    /// Persist the scalar fields of one account
    Account { id: u32, update: AccountUpdate },
}

/// Asynchronous job runner port
///
/// `enqueue` is fire-and-forget: the core never awaits completion and never
/// observes scheduler-side failures. Retry policy, if any, belongs to the
/// implementation.
pub trait WriteScheduler: Send + Sync {
    fn enqueue(&self, job: WriteJob);
}
