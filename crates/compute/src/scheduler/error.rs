use thiserror::Error;

use super::types::WorkerId;

/// Errors surfaced by [`Scheduler`](super::Scheduler) operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Every worker was busy at submission time. Never retried.
    #[error("No workers available")]
    NoWorkersAvailable,

    /// The selected worker reported a failure for this task.
    #[error("{0}")]
    WorkerExecution(String),

    #[error("Unknown worker: {0}")]
    UnknownWorker(WorkerId),

    #[error("Worker pool must have at least one worker")]
    EmptyPool,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
