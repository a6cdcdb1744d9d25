//! Worker handles: one long-lived OS thread per pool slot.
//!
//! Each dispatch carries its own one-shot reply channel, so a reply can only
//! ever reach the caller that dispatched it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::error::SchedulerError;
use super::registry::WorkerLease;
use super::task::Computation;
use super::types::{WorkerId, WorkerReply};

/// One input plus the channel its reply goes back on.
struct Job {
    input: i64,
    reply: oneshot::Sender<WorkerReply>,
}

/// Handle to a worker thread.
///
/// Dropping the handle closes the job channel; the thread exits once any
/// in-flight computation finishes.
pub struct WorkerHandle {
    id: WorkerId,
    jobs: mpsc::UnboundedSender<Job>,
}

impl WorkerHandle {
    /// Spawn the worker thread for pool slot `id`.
    pub fn spawn(id: WorkerId, computation: Arc<dyn Computation>) -> Result<Self, SchedulerError> {
        let (jobs, mut rx) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name(format!("offload-worker-{}", id))
            .spawn(move || {
                info!(worker_id = id, computation = computation.name(), "Worker {} initialized", id);
                while let Some(job) = rx.blocking_recv() {
                    let outcome =
                        panic::catch_unwind(AssertUnwindSafe(|| computation.compute(job.input)));
                    let reply = match outcome {
                        Ok(Ok(value)) => WorkerReply::Value(value),
                        Ok(Err(e)) => WorkerReply::Failure { error: e.to_string() },
                        Err(payload) => {
                            let error = panic_message(payload.as_ref());
                            warn!(worker_id = id, "Computation panicked on input {}: {}", job.input, error);
                            WorkerReply::Failure { error }
                        }
                    };
                    if job.reply.send(reply).is_err() {
                        debug!(worker_id = id, "Reply for input {} dropped, caller is gone", job.input);
                    }
                }
                debug!(worker_id = id, "Worker {} stopped", id);
            })?;

        Ok(Self { id, jobs })
    }

    /// Hand the leased input to this worker.
    ///
    /// The receiver yields exactly one reply. If the worker thread is gone
    /// the job is dropped and the receiver resolves to an error instead.
    pub(crate) fn dispatch(&self, lease: &WorkerLease) -> oneshot::Receiver<WorkerReply> {
        debug_assert_eq!(lease.worker_id(), self.id, "lease dispatched to the wrong worker");
        let (reply, rx) = oneshot::channel();
        let job = Job {
            input: lease.input(),
            reply,
        };
        if self.jobs.send(job).is_err() {
            debug!(worker_id = self.id, "Worker {} channel closed", self.id);
        }
        rx
    }
}

/// Text of a caught panic, prefixed so callers can tell it from a computation error.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("computation panicked: {}", detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::factorial::Factorial;
    use crate::scheduler::registry::WorkerRegistry;

    #[tokio::test]
    async fn worker_replies_once_per_dispatch() {
        let handle = WorkerHandle::spawn(0, Arc::new(Factorial::default())).unwrap();
        let mut registry = WorkerRegistry::new(1);

        let lease = registry.mark_busy(0, 5).unwrap();
        let reply = handle.dispatch(&lease).await.unwrap();
        assert_eq!(reply, WorkerReply::Value("120".into()));
        registry.mark_idle(lease, std::time::Duration::ZERO, true);

        let lease = registry.mark_busy(0, -1).unwrap();
        let reply = handle.dispatch(&lease).await.unwrap();
        assert_eq!(
            reply,
            WorkerReply::Failure { error: "Factorial not defined for negative numbers".into() }
        );
        registry.mark_idle(lease, std::time::Duration::ZERO, false);
    }

    struct PanicsOnZero;

    impl Computation for PanicsOnZero {
        fn name(&self) -> &str { "panics-on-zero" }

        fn compute(&self, input: i64) -> Result<String, crate::scheduler::task::ComputationError> {
            if input == 0 {
                panic!("zero is not allowed");
            }
            Ok(input.to_string())
        }
    }

    #[tokio::test]
    async fn panic_becomes_failure_and_thread_survives() {
        let handle = WorkerHandle::spawn(0, Arc::new(PanicsOnZero)).unwrap();
        let mut registry = WorkerRegistry::new(1);

        let lease = registry.mark_busy(0, 0).unwrap();
        let reply = handle.dispatch(&lease).await.unwrap();
        assert_eq!(
            reply,
            WorkerReply::Failure { error: "computation panicked: zero is not allowed".into() }
        );
        registry.mark_idle(lease, std::time::Duration::ZERO, false);

        let lease = registry.mark_busy(0, 7).unwrap();
        assert_eq!(handle.dispatch(&lease).await.unwrap(), WorkerReply::Value("7".into()));
        registry.mark_idle(lease, std::time::Duration::ZERO, true);
    }
}
