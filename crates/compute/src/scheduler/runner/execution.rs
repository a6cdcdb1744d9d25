use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::scheduler::error::SchedulerError;
use crate::scheduler::hub::ObserverHub;
use crate::scheduler::message::ServerMessage;
use crate::scheduler::registry::WorkerRegistry;
use crate::scheduler::types::{TaskResult, WorkerReply};

use super::Scheduler;

impl Scheduler {
    /// Run `input` on the first idle worker and wait for its reply.
    ///
    /// Fails immediately with [`SchedulerError::NoWorkersAvailable`] when
    /// every worker is busy; nothing is queued. There is no timeout: a
    /// worker that never replies keeps this call pending and stays busy.
    pub async fn submit(&self, input: i64) -> Result<TaskResult, SchedulerError> {
        let (lease, start) = {
            let mut registry = self.registry.lock().await;
            let worker_id = match registry.find_idle() {
                Some(id) => id,
                None => {
                    debug!("Rejected input {}: all {} workers busy", input, self.workers.len());
                    return Err(SchedulerError::NoWorkersAvailable);
                }
            };
            let lease = registry.mark_busy(worker_id, input)?;
            let start = Instant::now();
            broadcast_status(&registry, &self.hub);
            (lease, start)
        };

        let worker_id = lease.worker_id();
        debug!(worker_id, "Dispatching input {} to worker {}", input, worker_id);
        let reply_rx = self.workers[worker_id].dispatch(&lease);

        // Completion runs on its own task so the worker is released even if
        // the caller stops waiting.
        let registry = Arc::clone(&self.registry);
        let hub = Arc::clone(&self.hub);
        let completion = tokio::spawn(async move {
            let outcome = reply_rx.await;
            let elapsed = start.elapsed();

            let mut registry = registry.lock().await;
            let reply = match outcome {
                Ok(reply) => {
                    registry.mark_idle(lease, elapsed, reply.is_value());
                    reply
                }
                Err(_) => {
                    error!(worker_id, "Worker {} exited, removing it from the pool", worker_id);
                    registry.retire(lease);
                    WorkerReply::exited()
                }
            };
            broadcast_status(&registry, &hub);
            (reply, elapsed)
        });

        let (reply, elapsed) = completion
            .await
            .map_err(|e| SchedulerError::WorkerExecution(format!("completion task failed: {}", e)))?;

        match reply.into_result() {
            Ok(result) => {
                debug!(worker_id, "Input {} completed in {:?}", input, elapsed);
                Ok(TaskResult {
                    input,
                    result,
                    time_ms: elapsed.as_millis() as u64,
                    worker_id,
                })
            }
            Err(message) => {
                warn!(worker_id, "Input {} failed: {}", input, message);
                Err(SchedulerError::WorkerExecution(message))
            }
        }
    }
}

/// Broadcast the registry's current state. Callers hold the registry lock,
/// so observers receive snapshots in the order the state changed.
fn broadcast_status(registry: &WorkerRegistry, hub: &ObserverHub) {
    if hub.is_empty() {
        return;
    }
    hub.broadcast(&ServerMessage::system_status(registry.snapshot()));
}
