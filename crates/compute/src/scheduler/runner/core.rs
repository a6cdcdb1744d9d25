use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::scheduler::error::SchedulerError;
use crate::scheduler::hub::{Observer, ObserverHub, ObserverId};
use crate::scheduler::message::ServerMessage;
use crate::scheduler::registry::WorkerRegistry;
use crate::scheduler::task::Computation;
use crate::scheduler::types::{SchedulerConfig, WorkerStatus};
use crate::scheduler::worker::WorkerHandle;

/// The pool scheduler. Owns the worker handles, their status registry and
/// the observer hub for the lifetime of the process.
pub struct Scheduler {
    /// Status records. Held across every check-then-mark and the broadcast
    /// that follows it.
    pub(super) registry: Arc<Mutex<WorkerRegistry>>,
    /// One handle per registry slot, same index.
    pub(super) workers: Vec<WorkerHandle>,
    /// Attached observers.
    pub(super) hub: Arc<ObserverHub>,
}

impl Scheduler {
    /// Spawn `config.pool_size` workers running `computation`.
    pub fn new(config: SchedulerConfig, computation: Arc<dyn Computation>) -> Result<Self, SchedulerError> {
        if config.pool_size == 0 {
            return Err(SchedulerError::EmptyPool);
        }

        let workers = (0..config.pool_size)
            .map(|id| WorkerHandle::spawn(id, Arc::clone(&computation)))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Scheduler started with {} workers (computation: {})",
            workers.len(),
            computation.name()
        );

        Ok(Self {
            registry: Arc::new(Mutex::new(WorkerRegistry::new(config.pool_size))),
            workers,
            hub: Arc::new(ObserverHub::new()),
        })
    }

    pub fn pool_size(&self) -> usize {
        self.workers.len()
    }

    /// Consistent copy of every worker's status, ordered by worker id.
    pub async fn snapshot(&self) -> Vec<WorkerStatus> {
        self.registry.lock().await.snapshot()
    }

    /// The message observers would receive right now.
    pub async fn status_message(&self) -> ServerMessage {
        ServerMessage::system_status(self.snapshot().await)
    }

    /// Attach an observer; it (and everyone else) immediately gets a fresh
    /// snapshot.
    pub async fn attach_observer(&self, observer: Box<dyn Observer>) -> ObserverId {
        let registry = self.registry.lock().await;
        self.hub
            .attach(observer, &ServerMessage::system_status(registry.snapshot()))
    }

    /// Detach an observer. Idempotent.
    pub fn detach_observer(&self, id: ObserverId) -> bool {
        self.hub.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.hub.len()
    }
}
