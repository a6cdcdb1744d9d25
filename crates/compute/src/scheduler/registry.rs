use std::time::Duration;

use super::error::SchedulerError;
use super::types::{WorkerId, WorkerState, WorkerStatus};

/// Proof that a worker was marked busy for one specific task.
///
/// Only [`WorkerRegistry::mark_busy`] creates leases and
/// [`WorkerRegistry::mark_idle`] consumes them, so each busy transition is
/// paired with exactly one idle transition.
#[derive(Debug)]
#[must_use = "a lease must be returned through WorkerRegistry::mark_idle"]
pub struct WorkerLease {
    worker_id: WorkerId,
    input: i64,
}

impl WorkerLease {
    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    pub fn input(&self) -> i64 {
        self.input
    }
}

/// Status records for a fixed-size worker pool, indexed by worker id.
///
/// Callers serialize access (the scheduler keeps it behind one mutex), so
/// every method sees and leaves a consistent set of records.
#[derive(Debug, Clone)]
pub struct WorkerRegistry {
    workers: Vec<WorkerStatus>,
}

impl WorkerRegistry {
    /// Create `pool_size` idle records with zeroed counters.
    pub fn new(pool_size: usize) -> Self {
        Self {
            workers: (0..pool_size).map(WorkerStatus::idle).collect(),
        }
    }

    /// First idle worker in pool-index order.
    pub fn find_idle(&self) -> Option<WorkerId> {
        self.workers.iter().position(WorkerStatus::is_idle)
    }

    /// Mark `worker_id` busy with `input`. Unconditional.
    pub fn mark_busy(&mut self, worker_id: WorkerId, input: i64) -> Result<WorkerLease, SchedulerError> {
        let record = self
            .workers
            .get_mut(worker_id)
            .ok_or(SchedulerError::UnknownWorker(worker_id))?;
        record.status = WorkerState::Busy;
        record.current_task = Some(input);
        Ok(WorkerLease { worker_id, input })
    }

    /// Return the leased worker to idle. Counters move only on success.
    pub fn mark_idle(&mut self, lease: WorkerLease, elapsed: Duration, success: bool) {
        // Leases only come from mark_busy on this registry, so the id is in range.
        if let Some(record) = self.workers.get_mut(lease.worker_id) {
            record.status = WorkerState::Idle;
            record.current_task = None;
            if success {
                record.completed_tasks += 1;
                record.total_processing_time += elapsed;
            }
        }
    }

    /// Take the leased worker out of rotation for good. Its thread is gone,
    /// so the slot stays busy and `find_idle` never returns it again.
    pub fn retire(&mut self, lease: WorkerLease) {
        if let Some(record) = self.workers.get_mut(lease.worker_id) {
            record.status = WorkerState::Busy;
            record.current_task = None;
        }
    }

    /// Point-in-time copy of all records, ordered by worker id.
    pub fn snapshot(&self) -> Vec<WorkerStatus> {
        self.workers.clone()
    }

    pub fn status(&self, worker_id: WorkerId) -> Option<&WorkerStatus> {
        self.workers.get(worker_id)
    }

    pub fn busy_count(&self) -> usize {
        self.workers.iter().filter(|w| !w.is_idle()).count()
    }
}
