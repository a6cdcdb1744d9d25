//! Fixed-size worker pool with immediate idle-worker assignment.
//!
//! The [`Scheduler`] hands each submitted input to the first idle
//! [`WorkerHandle`], tracks per-worker status in a [`WorkerRegistry`], and
//! pushes a status snapshot to every attached observer through the
//! [`ObserverHub`] whenever a worker changes state. When no worker is idle a
//! submission fails straight away; there is no queue.

pub mod error;
pub mod hub;
pub mod message;
pub mod registry;
pub mod runner;
pub mod task;
pub mod types;
pub mod worker;

pub use error::SchedulerError;
pub use hub::{Observer, ObserverClosed, ObserverHub, ObserverId};
pub use message::{ServerMessage, SystemStatus};
pub use registry::{WorkerLease, WorkerRegistry};
pub use runner::Scheduler;
pub use task::{Computation, ComputationError};
pub use types::{SchedulerConfig, TaskResult, WorkerId, WorkerReply, WorkerState, WorkerStatus};
pub use worker::WorkerHandle;
