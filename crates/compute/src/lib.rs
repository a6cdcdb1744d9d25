pub mod algorithms;
pub mod scheduler;

pub use algorithms::factorial::Factorial;
pub use scheduler::{
    Computation, ComputationError, Observer, ObserverClosed, ObserverHub, ObserverId, Scheduler,
    SchedulerConfig, SchedulerError, ServerMessage, TaskResult, WorkerId, WorkerReply, WorkerState,
    WorkerStatus,
};
