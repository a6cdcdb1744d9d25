/// Error returned by a [`Computation`] for a single input.
#[derive(Debug, thiserror::Error)]
pub enum ComputationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Input {input} exceeds maximum of {max}")]
    TooLarge { input: i64, max: i64 },
}

/// The unit of CPU-bound work a worker performs for each dispatched input.
///
/// Implementations run on the worker's own OS thread and may block for as
/// long as the work takes.
pub trait Computation: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Compute the stringified result for `input`.
    fn compute(&self, input: i64) -> Result<String, ComputationError>;
}
