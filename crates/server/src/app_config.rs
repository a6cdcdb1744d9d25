//! Application configuration builders.
//!
//! Constructs the scheduler and its computation from `Config`.

use offload_compute::{Factorial, SchedulerConfig};

/// Load configuration from `.env` and environment variables.
pub fn load_config() -> offload_core::Config {
    offload_core::config::load_dotenv();
    offload_core::Config::from_env()
}

/// Scheduler settings derived from the pool section.
pub fn scheduler_config(config: &offload_core::Config) -> SchedulerConfig {
    SchedulerConfig::with_pool_size(config.pool.resolved_workers())
}

/// The computation each worker runs.
pub fn build_computation(config: &offload_core::Config) -> Factorial {
    Factorial::new(config.compute.factorial_max_input)
}
