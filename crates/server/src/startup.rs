//! Server startup: shared state initialization.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use offload_compute::Scheduler;

use crate::app_config;
use crate::state::AppState;

/// Validate config, spawn the worker pool, and build `AppState`.
pub fn build_app_state(config: offload_core::Config) -> anyhow::Result<Arc<AppState>> {
    config.validate()?;

    let computation = app_config::build_computation(&config);
    let scheduler = Scheduler::new(app_config::scheduler_config(&config), Arc::new(computation))?;
    info!("Worker pool ready: {} workers", scheduler.pool_size());

    Ok(Arc::new(AppState {
        config,
        scheduler: Arc::new(scheduler),
        started_at: Instant::now(),
    }))
}
