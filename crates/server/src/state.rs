use std::sync::Arc;
use std::time::Instant;

use offload_compute::Scheduler;

/// Shared state handed to every route.
pub struct AppState {
    pub config: offload_core::Config,
    pub scheduler: Arc<Scheduler>,
    pub started_at: Instant,
}
