//! Health and pool status endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use offload_compute::ServerMessage;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub workers: usize,
    pub busy_workers: usize,
    pub observers: usize,
    pub uptime_secs: u64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.scheduler.snapshot().await;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        workers: snapshot.len(),
        busy_workers: snapshot.iter().filter(|w| !w.is_idle()).count(),
        observers: state.scheduler.observer_count(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// The same `SYSTEM_STATUS` message WebSocket observers receive.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ServerMessage> {
    Json(state.scheduler.status_message().await)
}
