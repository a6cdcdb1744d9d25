//! HTTP router construction.
//!
//! Assembles the Axum routes and CORS layer into a single `Router`.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::state::AppState;
use crate::{api, live};

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/calculate", get(api::calculate))
        .route("/monitor", get(api::monitor))
        .route("/ws", get(live::ws_upgrade))
        .route("/health", get(api::health))
        .route("/status", get(api::status))
        .fallback(api::invalid_endpoint)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Err(_) => {
            warn!("Invalid CORS_ORIGIN '{}', allowing any origin", origin);
            CorsLayer::permissive()
        }
    }
}
