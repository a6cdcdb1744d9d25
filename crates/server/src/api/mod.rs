//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area.
//! Shared error types live here in mod.rs.

mod calculate;
mod health;
mod monitor;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

pub const USAGE: &str = "/calculate?number=<value> or /monitor";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<&'static str>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// 400 with a usage hint.
pub(crate) fn bad_request(error: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            usage: Some(USAGE),
        }),
    )
}

/// 500 carrying the failure message.
pub(crate) fn internal_error(error: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.into(),
            usage: None,
        }),
    )
}

/// Fallback for unknown paths.
pub async fn invalid_endpoint() -> ApiError {
    bad_request("Invalid endpoint")
}

// ── Re-exports ───────────────────────────────────────────────────

pub use calculate::calculate;
pub use health::{health, status};
pub use monitor::monitor;
