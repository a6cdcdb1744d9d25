//! Factorial offload endpoint.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use tracing::{error, info};

use offload_compute::TaskResult;

use crate::state::AppState;

use super::{bad_request, internal_error, ApiError};

/// Raw query pairs in request order. Repeated keys are kept, the first wins.
type QueryPairs = Vec<(String, String)>;

fn first_number(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "number")
        .map(|(_, value)| value.as_str())
}

/// Parse the `number` parameter. Missing or blank means 1.
fn parse_number(raw: Option<&str>) -> Result<i64, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(1),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| bad_request(format!("Invalid number: {}", s))),
    }
}

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<TaskResult>, ApiError> {
    let Query(pairs) = query.map_err(|e| bad_request(e.body_text()))?;
    let number = parse_number(first_number(&pairs))?;
    info!("Received calculation request for {}", number);

    match state.scheduler.submit(number).await {
        Ok(result) => {
            info!(
                worker_id = result.worker_id,
                time_ms = result.time_ms,
                "Calculation for {} complete",
                number
            );
            Ok(Json(result))
        }
        Err(e) => {
            error!("Calculation for {} failed: {}", number, e);
            Err(internal_error(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn missing_or_blank_number_defaults_to_one() {
        assert_eq!(parse_number(None).unwrap(), 1);
        assert_eq!(parse_number(Some("  ")).unwrap(), 1);
    }

    #[test]
    fn parses_signed_integers() {
        assert_eq!(parse_number(Some("20")).unwrap(), 20);
        assert_eq!(parse_number(Some(" -3 ")).unwrap(), -3);
    }

    #[test]
    fn first_number_wins() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("number".to_string(), "3".to_string()),
            ("number".to_string(), "5".to_string()),
        ];
        assert_eq!(first_number(&pairs), Some("3"));
        assert_eq!(first_number(&[]), None);
    }

    #[test]
    fn rejects_garbage() {
        let (status, body) = parse_number(Some("12abc")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid number: 12abc");
        assert!(body.usage.is_some());
    }
}
