use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

/// Index of a worker in the pool, in `[0, pool_size)`.
pub type WorkerId = usize;

/// Availability of a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    Idle,
    Busy,
}

/// Per-worker status record, as broadcast to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatus {
    pub worker_id: WorkerId,
    pub status: WorkerState,
    /// Input of the in-flight task while busy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task: Option<i64>,
    /// Successful completions only.
    pub completed_tasks: u64,
    /// Sum of successful task durations, serialized in milliseconds.
    #[serde(serialize_with = "serialize_millis")]
    pub total_processing_time: Duration,
}

impl WorkerStatus {
    pub fn idle(worker_id: WorkerId) -> Self {
        Self {
            worker_id,
            status: WorkerState::Idle,
            current_task: None,
            completed_tasks: 0,
            total_processing_time: Duration::ZERO,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == WorkerState::Idle
    }
}

/// Successful outcome of a submitted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub input: i64,
    pub result: String,
    pub time_ms: u64,
    pub worker_id: WorkerId,
}

/// The single terminal message a worker emits per dispatched input.
///
/// On the wire this is either the bare stringified value or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerReply {
    Failure { error: String },
    Value(String),
}

impl WorkerReply {
    /// Reply synthesized when the worker thread went away without answering.
    pub fn exited() -> Self {
        WorkerReply::Failure {
            error: "worker exited before replying".into(),
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, WorkerReply::Value(_))
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            WorkerReply::Value(v) => Ok(v),
            WorkerReply::Failure { error } => Err(error),
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of worker threads in the pool. Must be non-zero.
    pub pool_size: usize,
}

impl SchedulerConfig {
    pub fn with_pool_size(pool_size: usize) -> Self {
        Self { pool_size }
    }
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_status_wire_shape() {
        let mut status = WorkerStatus::idle(2);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "workerId": 2,
                "status": "idle",
                "completedTasks": 0,
                "totalProcessingTime": 0,
            })
        );

        status.status = WorkerState::Busy;
        status.current_task = Some(42);
        status.completed_tasks = 3;
        status.total_processing_time = Duration::from_micros(1_500_700);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "busy");
        assert_eq!(json["currentTask"], 42);
        assert_eq!(json["totalProcessingTime"], 1500);
    }

    #[test]
    fn task_result_uses_camel_case() {
        let result = TaskResult {
            input: 5,
            result: "120".into(),
            time_ms: 3,
            worker_id: 1,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "input": 5, "result": "120", "timeMs": 3, "workerId": 1 })
        );
    }

    #[test]
    fn worker_reply_parses_both_forms() {
        let ok: WorkerReply = serde_json::from_str("\"120\"").unwrap();
        assert_eq!(ok, WorkerReply::Value("120".into()));

        let err: WorkerReply =
            serde_json::from_str(r#"{"error":"Factorial not defined for negative numbers"}"#).unwrap();
        assert!(!err.is_value());
        assert_eq!(
            err.into_result(),
            Err("Factorial not defined for negative numbers".to_string())
        );
    }
}
