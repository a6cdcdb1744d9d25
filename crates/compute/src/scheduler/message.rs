use chrono::Utc;
use serde::Serialize;

use super::types::WorkerStatus;

/// Messages pushed to observers, serialized as `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "SYSTEM_STATUS")]
    SystemStatus(SystemStatus),
}

/// Pool snapshot carried by [`ServerMessage::SystemStatus`].
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub workers: Vec<WorkerStatus>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ServerMessage {
    /// Wrap a registry snapshot, stamped with the current time.
    pub fn system_status(workers: Vec<WorkerStatus>) -> Self {
        ServerMessage::SystemStatus(SystemStatus {
            workers,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_status_envelope() {
        let msg = ServerMessage::system_status(vec![WorkerStatus::idle(0), WorkerStatus::idle(1)]);
        let json: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "SYSTEM_STATUS");
        let workers = json["data"]["workers"].as_array().unwrap();
        assert_eq!(workers.len(), 2);
        assert_eq!(workers[1]["workerId"], 1);
        assert_eq!(workers[1]["status"], "idle");
        assert!(json["data"]["timestamp"].as_i64().unwrap() > 0);
    }
}
