//! Lifecycle event payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStartEvent {
    pub start_time: u64,
}

impl OperationStartEvent {
    pub fn new(start_time: u64) -> Self {
        Self { start_time }
    }

    pub fn now() -> Self {
        Self::new(now_millis())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationProgressEvent {
    pub time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl OperationProgressEvent {
    pub fn new(time: u64, details: Option<Value>) -> Self {
        Self { time, details }
    }

    pub fn now(details: Option<Value>) -> Self {
        Self::new(now_millis(), details)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationFinishEvent {
    pub start_time: u64,
    pub end_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl OperationFinishEvent {
    pub fn succeeded(start_time: u64, end_time: u64, result: Option<Value>) -> Self {
        Self {
            start_time,
            end_time,
            failure: None,
            result,
        }
    }

    pub fn failed(start_time: u64, end_time: u64, failure: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            failure: Some(failure.into()),
            result: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Wall-clock duration; zero when the clock went backwards.
    pub fn duration_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
