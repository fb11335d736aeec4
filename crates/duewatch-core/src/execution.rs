//! The last completed run of a routine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last completed execution of a routine.
///
/// Both fields are optional: a routine that never ran has neither, and a
/// calendar-only routine usually carries no usage reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_hours_at_completion: Option<f64>,
}

impl ExecutionRecord {
    /// A routine that has never been executed.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn completed(at: DateTime<Utc>, runtime_hours: Option<f64>) -> Self {
        Self {
            completed_at: Some(at),
            runtime_hours_at_completion: runtime_hours,
        }
    }
}
