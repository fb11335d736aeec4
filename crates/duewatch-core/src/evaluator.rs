//! Trigger evaluation.
//!
//! Turns a trigger, the routine's last execution and the asset's usage
//! snapshot into a progress percentage, an overdue flag and a next-due
//! estimate. Evaluation is pure: the current instant is passed in, nothing
//! is cached, and identical inputs always give identical results.

use std::fmt::Write;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::execution::ExecutionRecord;
use crate::snapshot::RuntimeSnapshot;
use crate::trigger::{MaintenanceTrigger, Threshold, FIELD_THRESHOLD_DAYS};

pub const LABEL_NOT_CALCULATED: &str = "not calculated";
pub const LABEL_OVERDUE: &str = "overdue";

const SECONDS_PER_DAY: i64 = 86_400;

/// Outcome of evaluating one trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Rounded progress toward the threshold, clamped to 0..=100
    pub progress_percent: u8,
    pub overdue: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_label: Option<String>,
    /// Calendar triggers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<DateTime<Utc>>,
}

impl EvaluationResult {
    /// Result for a routine that cannot be evaluated yet.
    pub fn not_calculated() -> Self {
        Self {
            progress_percent: 0,
            overdue: false,
            next_due_label: Some(LABEL_NOT_CALCULATED.to_string()),
            next_due_date: None,
        }
    }

    pub fn is_calculated(&self) -> bool {
        self.next_due_label.as_deref() != Some(LABEL_NOT_CALCULATED)
    }

    /// Label for display, formatting `next_due_date` with `date_format`
    /// (a chrono format string) when the result carries no label.
    ///
    /// An unusable format string falls back to RFC 3339.
    pub fn display_label(&self, date_format: &str) -> String {
        match (&self.next_due_label, self.next_due_date) {
            (Some(label), _) => label.clone(),
            (None, Some(date)) => {
                let mut out = String::new();
                match write!(out, "{}", date.format(date_format)) {
                    Ok(()) => out,
                    Err(_) => date.to_rfc3339(),
                }
            }
            (None, None) => LABEL_NOT_CALCULATED.to_string(),
        }
    }
}

/// Evaluate a trigger against the last execution and current snapshot.
///
/// Missing execution data or a missing usage reading yields
/// [`EvaluationResult::not_calculated`].
///
/// # Errors
///
/// Returns a [`ValidationError`] if the trigger is structurally invalid, a
/// supplied numeric input is not finite, or the next due date falls outside
/// the representable date range.
pub fn evaluate(
    trigger: &MaintenanceTrigger,
    execution: &ExecutionRecord,
    snapshot: &RuntimeSnapshot,
    now: DateTime<Utc>,
) -> Result<EvaluationResult, ValidationError> {
    let threshold = trigger.validate()?;
    check_finite(execution.runtime_hours_at_completion, "runtimeHoursAtCompletion")?;
    check_finite(snapshot.current_hours, "currentHours")?;

    let result = match threshold {
        Threshold::Hours(hours) => evaluate_runtime(hours, execution, snapshot),
        Threshold::Days(days) => evaluate_calendar(days, execution, now)?,
    };

    debug!(
        kind = %trigger.kind,
        progress = result.progress_percent,
        overdue = result.overdue,
        calculated = result.is_calculated(),
        "trigger evaluated"
    );
    Ok(result)
}

/// Like [`evaluate`], but reports invalid input as "not calculated".
///
/// Intended for display of drafts whose trigger is still being edited.
pub fn evaluate_lenient(
    trigger: &MaintenanceTrigger,
    execution: &ExecutionRecord,
    snapshot: &RuntimeSnapshot,
    now: DateTime<Utc>,
) -> EvaluationResult {
    evaluate(trigger, execution, snapshot, now).unwrap_or_else(|err| {
        debug!(field = err.field(), error = %err, "invalid input treated as not calculated");
        EvaluationResult::not_calculated()
    })
}

fn evaluate_runtime(
    threshold_hours: f64,
    execution: &ExecutionRecord,
    snapshot: &RuntimeSnapshot,
) -> EvaluationResult {
    let (Some(at_completion), Some(current)) =
        (execution.runtime_hours_at_completion, snapshot.current_hours)
    else {
        return EvaluationResult::not_calculated();
    };

    let hours_since = current - at_completion;
    let progress_percent = progress(hours_since / threshold_hours);
    let hours_remaining = (threshold_hours - hours_since).max(0.0);
    let overdue = progress_percent >= 100;

    let label = if overdue {
        LABEL_OVERDUE.to_string()
    } else {
        format!("~{}h", hours_remaining.ceil() as u64)
    };

    EvaluationResult {
        progress_percent,
        overdue,
        next_due_label: Some(label),
        next_due_date: None,
    }
}

fn evaluate_calendar(
    threshold_days: u32,
    execution: &ExecutionRecord,
    now: DateTime<Utc>,
) -> Result<EvaluationResult, ValidationError> {
    let Some(completed_at) = execution.completed_at else {
        return Ok(EvaluationResult::not_calculated());
    };

    let next_due_date = completed_at
        .checked_add_signed(Duration::days(i64::from(threshold_days)))
        .ok_or_else(|| ValidationError::InvalidValue {
            field: FIELD_THRESHOLD_DAYS.to_string(),
            message: format!("due date is out of range ({threshold_days} days after {completed_at})"),
        })?;

    let days_since = whole_days_between(completed_at, now);
    let progress_percent = progress(days_since as f64 / f64::from(threshold_days));
    let overdue = progress_percent >= 100;

    Ok(EvaluationResult {
        progress_percent,
        overdue,
        next_due_label: overdue.then(|| LABEL_OVERDUE.to_string()),
        next_due_date: Some(next_due_date),
    })
}

/// Elapsed whole days, floored. Negative when `from` lies after `to`.
fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Round first, then clamp: 0.996 becomes 100.
fn progress(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

fn check_finite(value: Option<f64>, field: &'static str) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NonFinite { field }),
        _ => Ok(()),
    }
}

impl MaintenanceTrigger {
    /// Convenience for [`evaluate`].
    pub fn evaluate(
        &self,
        execution: &ExecutionRecord,
        snapshot: &RuntimeSnapshot,
        now: DateTime<Utc>,
    ) -> Result<EvaluationResult, ValidationError> {
        evaluate(self, execution, snapshot, now)
    }
}
