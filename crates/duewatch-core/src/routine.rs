//! Routines and batch assessment.
//!
//! A routine ties a trigger to an asset and its last execution. Assessing a
//! batch evaluates every routine against its asset's snapshot and orders the
//! results most urgent first.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::evaluator::EvaluationResult;
use crate::execution::ExecutionRecord;
use crate::severity::{Severity, SeverityThresholds};
use crate::snapshot::RuntimeSnapshot;
use crate::trigger::MaintenanceTrigger;

/// A recurring maintenance task attached to an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub name: String,
    /// Asset identifier, used to look up the usage snapshot
    pub asset: String,
    pub trigger: MaintenanceTrigger,
    #[serde(default)]
    pub last_execution: ExecutionRecord,
}

/// Evaluation of one routine plus its severity tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineAssessment {
    pub routine_id: String,
    pub name: String,
    pub asset: String,
    pub result: EvaluationResult,
    pub severity: Severity,
}

/// A routine whose input could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentFailure {
    pub routine_id: String,
    pub name: String,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessments: Vec<RoutineAssessment>,
    pub failures: Vec<AssessmentFailure>,
}

impl AssessmentReport {
    pub fn overdue_count(&self) -> usize {
        self.assessments.iter().filter(|a| a.result.overdue).count()
    }
}

/// Evaluate a single routine against the given snapshot.
///
/// # Errors
///
/// Propagates the evaluator's [`ValidationError`].
pub fn assess(
    routine: &Routine,
    snapshot: &RuntimeSnapshot,
    now: DateTime<Utc>,
    thresholds: &SeverityThresholds,
) -> Result<RoutineAssessment, ValidationError> {
    let result = routine
        .trigger
        .evaluate(&routine.last_execution, snapshot, now)?;
    let severity = thresholds.classify(result.progress_percent);
    Ok(RoutineAssessment {
        routine_id: routine.id.clone(),
        name: routine.name.clone(),
        asset: routine.asset.clone(),
        result,
        severity,
    })
}

/// Assess every routine, looking up each asset's snapshot with `snapshot_for`.
///
/// Assets without a snapshot are evaluated against [`RuntimeSnapshot::unknown`].
/// A routine with invalid input is reported in `failures` and does not stop
/// the batch.
pub fn assess_all<'s, F>(
    routines: &[Routine],
    snapshot_for: F,
    now: DateTime<Utc>,
    thresholds: &SeverityThresholds,
) -> AssessmentReport
where
    F: Fn(&str) -> Option<&'s RuntimeSnapshot>,
{
    let unknown = RuntimeSnapshot::unknown();
    let mut report = AssessmentReport::default();

    for routine in routines {
        let snapshot = match snapshot_for(&routine.asset) {
            Some(snapshot) => snapshot,
            None => &unknown,
        };
        match assess(routine, snapshot, now, thresholds) {
            Ok(assessment) => report.assessments.push(assessment),
            Err(err) => {
                warn!(routine = %routine.id, field = err.field(), error = %err, "routine skipped");
                report.failures.push(AssessmentFailure {
                    routine_id: routine.id.clone(),
                    name: routine.name.clone(),
                    field: err.field().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    report.assessments.sort_by(by_urgency);
    debug!(
        assessed = report.assessments.len(),
        failed = report.failures.len(),
        overdue = report.overdue_count(),
        "batch assessed"
    );
    report
}

/// Overdue first, then highest progress, then name.
fn by_urgency(a: &RoutineAssessment, b: &RoutineAssessment) -> Ordering {
    b.result
        .overdue
        .cmp(&a.result.overdue)
        .then_with(|| b.result.progress_percent.cmp(&a.result.progress_percent))
        .then_with(|| a.name.cmp(&b.name))
}

/// File shape for a set of routines and their assets' snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePlan {
    #[serde(default)]
    pub routines: Vec<Routine>,
    /// Keyed by asset identifier
    #[serde(default)]
    pub snapshots: BTreeMap<String, RuntimeSnapshot>,
}

impl MaintenancePlan {
    pub fn assess(&self, now: DateTime<Utc>, thresholds: &SeverityThresholds) -> AssessmentReport {
        assess_all(
            &self.routines,
            |asset| self.snapshots.get(asset),
            now,
            thresholds,
        )
    }
}
