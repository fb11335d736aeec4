//! # duewatch Core Library
//!
//! Tells maintenance planners how close each recurring routine on an asset
//! is to being due. The library is CLI-first: everything is available
//! through the standalone `duewatch-cli` binary, which is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Trigger Evaluator**: pure function from trigger, last execution,
//!   usage snapshot and the current instant to progress, overdue flag and
//!   next-due estimate
//! - **Severity Classifier**: normal / warning / critical tiers from progress
//! - **Measurement Log**: monotonic usage counter producing snapshots
//! - **Routines**: batch assessment ordered by urgency
//! - **Storage**: TOML configuration and JSON measurement files
//!
//! ## Key Components
//!
//! - [`evaluate`]: trigger evaluation
//! - [`classify`]: severity classification
//! - [`MeasurementLog`]: snapshot provider
//! - [`Config`]: application configuration management

pub mod error;
pub mod evaluator;
pub mod execution;
pub mod routine;
pub mod severity;
pub mod snapshot;
pub mod storage;
pub mod trigger;

pub use error::{ConfigError, CoreError, ValidationError};
pub use evaluator::{evaluate, evaluate_lenient, EvaluationResult, LABEL_NOT_CALCULATED, LABEL_OVERDUE};
pub use execution::ExecutionRecord;
pub use routine::{
    assess, assess_all, AssessmentFailure, AssessmentReport, MaintenancePlan, Routine,
    RoutineAssessment,
};
pub use severity::{classify, Severity, SeverityThresholds};
pub use snapshot::{Measurement, MeasurementLog, RuntimeSnapshot};
pub use storage::Config;
pub use trigger::{MaintenanceTrigger, Threshold, TriggerKind};
