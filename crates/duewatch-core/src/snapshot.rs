//! Usage-counter snapshots and the measurement log that produces them.
//!
//! The evaluator only ever sees a [`RuntimeSnapshot`]. [`MeasurementLog`]
//! is an in-memory provider that enforces the counter's monotonicity before
//! a value is handed out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ValidationError;

/// A manual reading of the asset's runtime counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub hours: f64,
    pub measured_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
}

impl Measurement {
    pub fn new(hours: f64, measured_at: DateTime<Utc>) -> Self {
        Self {
            hours,
            measured_at,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: impl Into<String>) -> Self {
        self.reporter = Some(reporter.into());
        self
    }
}

/// Current state of an asset's usage counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_measurement: Option<Measurement>,
}

impl RuntimeSnapshot {
    pub fn at_hours(hours: f64) -> Self {
        Self {
            current_hours: Some(hours),
            last_measurement: None,
        }
    }

    /// No reading is available for the asset.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Per-asset log of accepted measurements.
///
/// `current_hours` is always the maximum accepted value; a reading below it
/// is rejected. Deserialized logs are checked the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMeasurementLog")]
pub struct MeasurementLog {
    current_hours: f64,
    #[serde(default)]
    measurements: Vec<Measurement>,
}

/// Unchecked file shape of a [`MeasurementLog`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMeasurementLog {
    current_hours: f64,
    #[serde(default)]
    measurements: Vec<Measurement>,
}

impl TryFrom<StoredMeasurementLog> for MeasurementLog {
    type Error = ValidationError;

    fn try_from(stored: StoredMeasurementLog) -> Result<Self, Self::Error> {
        check_hours(stored.current_hours)?;

        let mut previous: Option<f64> = None;
        for measurement in &stored.measurements {
            check_hours(measurement.hours)?;
            if let Some(prev) = previous {
                if measurement.hours < prev {
                    return Err(ValidationError::RegressiveMeasurement {
                        current: prev,
                        reported: measurement.hours,
                    });
                }
            }
            previous = Some(measurement.hours);
        }

        if let Some(last) = previous {
            if stored.current_hours != last {
                return Err(ValidationError::InvalidValue {
                    field: "currentHours".to_string(),
                    message: format!(
                        "{}h does not match the latest measurement ({last}h)",
                        stored.current_hours
                    ),
                });
            }
        }

        Ok(Self {
            current_hours: stored.current_hours,
            measurements: stored.measurements,
        })
    }
}

impl MeasurementLog {
    /// Start a log from the counter value the asset was commissioned with.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `initial_hours` is negative or not finite.
    pub fn new(initial_hours: f64) -> Result<Self, ValidationError> {
        check_hours(initial_hours)?;
        Ok(Self {
            current_hours: initial_hours,
            measurements: Vec::new(),
        })
    }

    pub fn current_hours(&self) -> f64 {
        self.current_hours
    }

    /// Accepted measurements, oldest first.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Accept a new reading and return the updated snapshot.
    ///
    /// Equal readings are accepted; a reading below the current value is
    /// rejected and the log is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RegressiveMeasurement`] for a reading below
    /// the current counter, or a field error for negative/non-finite hours.
    pub fn record(&mut self, measurement: Measurement) -> Result<RuntimeSnapshot, ValidationError> {
        check_hours(measurement.hours)?;
        if measurement.hours < self.current_hours {
            warn!(
                current = self.current_hours,
                reported = measurement.hours,
                "rejected regressive measurement"
            );
            return Err(ValidationError::RegressiveMeasurement {
                current: self.current_hours,
                reported: measurement.hours,
            });
        }

        debug!(hours = measurement.hours, reporter = ?measurement.reporter, "measurement accepted");
        self.current_hours = measurement.hours;
        self.measurements.push(measurement);
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            current_hours: Some(self.current_hours),
            last_measurement: self.measurements.last().cloned(),
        }
    }
}

fn check_hours(hours: f64) -> Result<(), ValidationError> {
    if !hours.is_finite() {
        return Err(ValidationError::NonFinite { field: "hours" });
    }
    if hours < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "hours".to_string(),
            message: format!("must not be negative (got {hours})"),
        });
    }
    Ok(())
}
