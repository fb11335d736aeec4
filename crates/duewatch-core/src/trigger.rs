//! Trigger definitions for maintenance routines.
//!
//! A trigger decides when a routine becomes due: either after a number of
//! runtime hours on the asset's usage counter, or after a number of calendar
//! days since the last completed execution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const FIELD_THRESHOLD_HOURS: &str = "thresholdHours";
pub const FIELD_THRESHOLD_DAYS: &str = "thresholdDays";

/// Which usage model drives the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Cumulative operating hours on the asset
    RuntimeHours,
    /// Wall-clock days since last execution
    CalendarDays,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::RuntimeHours => "runtime_hours",
            TriggerKind::CalendarDays => "calendar_days",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of when a routine becomes due.
///
/// Exactly one threshold field is populated, matching `kind`. The struct is
/// kept in its wire shape so that malformed input can be reported field by
/// field through [`MaintenanceTrigger::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTrigger {
    pub kind: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_days: Option<u32>,
}

/// A validated threshold, tagged by trigger kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Hours(f64),
    Days(u32),
}

impl MaintenanceTrigger {
    /// Usage-based trigger firing every `hours` runtime hours.
    pub fn runtime_hours(hours: f64) -> Self {
        Self {
            kind: TriggerKind::RuntimeHours,
            threshold_hours: Some(hours),
            threshold_days: None,
        }
    }

    /// Time-based trigger firing every `days` calendar days.
    pub fn calendar_days(days: u32) -> Self {
        Self {
            kind: TriggerKind::CalendarDays,
            threshold_hours: None,
            threshold_days: Some(days),
        }
    }

    /// Check the structural invariants and return the threshold in use.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field when the
    /// threshold for `kind` is missing, not finite, or not positive, or when
    /// the other kind's threshold field is populated.
    pub fn validate(&self) -> Result<Threshold, ValidationError> {
        match self.kind {
            TriggerKind::RuntimeHours => {
                if self.threshold_days.is_some() {
                    return Err(ValidationError::MismatchedThreshold {
                        kind: self.kind,
                        field: FIELD_THRESHOLD_DAYS,
                    });
                }
                let hours = self
                    .threshold_hours
                    .ok_or(ValidationError::MissingThreshold {
                        kind: self.kind,
                        field: FIELD_THRESHOLD_HOURS,
                    })?;
                if !hours.is_finite() {
                    return Err(ValidationError::NonFinite {
                        field: FIELD_THRESHOLD_HOURS,
                    });
                }
                if hours <= 0.0 {
                    return Err(ValidationError::NonPositiveThreshold {
                        field: FIELD_THRESHOLD_HOURS,
                        value: hours,
                    });
                }
                Ok(Threshold::Hours(hours))
            }
            TriggerKind::CalendarDays => {
                if self.threshold_hours.is_some() {
                    return Err(ValidationError::MismatchedThreshold {
                        kind: self.kind,
                        field: FIELD_THRESHOLD_HOURS,
                    });
                }
                let days = self
                    .threshold_days
                    .ok_or(ValidationError::MissingThreshold {
                        kind: self.kind,
                        field: FIELD_THRESHOLD_DAYS,
                    })?;
                if days == 0 {
                    return Err(ValidationError::NonPositiveThreshold {
                        field: FIELD_THRESHOLD_DAYS,
                        value: 0.0,
                    });
                }
                Ok(Threshold::Days(days))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_validate() {
        assert_eq!(
            MaintenanceTrigger::runtime_hours(250.0).validate(),
            Ok(Threshold::Hours(250.0))
        );
        assert_eq!(
            MaintenanceTrigger::calendar_days(30).validate(),
            Ok(Threshold::Days(30))
        );
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let err = MaintenanceTrigger::runtime_hours(0.0).validate().unwrap_err();
        assert_eq!(err.field(), FIELD_THRESHOLD_HOURS);

        let err = MaintenanceTrigger::runtime_hours(-5.0).validate().unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveThreshold { .. }));

        let err = MaintenanceTrigger::calendar_days(0).validate().unwrap_err();
        assert_eq!(err.field(), FIELD_THRESHOLD_DAYS);
    }

    #[test]
    fn test_rejects_non_finite_threshold() {
        let err = MaintenanceTrigger::runtime_hours(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));

        let err = MaintenanceTrigger::runtime_hours(f64::INFINITY)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), FIELD_THRESHOLD_HOURS);
    }

    #[test]
    fn test_rejects_mismatched_fields() {
        let trigger = MaintenanceTrigger {
            kind: TriggerKind::RuntimeHours,
            threshold_hours: Some(100.0),
            threshold_days: Some(30),
        };
        assert_eq!(
            trigger.validate(),
            Err(ValidationError::MismatchedThreshold {
                kind: TriggerKind::RuntimeHours,
                field: FIELD_THRESHOLD_DAYS,
            })
        );

        let trigger = MaintenanceTrigger {
            kind: TriggerKind::CalendarDays,
            threshold_hours: Some(100.0),
            threshold_days: None,
        };
        assert_eq!(trigger.validate().unwrap_err().field(), FIELD_THRESHOLD_HOURS);
    }

    #[test]
    fn test_rejects_missing_field() {
        let trigger = MaintenanceTrigger {
            kind: TriggerKind::CalendarDays,
            threshold_hours: None,
            threshold_days: None,
        };
        assert!(matches!(
            trigger.validate(),
            Err(ValidationError::MissingThreshold { .. })
        ));
    }

    #[test]
    fn test_trigger_deserialize_wire_shape() {
        let json = r#"{"kind":"runtime_hours","thresholdHours":100}"#;
        let trigger: MaintenanceTrigger = serde_json::from_str(json).unwrap();
        assert_eq!(trigger, MaintenanceTrigger::runtime_hours(100.0));

        let toml = r#"
            kind = "calendar_days"
            thresholdDays = 30
        "#;
        let trigger: MaintenanceTrigger = toml::from_str(toml).unwrap();
        assert_eq!(trigger, MaintenanceTrigger::calendar_days(30));
    }

    #[test]
    fn test_trigger_serialize_omits_unused_threshold() {
        let json = serde_json::to_string(&MaintenanceTrigger::calendar_days(14)).unwrap();
        assert_eq!(json, r#"{"kind":"calendar_days","thresholdDays":14}"#);
    }
}
