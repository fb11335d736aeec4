//! Three-tier severity derived from progress percentage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Visual severity of a routine's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds (inclusive) of the warning and critical tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    #[serde(default = "default_warning_at")]
    pub warning_at: u8,
    #[serde(default = "default_critical_at")]
    pub critical_at: u8,
}

fn default_warning_at() -> u8 {
    70
}
fn default_critical_at() -> u8 {
    90
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            warning_at: default_warning_at(),
            critical_at: default_critical_at(),
        }
    }
}

impl SeverityThresholds {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] unless `warning_at <= critical_at <= 100`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.critical_at > 100 {
            return Err(ValidationError::InvalidValue {
                field: "severity.critical_at".to_string(),
                message: format!("must be at most 100 (got {})", self.critical_at),
            });
        }
        if self.warning_at > self.critical_at {
            return Err(ValidationError::InvalidValue {
                field: "severity.warning_at".to_string(),
                message: format!(
                    "must not exceed critical_at ({} > {})",
                    self.warning_at, self.critical_at
                ),
            });
        }
        Ok(())
    }

    pub fn classify(&self, progress_percent: u8) -> Severity {
        if progress_percent >= self.critical_at {
            Severity::Critical
        } else if progress_percent >= self.warning_at {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Classify with the default 70 / 90 tiers.
pub fn classify(progress_percent: u8) -> Severity {
    SeverityThresholds::default().classify(progress_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        assert_eq!(classify(0), Severity::Normal);
        assert_eq!(classify(69), Severity::Normal);
        assert_eq!(classify(70), Severity::Warning);
        assert_eq!(classify(89), Severity::Warning);
        assert_eq!(classify(90), Severity::Critical);
        assert_eq!(classify(100), Severity::Critical);
    }

    #[test]
    fn test_total_over_domain() {
        for p in 0..=u8::MAX {
            let _ = classify(p);
        }
        assert_eq!(classify(u8::MAX), Severity::Critical);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = SeverityThresholds {
            warning_at: 50,
            critical_at: 80,
        };
        assert!(thresholds.validate().is_ok());
        assert_eq!(thresholds.classify(49), Severity::Normal);
        assert_eq!(thresholds.classify(50), Severity::Warning);
        assert_eq!(thresholds.classify(80), Severity::Critical);
    }

    #[test]
    fn test_thresholds_validation() {
        let inverted = SeverityThresholds {
            warning_at: 95,
            critical_at: 90,
        };
        assert_eq!(inverted.validate().unwrap_err().field(), "severity.warning_at");

        let too_high = SeverityThresholds {
            warning_at: 70,
            critical_at: 101,
        };
        assert_eq!(too_high.validate().unwrap_err().field(), "severity.critical_at");
    }

    #[test]
    fn test_severity_ordering_and_names() {
        assert!(Severity::Normal < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), r#""warning""#);
    }
}
