//! JSON file backing for a [`MeasurementLog`].

use std::path::Path;

use crate::error::Result;
use crate::snapshot::MeasurementLog;

/// Read a measurement log, or `None` if the file does not exist yet.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_measurement_log(path: &Path) -> Result<Option<MeasurementLog>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// # Errors
///
/// Returns an error if the log cannot be serialized or written.
pub fn save_measurement_log(path: &Path, log: &MeasurementLog) -> Result<()> {
    let content = serde_json::to_string_pretty(log)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Measurement;
    use chrono::Utc;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_measurement_log(&dir.path().join("absent.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("press-1.json");

        let mut log = MeasurementLog::new(10.0).unwrap();
        log.record(Measurement::new(42.5, Utc::now()).with_reporter("ops"))
            .unwrap();
        save_measurement_log(&path, &log).unwrap();

        let loaded = load_measurement_log(&path).unwrap().unwrap();
        assert_eq!(loaded, log);
        assert_eq!(loaded.snapshot().current_hours, Some(42.5));
    }

    #[test]
    fn corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_measurement_log(&path).is_err());
    }
}
