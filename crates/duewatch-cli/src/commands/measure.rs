use std::path::PathBuf;

use clap::Subcommand;
use duewatch_core::storage::{load_measurement_log, save_measurement_log};
use duewatch_core::{Measurement, MeasurementLog};

use super::{parse_instant, CmdResult};

#[derive(Subcommand)]
pub enum MeasureAction {
    /// Record a runtime reading; readings below the current counter are rejected
    Record {
        /// Measurement log file (JSON), created if missing
        #[arg(long)]
        log: PathBuf,
        /// Counter reading in hours
        #[arg(long)]
        hours: f64,
        /// Who took the reading
        #[arg(long)]
        reporter: Option<String>,
        /// Reading time (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Counter value for a new log
        #[arg(long, default_value = "0")]
        initial: f64,
    },
    /// Print the current snapshot as JSON
    Show {
        /// Measurement log file (JSON)
        #[arg(long)]
        log: PathBuf,
    },
}

pub fn run(action: MeasureAction) -> CmdResult {
    match action {
        MeasureAction::Record {
            log,
            hours,
            reporter,
            at,
            initial,
        } => {
            let mut measurements = match load_measurement_log(&log)? {
                Some(existing) => existing,
                None => MeasurementLog::new(initial)?,
            };

            let mut measurement = Measurement::new(hours, parse_instant(at.as_deref())?);
            if let Some(reporter) = reporter {
                measurement = measurement.with_reporter(reporter);
            }

            let snapshot = measurements.record(measurement)?;
            save_measurement_log(&log, &measurements)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        MeasureAction::Show { log } => {
            let measurements = load_measurement_log(&log)?
                .ok_or_else(|| format!("no measurement log at {}", log.display()))?;
            println!("{}", serde_json::to_string_pretty(&measurements.snapshot())?);
        }
    }
    Ok(())
}
