use std::path::{Path, PathBuf};

use clap::Args;
use duewatch_core::{AssessmentReport, MaintenancePlan};

use super::{load_config, parse_instant, read_document, CmdResult};

#[derive(Args)]
pub struct AssessArgs {
    /// Plan file (.json or .toml) with routines and per-asset snapshots
    #[arg(long)]
    pub file: PathBuf,
    /// Evaluation instant (RFC 3339), defaults to now
    #[arg(long)]
    pub now: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AssessArgs, config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    let plan: MaintenancePlan = read_document(&args.file)?;
    let now = parse_instant(args.now.as_deref())?;

    let report = plan.assess(now, &config.severity_thresholds());

    if args.json || config.display.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report, &config.display.date_format);
    }
    Ok(())
}

fn print_table(report: &AssessmentReport, date_format: &str) {
    println!(
        "{:<20} {:<16} {:>8}  {:<9} NEXT DUE",
        "ROUTINE", "ASSET", "PROGRESS", "SEVERITY"
    );
    for a in &report.assessments {
        println!(
            "{:<20} {:<16} {:>7}%  {:<9} {}",
            a.name,
            a.asset,
            a.result.progress_percent,
            a.severity,
            a.result.display_label(date_format)
        );
    }

    if !report.failures.is_empty() {
        println!("\nSkipped:");
        for f in &report.failures {
            println!("  {} ({}): {}", f.name, f.routine_id, f.message);
        }
    }

    println!(
        "\n{} routines, {} overdue, {} skipped",
        report.assessments.len(),
        report.overdue_count(),
        report.failures.len()
    );
}
