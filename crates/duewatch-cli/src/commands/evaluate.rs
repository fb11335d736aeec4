use std::path::{Path, PathBuf};

use clap::Args;
use duewatch_core::{
    evaluate, evaluate_lenient, EvaluationResult, ExecutionRecord, MaintenanceTrigger,
    RuntimeSnapshot, Severity,
};
use serde::{Deserialize, Serialize};

use super::{load_config, parse_instant, read_document, CmdResult};

#[derive(Args)]
pub struct EvaluateArgs {
    /// Routine file (.json or .toml) with trigger, execution and snapshot
    #[arg(long)]
    pub file: PathBuf,
    /// Evaluation instant (RFC 3339), defaults to now
    #[arg(long)]
    pub now: Option<String>,
    /// Report invalid triggers as "not calculated" instead of failing
    #[arg(long)]
    pub lenient: bool,
}

/// Input document for a single evaluation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateInput {
    trigger: MaintenanceTrigger,
    #[serde(default)]
    execution: ExecutionRecord,
    #[serde(default)]
    snapshot: RuntimeSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateOutput {
    #[serde(flatten)]
    result: EvaluationResult,
    severity: Severity,
    label: String,
}

pub fn run(args: EvaluateArgs, config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    let input: EvaluateInput = read_document(&args.file)?;
    let now = parse_instant(args.now.as_deref())?;

    let result = if args.lenient {
        evaluate_lenient(&input.trigger, &input.execution, &input.snapshot, now)
    } else {
        evaluate(&input.trigger, &input.execution, &input.snapshot, now)?
    };

    let output = EvaluateOutput {
        severity: config.severity_thresholds().classify(result.progress_percent),
        label: result.display_label(&config.display.date_format),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
