mod classifier;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::classifier::{ClassifierPair, RawOutputs};
use crate::input::{InputError, discover_scans, load_score_table};
use crate::model::classes::{ClassOrder, ShapeError};
use crate::model::thresholds::{PolicyError, PolicyOverrides, ThresholdPolicy};
use crate::pipeline::stage3_validate::{RangePolicy, Stage3Params, ValidationError, run_stage3};
use crate::pipeline::stage4_decide::{Signals, decide};
use crate::pipeline::stage5_report::{ReportError, Stage5Input, write_reports};
use crate::pipeline::{ScreeningContext, screen_scans};

const TOOL_NAME: &str = "kira-cogrisk";

#[derive(Debug, Parser)]
#[command(
    name = "kira-cogrisk",
    version,
    about = "Two-stage cascaded cognitive-impairment risk screening for brain MRI scans"
)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Screen a scan or a directory of scans and write reports.
    Run(RunArgs),
    /// Decide a single pair of probability vectors and print the verdict.
    Decide(DecideArgs),
    /// Print the effective threshold policy.
    Policy(PolicyArgs),
}

#[derive(Debug, Clone, Default, Args)]
struct PolicyArgs {
    /// JSON file with any of refinement_ad_low, refinement_ad_high, screening_ad_ceiling.
    #[arg(long)]
    thresholds: Option<PathBuf>,
    #[arg(long)]
    refinement_ad_low: Option<f32>,
    #[arg(long)]
    refinement_ad_high: Option<f32>,
    #[arg(long)]
    screening_ad_ceiling: Option<f32>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Image file or directory of images.
    #[arg(long)]
    input: PathBuf,
    /// Score table with both models' outputs per scan.
    #[arg(long)]
    scores: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    policy: PolicyArgs,
    /// pass | clamp | reject
    #[arg(long, default_value_t = RangePolicy::PassThrough)]
    range_policy: RangePolicy,
}

#[derive(Debug, Args)]
struct DecideArgs {
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    screening: Vec<f32>,
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    refinement: Vec<f32>,
    #[arg(long, value_delimiter = ',', default_value = "AD,CN,MCI")]
    screening_classes: Vec<String>,
    #[arg(long, value_delimiter = ',', default_value = "AD,CN,MCI")]
    refinement_classes: Vec<String>,
    #[command(flatten)]
    policy: PolicyArgs,
    #[arg(long, default_value_t = RangePolicy::PassThrough)]
    range_policy: RangePolicy,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("class order: {0}")]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{failed} of {total} scans failed; see the reports for details")]
    ScansFailed { failed: usize, total: usize },
}

#[derive(Debug, Serialize)]
struct DecideOutput {
    label: &'static str,
    category: &'static str,
    severity: &'static str,
    cue: &'static str,
    rule: &'static str,
    signals: Signals,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Run(args) => run_screening(&args),
        Command::Decide(args) => {
            let output = run_decide(&args)?;
            println!("{}", serde_json::to_string(&output)?);
            Ok(())
        }
        Command::Policy(args) => {
            let policy = resolve_policy(&args)?;
            println!("{}", serde_json::to_string_pretty(&policy)?);
            Ok(())
        }
    }
}

fn run_screening(args: &RunArgs) -> Result<(), AppError> {
    let policy = resolve_policy(&args.policy)?;
    tracing::info!(
        refinement_ad_low = policy.refinement_ad_low(),
        refinement_ad_high = policy.refinement_ad_high(),
        screening_ad_ceiling = policy.screening_ad_ceiling(),
        range_policy = %args.range_policy,
        "threshold policy"
    );

    let scans = discover_scans(&args.input)?;
    let classifiers = ClassifierPair::from_score_table(load_score_table(&args.scores)?);

    let ctx = ScreeningContext {
        classifiers: &classifiers,
        policy: &policy,
        range_policy: args.range_policy,
    };
    let records = screen_scans(&scans, &ctx);

    let summary = write_reports(
        &Stage5Input {
            records: &records,
            policy: &policy,
            range_policy: args.range_policy,
            tool_name: TOOL_NAME.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        &args.out,
    )?;

    if summary.n_failed > 0 {
        return Err(AppError::ScansFailed {
            failed: summary.n_failed,
            total: summary.n_scans,
        });
    }
    Ok(())
}

fn run_decide(args: &DecideArgs) -> Result<DecideOutput, AppError> {
    let policy = resolve_policy(&args.policy)?;
    let screening_order = ClassOrder::parse(&args.screening_classes)?;
    let refinement_order = ClassOrder::parse(&args.refinement_classes)?;
    let raw = RawOutputs {
        screening: args.screening.clone(),
        refinement: args.refinement.clone(),
    };
    let scores = run_stage3(
        &raw,
        &Stage3Params {
            screening_order: &screening_order,
            refinement_order: &refinement_order,
            range_policy: args.range_policy,
        },
    )?;
    let decision = decide(&scores.screening, &scores.refinement, &policy);
    Ok(DecideOutput {
        label: decision.verdict.label(),
        category: decision.verdict.category.key(),
        severity: decision.verdict.severity.key(),
        cue: decision.verdict.severity.cue(),
        rule: decision.rule.key(),
        signals: decision.signals,
    })
}

/// Threshold file first, then command-line overrides, then validation.
fn resolve_policy(args: &PolicyArgs) -> Result<ThresholdPolicy, AppError> {
    let from_file = match &args.thresholds {
        Some(path) => PolicyOverrides::load(path)?,
        None => PolicyOverrides::default(),
    };
    let from_cli = PolicyOverrides {
        refinement_ad_low: args.refinement_ad_low,
        refinement_ad_high: args.refinement_ad_high,
        screening_ad_ceiling: args.screening_ad_ceiling,
    };
    Ok(ThresholdPolicy::from_overrides(&from_file.merged_with(&from_cli))?)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
