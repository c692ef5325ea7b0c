pub mod stage1_normalize;
pub mod stage2_infer;
pub mod stage3_validate;
pub mod stage4_decide;
pub mod stage5_report;

use crate::classifier::ClassifierPair;
use crate::input::ScanPath;
use crate::model::classes::{RefinementVector, ScreeningVector};
use crate::model::thresholds::ThresholdPolicy;
use crate::pipeline::stage1_normalize::run_stage1;
use crate::pipeline::stage2_infer::run_stage2;
use crate::pipeline::stage3_validate::{RangePolicy, Stage3Params, run_stage3};
use crate::pipeline::stage4_decide::{Decision, decide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Normalize,
    Infer,
    Validate,
}

impl FailedStage {
    pub fn key(self) -> &'static str {
        match self {
            FailedStage::Normalize => "normalize",
            FailedStage::Infer => "infer",
            FailedStage::Validate => "validate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecidedScan {
    pub screening: ScreeningVector,
    pub refinement: RefinementVector,
    pub decision: Decision,
}

/// A failed scan carries no verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanStatus {
    Decided(DecidedScan),
    Failed { stage: FailedStage, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub id: String,
    pub status: ScanStatus,
}

impl ScanRecord {
    pub fn decided(&self) -> Option<&DecidedScan> {
        match &self.status {
            ScanStatus::Decided(d) => Some(d),
            ScanStatus::Failed { .. } => None,
        }
    }
}

pub struct ScreeningContext<'a> {
    pub classifiers: &'a ClassifierPair,
    pub policy: &'a ThresholdPolicy,
    pub range_policy: RangePolicy,
}

pub fn screen_scans(scans: &[ScanPath], ctx: &ScreeningContext<'_>) -> Vec<ScanRecord> {
    scans.iter().map(|scan| screen_scan(scan, ctx)).collect()
}

pub fn screen_scan(scan: &ScanPath, ctx: &ScreeningContext<'_>) -> ScanRecord {
    let status = match run_scan(scan, ctx) {
        Ok(decided) => {
            tracing::info!(
                scan = %scan.id,
                verdict = decided.decision.verdict.label(),
                rule = decided.decision.rule.key(),
                "scan screened"
            );
            ScanStatus::Decided(decided)
        }
        Err((stage, reason)) => {
            tracing::error!(scan = %scan.id, stage = stage.key(), %reason, "scan failed");
            ScanStatus::Failed { stage, reason }
        }
    };
    ScanRecord {
        id: scan.id.clone(),
        status,
    }
}

fn run_scan(
    scan: &ScanPath,
    ctx: &ScreeningContext<'_>,
) -> Result<DecidedScan, (FailedStage, String)> {
    let normalized = run_stage1(scan).map_err(|e| (FailedStage::Normalize, e.to_string()))?;
    let raw =
        run_stage2(ctx.classifiers, &normalized).map_err(|e| (FailedStage::Infer, e.to_string()))?;
    let params = Stage3Params {
        screening_order: ctx.classifiers.screening().class_order(),
        refinement_order: ctx.classifiers.refinement().class_order(),
        range_policy: ctx.range_policy,
    };
    let scores = run_stage3(&raw, &params).map_err(|e| (FailedStage::Validate, e.to_string()))?;
    let decision = decide(&scores.screening, &scores.refinement, ctx.policy);
    Ok(DecidedScan {
        screening: scores.screening,
        refinement: scores.refinement,
        decision,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
