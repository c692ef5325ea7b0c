use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::thresholds::ThresholdPolicy;
use crate::model::verdict::{category_order, rule_order, severity_order};
use crate::pipeline::stage3_validate::RangePolicy;
use crate::pipeline::{ScanRecord, ScanStatus};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    CategoryStat, CountStat, FailureEntry, SummaryData, format_f32_6, fraction,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub records: &'a [ScanRecord],
    pub policy: &'a ThresholdPolicy,
    pub range_policy: RangePolicy,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> Result<SummaryData, ReportError> {
    fs::create_dir_all(out_dir)?;

    write_verdicts_tsv(input.records, &out_dir.join("verdicts.tsv"))?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    tracing::info!(out = %out_dir.display(), "reports written");
    Ok(summary)
}

fn write_verdicts_tsv(records: &[ScanRecord], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "scan_id",
        "status",
        "screening_ad",
        "screening_cn",
        "screening_mci",
        "refinement_ad",
        "category",
        "label",
        "severity",
        "cue",
        "rule",
        "error",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for record in records {
        let row = match &record.status {
            ScanStatus::Decided(d) => {
                let verdict = d.decision.verdict;
                vec![
                    sanitize_field(&record.id),
                    "decided".to_string(),
                    format_f32_6(d.screening.ad()),
                    format_f32_6(d.screening.cn()),
                    format_f32_6(d.screening.mci()),
                    format_f32_6(d.refinement.ad()),
                    verdict.category.key().to_string(),
                    verdict.label().to_string(),
                    verdict.severity.key().to_string(),
                    verdict.severity.cue().to_string(),
                    d.decision.rule.key().to_string(),
                    String::new(),
                ]
            }
            ScanStatus::Failed { stage, reason } => {
                let mut row = vec![sanitize_field(&record.id), format!("failed:{}", stage.key())];
                row.extend(std::iter::repeat_n(String::new(), 9));
                row.push(sanitize_field(reason));
                row
            }
        }
        .join("\t");
        writeln!(w, "{}", row)?;
    }

    w.flush()
}

fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let decided: Vec<_> = input.records.iter().filter_map(|r| r.decided()).collect();
    let n_decided = decided.len();

    let categories = category_order()
        .iter()
        .map(|&category| {
            let count = decided
                .iter()
                .filter(|d| d.decision.verdict.category == category)
                .count();
            CategoryStat {
                name: category.key(),
                label: category.label(),
                count,
                fraction: fraction(count, n_decided),
            }
        })
        .collect();

    let severities = severity_order()
        .iter()
        .map(|&severity| CountStat {
            name: severity.key(),
            count: decided
                .iter()
                .filter(|d| d.decision.verdict.severity == severity)
                .count(),
        })
        .collect();

    let rules = rule_order()
        .iter()
        .map(|&rule| CountStat {
            name: rule.key(),
            count: decided.iter().filter(|d| d.decision.rule == rule).count(),
        })
        .collect();

    let failures: Vec<FailureEntry> = input
        .records
        .iter()
        .filter_map(|r| match &r.status {
            ScanStatus::Failed { stage, reason } => Some(FailureEntry {
                scan: r.id.clone(),
                stage: stage.key(),
                reason: reason.clone(),
            }),
            ScanStatus::Decided(_) => None,
        })
        .collect();

    SummaryData {
        tool: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        policy: *input.policy,
        range_policy: input.range_policy,
        n_scans: input.records.len(),
        n_decided,
        n_failed: failures.len(),
        categories,
        severities,
        rules,
        failures,
    }
}

fn sanitize_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
