pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::thresholds::ThresholdPolicy;
use crate::pipeline::stage3_validate::RangePolicy;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub name: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountStat {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub scan: String,
    pub stage: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub tool_version: String,
    pub policy: ThresholdPolicy,
    pub range_policy: RangePolicy,

    pub n_scans: usize,
    pub n_decided: usize,
    pub n_failed: usize,

    pub categories: Vec<CategoryStat>,
    pub severities: Vec<CountStat>,
    pub rules: Vec<CountStat>,
    pub failures: Vec<FailureEntry>,
}

pub fn format_f32_6(v: f32) -> String {
    format!("{:.6}", v)
}

pub fn fraction(count: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    count as f32 / total as f32
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
