use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::model::classes::ClassOrder;

/// Raw outputs of both models for one scan, in their declared class order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanScores {
    pub screening: Vec<f32>,
    pub refinement: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct ScoreTable {
    pub screening_order: ClassOrder,
    pub refinement_order: ClassOrder,
    pub scans: BTreeMap<String, ScanScores>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScoreTable {
    #[serde(default = "standard_class_names")]
    screening_classes: Vec<String>,
    #[serde(default = "standard_class_names")]
    refinement_classes: Vec<String>,
    scans: BTreeMap<String, ScanScores>,
}

fn standard_class_names() -> Vec<String> {
    ClassOrder::standard()
        .labels()
        .iter()
        .map(|l| l.as_str().to_string())
        .collect()
}

pub fn load_score_table(path: &Path) -> Result<ScoreTable, InputError> {
    let raw = std::fs::read_to_string(path)?;
    let table = parse_score_table(&raw)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        scans = table.scans.len(),
        screening_classes = %table.screening_order,
        refinement_classes = %table.refinement_order,
        "loaded score table"
    );
    Ok(table)
}

pub fn parse_score_table(raw: &str) -> Result<ScoreTable, InputError> {
    let parsed: RawScoreTable =
        serde_json::from_str(raw).map_err(|e| InputError::Parse(e.to_string()))?;
    let screening_order = ClassOrder::parse(&parsed.screening_classes)
        .map_err(|e| InputError::InvalidInput(format!("screening_classes: {e}")))?;
    let refinement_order = ClassOrder::parse(&parsed.refinement_classes)
        .map_err(|e| InputError::InvalidInput(format!("refinement_classes: {e}")))?;
    Ok(ScoreTable {
        screening_order,
        refinement_order,
        scans: parsed.scans,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/scores.rs"]
mod tests;
