use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::classifier::RawOutputs;
use crate::model::classes::{
    ClassLabel, ClassOrder, RefinementVector, ScreeningVector, ShapeError,
};

/// Largest tolerated |sum - 1| before a warning is logged.
const SUM_TOLERANCE: f32 = 0.05;

/// What to do with finite probabilities outside [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    #[default]
    PassThrough,
    Clamp,
    Reject,
}

impl RangePolicy {
    pub fn key(self) -> &'static str {
        match self {
            RangePolicy::PassThrough => "pass",
            RangePolicy::Clamp => "clamp",
            RangePolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(RangePolicy::PassThrough),
            "clamp" => Ok(RangePolicy::Clamp),
            "reject" => Ok(RangePolicy::Reject),
            other => Err(format!("invalid range policy {other} (use pass|clamp|reject)")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{role} output: {source}")]
    Shape {
        role: &'static str,
        #[source]
        source: ShapeError,
    },
    #[error("{role} output: {label} probability is not finite ({value})")]
    NonFinite {
        role: &'static str,
        label: ClassLabel,
        value: f32,
    },
    #[error("{role} output: {label} probability {value} outside [0, 1]")]
    OutOfRange {
        role: &'static str,
        label: ClassLabel,
        value: f32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Stage3Params<'a> {
    pub screening_order: &'a ClassOrder,
    pub refinement_order: &'a ClassOrder,
    pub range_policy: RangePolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedScores {
    pub screening: ScreeningVector,
    pub refinement: RefinementVector,
}

pub fn run_stage3(
    raw: &RawOutputs,
    params: &Stage3Params<'_>,
) -> Result<ValidatedScores, ValidationError> {
    let screening_values = prepare(
        "screening",
        params.screening_order,
        &raw.screening,
        params.range_policy,
    )?;
    let screening = ScreeningVector::from_ordered(params.screening_order, &screening_values)
        .map_err(|source| ValidationError::Shape {
            role: "screening",
            source,
        })?;

    let refinement_values = prepare(
        "refinement",
        params.refinement_order,
        &raw.refinement,
        params.range_policy,
    )?;
    let refinement = RefinementVector::from_ordered(params.refinement_order, &refinement_values)
        .map_err(|source| ValidationError::Shape {
            role: "refinement",
            source,
        })?;

    warn_on_sum("screening", screening.probabilities().sum());
    warn_on_sum("refinement", refinement.probabilities().sum());

    Ok(ValidatedScores {
        screening,
        refinement,
    })
}

fn prepare(
    role: &'static str,
    order: &ClassOrder,
    values: &[f32],
    policy: RangePolicy,
) -> Result<Vec<f32>, ValidationError> {
    if order.len() != values.len() {
        return Err(ValidationError::Shape {
            role,
            source: ShapeError::LengthMismatch {
                expected: order.len(),
                actual: values.len(),
            },
        });
    }

    let mut out = Vec::with_capacity(values.len());
    for (&label, &value) in order.labels().iter().zip(values) {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { role, label, value });
        }
        if (0.0..=1.0).contains(&value) {
            out.push(value);
            continue;
        }
        match policy {
            RangePolicy::PassThrough => out.push(value),
            RangePolicy::Clamp => {
                tracing::warn!(role, %label, value, "clamping probability into [0, 1]");
                out.push(value.clamp(0.0, 1.0));
            }
            RangePolicy::Reject => {
                return Err(ValidationError::OutOfRange { role, label, value });
            }
        }
    }
    Ok(out)
}

fn warn_on_sum(role: &'static str, sum: f32) {
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        tracing::warn!(role, sum, "probabilities do not sum to 1");
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_validate.rs"]
mod tests;
