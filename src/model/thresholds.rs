use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("threshold {name} must be finite and within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("refinement_ad_low ({low}) must be strictly below refinement_ad_high ({high})")]
    InvertedBand { low: f32, high: f32 },
    #[error("cannot read threshold file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse threshold file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Cutoffs consumed by the cascade rules. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdPolicy {
    refinement_ad_low: f32,
    refinement_ad_high: f32,
    screening_ad_ceiling: f32,
}

/// Partial policy as found in a threshold file or on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyOverrides {
    pub refinement_ad_low: Option<f32>,
    pub refinement_ad_high: Option<f32>,
    pub screening_ad_ceiling: Option<f32>,
}

impl ThresholdPolicy {
    pub fn new(
        refinement_ad_low: f32,
        refinement_ad_high: f32,
        screening_ad_ceiling: f32,
    ) -> Result<Self, PolicyError> {
        check_unit("refinement_ad_low", refinement_ad_low)?;
        check_unit("refinement_ad_high", refinement_ad_high)?;
        check_unit("screening_ad_ceiling", screening_ad_ceiling)?;
        if refinement_ad_low >= refinement_ad_high {
            return Err(PolicyError::InvertedBand {
                low: refinement_ad_low,
                high: refinement_ad_high,
            });
        }
        Ok(Self {
            refinement_ad_low,
            refinement_ad_high,
            screening_ad_ceiling,
        })
    }

    pub fn default_v1() -> Self {
        Self {
            refinement_ad_low: 0.18,
            refinement_ad_high: 0.62,
            screening_ad_ceiling: 0.20,
        }
    }

    /// Applies overrides on top of `default_v1` and validates the result.
    pub fn from_overrides(overrides: &PolicyOverrides) -> Result<Self, PolicyError> {
        let base = Self::default_v1();
        Self::new(
            overrides.refinement_ad_low.unwrap_or(base.refinement_ad_low),
            overrides.refinement_ad_high.unwrap_or(base.refinement_ad_high),
            overrides
                .screening_ad_ceiling
                .unwrap_or(base.screening_ad_ceiling),
        )
    }

    pub fn refinement_ad_low(&self) -> f32 {
        self.refinement_ad_low
    }

    pub fn refinement_ad_high(&self) -> f32 {
        self.refinement_ad_high
    }

    pub fn screening_ad_ceiling(&self) -> f32 {
        self.screening_ad_ceiling
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl PolicyOverrides {
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| PolicyError::Parse {
            path: display,
            source,
        })
    }

    /// Fields set in `other` win.
    pub fn merged_with(self, other: &PolicyOverrides) -> Self {
        Self {
            refinement_ad_low: other.refinement_ad_low.or(self.refinement_ad_low),
            refinement_ad_high: other.refinement_ad_high.or(self.refinement_ad_high),
            screening_ad_ceiling: other.screening_ad_ceiling.or(self.screening_ad_ceiling),
        }
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<(), PolicyError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::OutOfUnitRange { name, value })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
