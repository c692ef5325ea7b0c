use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    #[serde(rename = "AD")]
    Ad,
    #[serde(rename = "CN")]
    Cn,
    #[serde(rename = "MCI")]
    Mci,
}

impl ClassLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassLabel::Ad => "AD",
            ClassLabel::Cn => "CN",
            ClassLabel::Mci => "MCI",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassLabel {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_uppercase().as_str() {
            "AD" => Ok(ClassLabel::Ad),
            "CN" => Ok(ClassLabel::Cn),
            "MCI" => Ok(ClassLabel::Mci),
            _ => Err(ShapeError::UnknownClass(name.to_string())),
        }
    }
}

/// Shape and labeling violations of a classifier output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("unknown class label: {0}")]
    UnknownClass(String),
    #[error("duplicate class label in class order: {0}")]
    DuplicateClass(ClassLabel),
    #[error("empty class order")]
    EmptyOrder,
    #[error("shape mismatch: class order has {expected} entries, vector has {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("{role} vector is missing class {missing}")]
    MissingClass {
        role: &'static str,
        missing: ClassLabel,
    },
}

/// Declared output ordering of one classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOrder {
    labels: Vec<ClassLabel>,
}

impl ClassOrder {
    pub fn new(labels: Vec<ClassLabel>) -> Result<Self, ShapeError> {
        if labels.is_empty() {
            return Err(ShapeError::EmptyOrder);
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ShapeError::DuplicateClass(*label));
            }
        }
        Ok(Self { labels })
    }

    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ShapeError> {
        let labels = names
            .iter()
            .map(|n| n.as_ref().parse::<ClassLabel>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(labels)
    }

    /// `[AD, CN, MCI]`, the ordering both trained models emit.
    pub fn standard() -> Self {
        Self {
            labels: vec![ClassLabel::Ad, ClassLabel::Cn, ClassLabel::Mci],
        }
    }

    pub fn labels(&self) -> &[ClassLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl fmt::Display for ClassOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(label.as_str())?;
        }
        Ok(())
    }
}

/// Classifier output keyed by class label instead of position.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    values: BTreeMap<ClassLabel, f32>,
}

impl ClassProbabilities {
    pub fn from_ordered(order: &ClassOrder, values: &[f32]) -> Result<Self, ShapeError> {
        if order.len() != values.len() {
            return Err(ShapeError::LengthMismatch {
                expected: order.len(),
                actual: values.len(),
            });
        }
        let values = order
            .labels()
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();
        Ok(Self { values })
    }

    pub fn get(&self, label: ClassLabel) -> Option<f32> {
        self.values.get(&label).copied()
    }

    pub fn sum(&self) -> f32 {
        self.values.values().sum()
    }
}

/// Stage-1 output over exactly {AD, CN, MCI}.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningVector {
    probs: ClassProbabilities,
}

impl ScreeningVector {
    pub fn new(probs: ClassProbabilities) -> Result<Self, ShapeError> {
        for label in [ClassLabel::Ad, ClassLabel::Cn, ClassLabel::Mci] {
            if probs.get(label).is_none() {
                return Err(ShapeError::MissingClass {
                    role: "screening",
                    missing: label,
                });
            }
        }
        Ok(Self { probs })
    }

    pub fn from_ordered(order: &ClassOrder, values: &[f32]) -> Result<Self, ShapeError> {
        Self::new(ClassProbabilities::from_ordered(order, values)?)
    }

    pub fn ad(&self) -> f32 {
        self.probs.get(ClassLabel::Ad).unwrap_or(f32::NAN)
    }

    pub fn cn(&self) -> f32 {
        self.probs.get(ClassLabel::Cn).unwrap_or(f32::NAN)
    }

    pub fn mci(&self) -> f32 {
        self.probs.get(ClassLabel::Mci).unwrap_or(f32::NAN)
    }

    pub fn probabilities(&self) -> &ClassProbabilities {
        &self.probs
    }
}

/// Stage-2 output; only the AD dimension is consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementVector {
    probs: ClassProbabilities,
}

impl RefinementVector {
    pub fn new(probs: ClassProbabilities) -> Result<Self, ShapeError> {
        if probs.get(ClassLabel::Ad).is_none() {
            return Err(ShapeError::MissingClass {
                role: "refinement",
                missing: ClassLabel::Ad,
            });
        }
        Ok(Self { probs })
    }

    pub fn from_ordered(order: &ClassOrder, values: &[f32]) -> Result<Self, ShapeError> {
        Self::new(ClassProbabilities::from_ordered(order, values)?)
    }

    pub fn ad(&self) -> f32 {
        self.probs.get(ClassLabel::Ad).unwrap_or(f32::NAN)
    }

    pub fn probabilities(&self) -> &ClassProbabilities {
        &self.probs
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/classes.rs"]
mod tests;
