use std::sync::Arc;

use thiserror::Error;

use crate::input::{IMAGE_SIZE, ImageTensor, ScoreTable};
use crate::model::classes::ClassOrder;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("{classifier}: no scores for scan {scan}")]
    MissingScores { classifier: String, scan: String },
    #[error("{classifier}: inference failed: {message}")]
    Backend { classifier: String, message: String },
    #[error("{classifier}: inference worker panicked")]
    Panicked { classifier: String },
}

#[derive(Debug, Clone, Copy)]
pub struct ScanInput<'a> {
    pub id: &'a str,
    pub tensor: &'a ImageTensor,
}

/// An opaque scoring function: normalized scan in, probability vector out.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Ordering of the values returned by `predict`.
    fn class_order(&self) -> &ClassOrder;

    fn predict(&self, scan: &ScanInput<'_>) -> Result<Vec<f32>, InferenceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColumn {
    Screening,
    Refinement,
}

/// Serves precomputed model outputs from a score table.
///
/// Scores are looked up by scan id. The tensor is still held to the input
/// shape the trained models accept, so a scan the real models would refuse
/// is refused here too.
#[derive(Debug, Clone)]
pub struct ScoreTableClassifier {
    name: String,
    column: ScoreColumn,
    table: Arc<ScoreTable>,
}

impl ScoreTableClassifier {
    pub fn new(table: Arc<ScoreTable>, column: ScoreColumn) -> Self {
        let name = match column {
            ScoreColumn::Screening => "screening",
            ScoreColumn::Refinement => "refinement",
        };
        Self {
            name: name.to_string(),
            column,
            table,
        }
    }
}

impl Classifier for ScoreTableClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_order(&self) -> &ClassOrder {
        match self.column {
            ScoreColumn::Screening => &self.table.screening_order,
            ScoreColumn::Refinement => &self.table.refinement_order,
        }
    }

    fn predict(&self, scan: &ScanInput<'_>) -> Result<Vec<f32>, InferenceError> {
        let shape = (scan.tensor.width(), scan.tensor.height());
        if shape != IMAGE_SIZE {
            return Err(InferenceError::Backend {
                classifier: self.name.clone(),
                message: format!(
                    "input is {}x{}, model expects {}x{}",
                    shape.0, shape.1, IMAGE_SIZE.0, IMAGE_SIZE.1
                ),
            });
        }
        let scores = self
            .table
            .scans
            .get(scan.id)
            .ok_or_else(|| InferenceError::MissingScores {
                classifier: self.name.clone(),
                scan: scan.id.to_string(),
            })?;
        Ok(match self.column {
            ScoreColumn::Screening => scores.screening.clone(),
            ScoreColumn::Refinement => scores.refinement.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawOutputs {
    pub screening: Vec<f32>,
    pub refinement: Vec<f32>,
}

/// Stage-1 and stage-2 models, built once and passed down explicitly.
pub struct ClassifierPair {
    screening: Box<dyn Classifier>,
    refinement: Box<dyn Classifier>,
}

impl ClassifierPair {
    pub fn new(screening: Box<dyn Classifier>, refinement: Box<dyn Classifier>) -> Self {
        Self {
            screening,
            refinement,
        }
    }

    pub fn from_score_table(table: ScoreTable) -> Self {
        let table = Arc::new(table);
        Self::new(
            Box::new(ScoreTableClassifier::new(
                Arc::clone(&table),
                ScoreColumn::Screening,
            )),
            Box::new(ScoreTableClassifier::new(table, ScoreColumn::Refinement)),
        )
    }

    pub fn screening(&self) -> &dyn Classifier {
        self.screening.as_ref()
    }

    pub fn refinement(&self) -> &dyn Classifier {
        self.refinement.as_ref()
    }

    /// Runs both models on the same scan concurrently.
    pub fn infer(&self, scan: &ScanInput<'_>) -> Result<RawOutputs, InferenceError> {
        let (screening, refinement) = std::thread::scope(|scope| {
            let worker = scope.spawn(|| self.refinement.predict(scan));
            let screening = self.screening.predict(scan);
            let refinement = worker.join().unwrap_or_else(|_| {
                Err(InferenceError::Panicked {
                    classifier: self.refinement.name().to_string(),
                })
            });
            (screening, refinement)
        });
        Ok(RawOutputs {
            screening: screening?,
            refinement: refinement?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/classifier/tests.rs"]
mod tests;
