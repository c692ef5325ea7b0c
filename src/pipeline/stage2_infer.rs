use crate::classifier::{ClassifierPair, InferenceError, RawOutputs, ScanInput};
use crate::pipeline::stage1_normalize::NormalizedScan;

pub fn run_stage2(
    classifiers: &ClassifierPair,
    scan: &NormalizedScan,
) -> Result<RawOutputs, InferenceError> {
    tracing::debug!(
        scan = %scan.id,
        width = scan.tensor.width(),
        height = scan.tensor.height(),
        values = scan.tensor.data().len(),
        "running classifiers"
    );
    let input = ScanInput {
        id: &scan.id,
        tensor: &scan.tensor,
    };
    let raw = classifiers.infer(&input)?;
    tracing::debug!(
        scan = %scan.id,
        screening = ?raw.screening,
        refinement = ?raw.refinement,
        "inference complete"
    );
    Ok(raw)
}
