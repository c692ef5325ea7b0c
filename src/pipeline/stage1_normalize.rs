use crate::input::{IMAGE_SIZE, ImageTensor, InputError, ScanPath, normalize_image};

#[derive(Debug, Clone)]
pub struct NormalizedScan {
    pub id: String,
    pub tensor: ImageTensor,
}

pub fn run_stage1(scan: &ScanPath) -> Result<NormalizedScan, InputError> {
    let tensor = normalize_image(&scan.path, IMAGE_SIZE)?;
    tensor.check_contract(IMAGE_SIZE)?;
    Ok(NormalizedScan {
        id: scan.id.clone(),
        tensor,
    })
}
