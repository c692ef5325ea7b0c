use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod normalizer;
pub mod scores;

pub use normalizer::{IMAGE_SIZE, ImageTensor, normalize_image};
pub use scores::{ScoreTable, load_score_table};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("cannot decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPath {
    pub id: String,
    pub path: PathBuf,
}

/// Resolves `input` to the ordered list of scans to screen.
pub fn discover_scans(input: &Path) -> Result<Vec<ScanPath>, InputError> {
    if !input.exists() {
        return Err(InputError::MissingInput(format!(
            "{} does not exist",
            input.display()
        )));
    }

    if input.is_file() {
        return Ok(vec![scan_path(input)?]);
    }

    let mut scans = Vec::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            scans.push(scan_path(&path)?);
        }
    }
    scans.sort_by(|a, b| a.id.cmp(&b.id));

    if scans.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no images ({}) found in {}",
            IMAGE_EXTENSIONS.join("|"),
            input.display()
        )));
    }

    tracing::info!(count = scans.len(), dir = %input.display(), "discovered scans");
    Ok(scans)
}

fn scan_path(path: &Path) -> Result<ScanPath, InputError> {
    let id = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| InputError::InvalidInput(format!("unusable file name: {}", path.display())))?
        .to_string();
    Ok(ScanPath {
        id,
        path: path.to_path_buf(),
    })
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
