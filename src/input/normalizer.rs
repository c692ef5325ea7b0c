use std::path::Path;

use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::input::InputError;

/// Spatial resolution both classifiers were trained on.
pub const IMAGE_SIZE: (u32, u32) = (180, 180);
pub const CHANNELS: usize = 3;

/// Model input: HWC, 3 channels, every value in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn check_contract(&self, expected: (u32, u32)) -> Result<(), InputError> {
        if (self.width, self.height) != expected {
            return Err(InputError::InvalidInput(format!(
                "tensor is {}x{}, expected {}x{}",
                self.width, self.height, expected.0, expected.1
            )));
        }
        let expected_len = self.width as usize * self.height as usize * CHANNELS;
        if self.data.len() != expected_len {
            return Err(InputError::InvalidInput(format!(
                "tensor holds {} values, expected {}",
                self.data.len(),
                expected_len
            )));
        }
        if let Some(v) = self.data.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(InputError::InvalidInput(format!(
                "tensor value {v} outside [0, 1]"
            )));
        }
        Ok(())
    }
}

pub fn normalize_image(path: &Path, size: (u32, u32)) -> Result<ImageTensor, InputError> {
    let decoded = image::open(path).map_err(|source| InputError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    tracing::debug!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        "decoded scan"
    );
    Ok(normalize_rgb(&rgb, size))
}

pub fn normalize_rgb(image: &RgbImage, size: (u32, u32)) -> ImageTensor {
    let (width, height) = size;
    let resized = if image.dimensions() != size {
        imageops::resize(image, width, height, FilterType::CatmullRom)
    } else {
        image.clone()
    };

    let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for pixel in resized.pixels() {
        for &c in &pixel.0 {
            data.push(c as f32 / 255.0);
        }
    }

    ImageTensor {
        width,
        height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/normalizer.rs"]
mod tests;
