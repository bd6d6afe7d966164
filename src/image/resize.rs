//! Whole-image rescaling for the multi-scale sweep.

use crate::util::{LordeError, LordeResult};
use image::imageops::{self, FilterType};
use image::GrayImage;

/// Output size of an image scaled by `scale`, rounded to whole pixels.
pub fn scaled_dims(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = (f64::from(width) * scale).round();
    let h = (f64::from(height) * scale).round();
    (w.max(0.0) as u32, h.max(0.0) as u32)
}

/// Resizes `img` by `scale` in both axes with bilinear filtering.
///
/// A unit scale returns an exact copy.
pub fn rescale(img: &GrayImage, scale: f64) -> LordeResult<GrayImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(LordeError::InvalidInput("scale must be finite and positive"));
    }
    let (width, height) = scaled_dims(img.width(), img.height(), scale);
    if width == 0 || height == 0 {
        return Err(LordeError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        });
    }
    if (width, height) == img.dimensions() {
        return Ok(img.clone());
    }
    Ok(imageops::resize(img, width, height, FilterType::Triangle))
}
