//! Auto-threshold edge extraction.
//!
//! Canny thresholds are derived from the image's own median intensity, so the
//! same settings work across frames and lighting conditions.

use crate::util::math::median_u8;
use image::GrayImage;
use imageproc::edges::canny;

/// Edge extraction settings.
#[derive(Clone, Copy, Debug)]
pub struct EdgeConfig {
    /// Relative spread of the thresholds around the median.
    pub sigma: f32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self { sigma: 0.33 }
    }
}

/// Lower and upper Canny thresholds for an image with the given median.
///
/// Thresholds are truncated to whole intensities and raised to at least one,
/// so pixels without any gradient never qualify as edges.
pub fn auto_thresholds(median: f32, sigma: f32) -> (f32, f32) {
    let lower = ((1.0 - sigma) * median).max(0.0).floor();
    let upper = ((1.0 + sigma) * median).min(255.0).floor();
    let lower = lower.max(1.0);
    (lower, upper.max(lower))
}

/// Binary edge map (0 or 255) of `img` using median-derived thresholds.
///
/// Constant images and images too small for a 3x3 gradient produce an empty
/// map of the same size.
pub fn auto_canny(img: &GrayImage, cfg: &EdgeConfig) -> GrayImage {
    let (width, height) = img.dimensions();
    let raw = img.as_raw();
    let flat = match raw.first() {
        Some(&first) => raw.iter().all(|&v| v == first),
        None => true,
    };
    if width < 3 || height < 3 || flat {
        return GrayImage::new(width, height);
    }
    let median = median_u8(raw).unwrap_or(0.0);
    let (lower, upper) = auto_thresholds(median, cfg.sigma);
    canny(img, lower, upper)
}
