//! Summed-area tables for constant-time window statistics.

use crate::util::{LordeError, LordeResult};
use crate::ImageView;
use image::GrayImage;
use imageproc::integral_image::{integral_image, integral_squared_image};

/// Plain and squared running sums of a search image.
///
/// Both tables are one row and one column larger than the image, with a zero
/// first row and column.
#[derive(Clone, Debug)]
pub struct WindowSums {
    table_width: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl WindowSums {
    pub fn from_view(image: ImageView<'_, u8>) -> LordeResult<Self> {
        let (width, height) = (image.width(), image.height());
        let mut packed = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = image.row(y).ok_or(LordeError::BufferTooSmall {
                needed: width * height,
                got: packed.len(),
            })?;
            packed.extend_from_slice(row);
        }
        let gray = GrayImage::from_raw(width as u32, height as u32, packed)
            .ok_or(LordeError::InvalidDimensions { width, height })?;
        Ok(Self::from_gray(&gray))
    }

    pub fn from_gray(image: &GrayImage) -> Self {
        let sum = integral_image::<_, u64>(image);
        let sum_sq = integral_squared_image::<_, u64>(image);
        Self {
            table_width: image.width() as usize + 1,
            sum: sum.into_raw(),
            sum_sq: sum_sq.into_raw(),
        }
    }

    /// `(sum, sum of squares)` of the `width`×`height` window at `(x, y)`.
    ///
    /// The window must lie inside the image the tables were built from.
    #[inline]
    pub fn window(&self, x: usize, y: usize, width: usize, height: usize) -> (u64, u64) {
        let tw = self.table_width;
        let top_left = y * tw + x;
        let top_right = top_left + width;
        let bottom_left = (y + height) * tw + x;
        let bottom_right = bottom_left + width;
        let rect = |t: &[u64]| (t[bottom_right] + t[top_left]) - (t[top_right] + t[bottom_left]);
        (rect(&self.sum), rect(&self.sum_sq))
    }
}
