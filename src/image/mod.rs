//! Image views and the buffer operations the matcher needs.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride
//! (elements between row starts). Owned grayscale buffers are plain
//! `image::GrayImage` values so they interoperate with `image` and `imageproc`.

use crate::frame::PixelBox;
use crate::util::{LordeError, LordeResult};
use image::GrayImage;

pub mod inpaint;
#[cfg(feature = "image-io")]
pub mod io;
pub mod resize;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    pub(crate) data: &'a [T],
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> LordeResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> LordeResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(LordeError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over the rows of `bbox`, each clipped to the view width.
    ///
    /// Rows below the view are skipped.
    pub fn box_rows(&self, bbox: &PixelBox) -> impl Iterator<Item = &'a [T]> + '_ {
        let x1 = bbox.x1.min(self.width);
        let x2 = bbox.x2.min(self.width);
        let y2 = bbox.y2.min(self.height);
        (bbox.y1..y2).filter_map(move |y| self.row(y).map(|row| &row[x1..x2.max(x1)]))
    }
}

impl<'a> ImageView<'a, u8> {
    /// Borrows a grayscale image buffer.
    pub fn from_gray(img: &'a GrayImage) -> LordeResult<Self> {
        Self::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> LordeResult<usize> {
    if width == 0 || height == 0 {
        return Err(LordeError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(LordeError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(LordeError::InvalidDimensions { width, height })
}

/// Copies the pixels of `bbox` out of `img`.
pub fn crop_gray(img: &GrayImage, bbox: &PixelBox) -> LordeResult<GrayImage> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    if bbox.is_empty() || bbox.x2 > width || bbox.y2 > height {
        return Err(LordeError::InvalidInput("crop box outside image"));
    }
    Ok(image::imageops::crop_imm(
        img,
        bbox.x1 as u32,
        bbox.y1 as u32,
        bbox.width() as u32,
        bbox.height() as u32,
    )
    .to_image())
}
