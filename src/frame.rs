//! Frames, regions of interest and pixel boxes.
//!
//! A `Frame` is the caller-owned snapshot handed over by the frame source: a
//! color plane and a depth plane of identical resolution, already aligned.
//! `Region` is the raw rectangle a UI produces; `PixelBox` is the validated,
//! frame-relative form every pipeline stage works with.

use crate::image::ImageView;
use crate::util::{LordeError, LordeResult};

/// Channel order of an interleaved 3-channel color plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Aligned color and depth planes captured at the same instant.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    color: Vec<u8>,
    depth: Vec<u16>,
    order: ColorOrder,
}

impl Frame {
    /// Builds a frame from an interleaved RGB plane and a depth plane.
    ///
    /// Both planes must describe exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, color: Vec<u8>, depth: Vec<u16>) -> LordeResult<Self> {
        if width == 0 || height == 0 {
            return Err(LordeError::InvalidDimensions { width, height });
        }
        let pixels = width
            .checked_mul(height)
            .ok_or(LordeError::InvalidDimensions { width, height })?;
        let color_len = pixels
            .checked_mul(3)
            .ok_or(LordeError::InvalidDimensions { width, height })?;
        if color.len() != color_len {
            return Err(LordeError::PlaneLength {
                plane: "color",
                needed: color_len,
                got: color.len(),
            });
        }
        if depth.len() != pixels {
            return Err(LordeError::PlaneLength {
                plane: "depth",
                needed: pixels,
                got: depth.len(),
            });
        }
        Ok(Self {
            width,
            height,
            color,
            depth,
            order: ColorOrder::Rgb,
        })
    }

    /// Declares the channel order of the color plane.
    pub fn with_color_order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color_order(&self) -> ColorOrder {
        self.order
    }

    /// Interleaved color bytes, three per pixel, row-major.
    pub fn color(&self) -> &[u8] {
        &self.color
    }

    /// Raw depth samples in sensor units, row-major.
    pub fn depth(&self) -> &[u16] {
        &self.depth
    }

    /// Borrowed view of the depth plane.
    pub fn depth_view(&self) -> ImageView<'_, u16> {
        ImageView {
            data: &self.depth,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

/// Caller-selected rectangle with exclusive `x2`/`y2`, possibly unordered or
/// partly outside the frame.
///
/// Normalization clips a partly outside region to the frame instead of
/// rejecting it; only a region with nothing left inside is `InvalidRoi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Region {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Orders the corners and clips the rectangle to a `width`×`height` frame.
    ///
    /// A region that is empty after clipping (zero area or entirely outside
    /// the frame) is rejected.
    pub fn normalize(&self, width: usize, height: usize) -> LordeResult<PixelBox> {
        let reject = |reason| LordeError::InvalidRoi {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
            reason,
        };
        let (lx, hx) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (ly, hy) = (self.y1.min(self.y2), self.y1.max(self.y2));
        if lx == hx || ly == hy {
            return Err(reject("zero area"));
        }
        let clip = |v: i64, max: usize| v.clamp(0, max as i64) as usize;
        let bbox = PixelBox {
            x1: clip(lx, width),
            y1: clip(ly, height),
            x2: clip(hx, width),
            y2: clip(hy, height),
        };
        if bbox.is_empty() {
            return Err(reject("outside frame bounds"));
        }
        Ok(bbox)
    }
}

/// Axis-aligned box in frame pixels, `x1 <= x2`, `y1 <= y2`, exclusive end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBox {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl PixelBox {
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> LordeResult<Self> {
        if x1 > x2 || y1 > y2 {
            return Err(LordeError::InvalidInput("box corners are reversed"));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> usize {
        self.x2 - self.x1
    }

    pub fn height(&self) -> usize {
        self.y2 - self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns true if the two boxes share at least one pixel.
    pub fn overlaps(&self, other: &PixelBox) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, PixelBox, Region};
    use crate::util::LordeError;

    #[test]
    fn normalize_orders_and_clips_corners() {
        let bbox = Region::new(30, 25, -5, 4).normalize(20, 20).unwrap();
        assert_eq!(bbox, PixelBox::new(0, 4, 20, 20).unwrap());
    }

    #[test]
    fn normalize_rejects_empty_regions() {
        let err = Region::new(5, 5, 5, 9).normalize(20, 20).unwrap_err();
        assert!(matches!(err, LordeError::InvalidRoi { reason: "zero area", .. }));
        let err = Region::new(25, 2, 40, 9).normalize(20, 20).unwrap_err();
        assert!(matches!(
            err,
            LordeError::InvalidRoi {
                reason: "outside frame bounds",
                ..
            }
        ));
    }

    #[test]
    fn frame_rejects_mismatched_planes() {
        let err = Frame::new(4, 2, vec![0; 24], vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            LordeError::PlaneLength {
                plane: "depth",
                needed: 8,
                got: 5,
            }
        );
        let err = Frame::new(4, 2, vec![0; 25], vec![0; 8]).unwrap_err();
        assert_eq!(
            err,
            LordeError::PlaneLength {
                plane: "color",
                needed: 24,
                got: 25,
            }
        );
    }

    #[test]
    fn partly_outside_region_is_clipped() {
        let bbox = Region::new(-6, 12, 8, 30).normalize(20, 16).unwrap();
        assert_eq!(bbox, PixelBox::new(0, 12, 8, 16).unwrap());
    }

    #[test]
    fn overlap_requires_shared_pixels() {
        let a = PixelBox::new(0, 0, 4, 4).unwrap();
        let b = PixelBox::new(4, 0, 8, 4).unwrap();
        let c = PixelBox::new(3, 3, 5, 5).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
