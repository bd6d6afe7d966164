//! Error types for lorde.

use thiserror::Error;

/// Result alias for lorde operations.
pub type LordeResult<T> = std::result::Result<T, LordeError>;

/// Errors that can occur when running the depth estimation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LordeError {
    /// Width or height is zero, or the element count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A frame plane does not hold exactly one sample per pixel.
    #[error("{plane} plane holds {got} elements, expected {needed}")]
    PlaneLength {
        plane: &'static str,
        needed: usize,
        got: usize,
    },
    /// Color and depth images of a frame disagree on resolution.
    #[error(
        "frame planes differ: color {color_width}x{color_height}, depth {depth_width}x{depth_height}"
    )]
    PlaneMismatch {
        color_width: usize,
        color_height: usize,
        depth_width: usize,
        depth_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The region of interest is empty after normalization to the frame.
    #[error("invalid region ({x1}, {y1})-({x2}, {y2}): {reason}")]
    InvalidRoi {
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        reason: &'static str,
    },
    /// The multi-scale sweep could not place the template anywhere.
    #[error("no match found: {reason}")]
    NoMatchFound { reason: &'static str },
    /// Box geometry cannot be triangulated.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: &'static str },
    /// No depth sample inside the box falls in the valid range.
    #[error("no valid depth samples in box ({x1}, {y1})-({x2}, {y2})")]
    EmptyDepthSample {
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    },
    /// Image decoding or encoding through the `image` crate failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
