//! Search strategies for locating template matches.
//!
//! `MultiScaleMatcher` sweeps enlargements of the search image and returns
//! the single best placement; `ObjectLocator` repeats that search, erasing
//! each found instance before looking for the next.

use crate::edges::EdgeConfig;
use crate::frame::PixelBox;

mod locate;
mod multiscale;

pub use locate::{LocateConfig, ObjectLocator};
pub use multiscale::MultiScaleMatcher;

/// Configuration for the multi-scale sweep.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Largest enlargement factor of the search image (at least 1).
    pub max_scale: f64,
    /// Number of linearly spaced factors in `[1, max_scale]`.
    pub num_scales: usize,
    /// Edge extraction applied to each enlarged image.
    pub edge: EdgeConfig,
    /// Windows with energy at or below this value are not scored.
    pub min_var_i: f32,
    /// Surfaces whose scores all lie within this band are treated as flat.
    pub flat_tolerance: f32,
    /// Use the rayon row-parallel scan. Only honored with the `rayon`
    /// feature, which also turns it on by default.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_scale: 4.0,
            num_scales: 61,
            edge: EdgeConfig::default(),
            min_var_i: 1e-8,
            flat_tolerance: 1e-6,
            parallel: cfg!(feature = "rayon"),
        }
    }
}

/// Matched object instance in original-frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchBox {
    pub bbox: PixelBox,
    /// Original width divided by the enlarged width that produced the match.
    pub scale_ratio: f64,
    /// ZNCC score of the match.
    pub score: f32,
}
