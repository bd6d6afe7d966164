//! Correlation kernel implementations.

use crate::template::TemplatePlan;
use crate::util::LordeResult;
use crate::ImageView;

pub mod scalar;
pub mod sums;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Scan configuration for kernel evaluations.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Windows with energy at or below this value are skipped.
    pub min_var_i: f32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self { min_var_i: 1e-8 }
    }
}

/// Placement of the template's top-left corner and its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub x: usize,
    pub y: usize,
    pub score: f32,
}

/// Global statistics of one response surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponseSummary {
    /// Highest score, first in row-major order on ties.
    pub best: Option<Peak>,
    /// Lowest valid score.
    pub min_score: f32,
    /// Number of placements with a defined score.
    pub valid: usize,
}

impl Default for ResponseSummary {
    fn default() -> Self {
        Self {
            best: None,
            min_score: f32::INFINITY,
            valid: 0,
        }
    }
}

impl ResponseSummary {
    /// Records a placement; must be called in row-major order.
    pub fn push(&mut self, x: usize, y: usize, score: f32) {
        self.valid += 1;
        self.min_score = self.min_score.min(score);
        if self.best.map_or(true, |best| score > best.score) {
            self.best = Some(Peak { x, y, score });
        }
    }

    /// Appends a summary covering placements after all of `self`'s.
    pub fn merge(mut self, later: ResponseSummary) -> Self {
        self.valid += later.valid;
        self.min_score = self.min_score.min(later.min_score);
        if let Some(peak) = later.best {
            if self.best.map_or(true, |best| peak.score > best.score) {
                self.best = Some(peak);
            }
        }
        self
    }

    /// True if no placement has a score, or several do and they all agree
    /// within `tolerance`.
    pub fn is_degenerate(&self, tolerance: f32) -> bool {
        match self.best {
            None => true,
            Some(best) => self.valid > 1 && best.score - self.min_score <= tolerance,
        }
    }
}

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    /// Computes the score at a single placement (top-left coordinates).
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32;

    /// Scans every placement of the template inside the image.
    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        params: ScanParams,
    ) -> LordeResult<ResponseSummary>;
}
