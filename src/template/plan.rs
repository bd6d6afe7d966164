//! Template plan precomputation for ZNCC scoring.
//!
//! Edge templates are mostly zero, so the plan keeps only the non-zero
//! pixels as taps. The correlation numerator `sum((t - mean) * i)` is then
//! `sum(t * i over taps) - mean * sum(i)`, where `sum(i)` comes from a
//! summed-area table of the search image.

use crate::image::ImageView;
use crate::util::{LordeError, LordeResult};

/// Non-zero template pixel at offset `(dx, dy)` from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tap {
    pub dx: usize,
    pub dy: usize,
    pub value: u8,
}

/// Template statistics and taps, computed once per template.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_t: f64,
    taps: Vec<Tap>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// A template with zero variance cannot be correlated and is rejected.
    pub fn from_view(tpl: ImageView<'_, u8>) -> LordeResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(LordeError::InvalidDimensions { width, height })?;

        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        let mut taps = Vec::new();
        for dy in 0..height {
            let row = tpl.row(dy).ok_or(LordeError::BufferTooSmall {
                needed: count,
                got: dy * width,
            })?;
            for (dx, &value) in row.iter().enumerate() {
                if value != 0 {
                    sum += u64::from(value);
                    sum_sq += u64::from(value) * u64::from(value);
                    taps.push(Tap { dx, dy, value });
                }
            }
        }

        let n = count as f64;
        let mean = sum as f64 / n;
        let var_t = centered_energy(sum, sum_sq, count);
        if var_t <= 1e-8 {
            return Err(LordeError::NoMatchFound {
                reason: "template has zero variance",
            });
        }

        Ok(Self {
            width,
            height,
            mean,
            var_t,
            taps,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of template pixels.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean intensity of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared zero-mean template values.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Non-zero template pixels in row-major order.
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }
}

/// `sum((v - mean)^2)` from the plain and squared sums of `count` values,
/// evaluated in integers so constant inputs give exactly zero.
pub(crate) fn centered_energy(sum: u64, sum_sq: u64, count: usize) -> f64 {
    let n = count as u128;
    let scaled = n * u128::from(sum_sq) - u128::from(sum) * u128::from(sum);
    scaled as f64 / n as f64
}
