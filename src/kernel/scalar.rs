//! Scalar reference ZNCC kernel.

use crate::kernel::sums::WindowSums;
use crate::kernel::{Kernel, ResponseSummary, ScanParams};
use crate::template::plan::centered_energy;
use crate::template::TemplatePlan;
use crate::util::{LordeError, LordeResult};
use crate::ImageView;

/// Scalar zero-mean normalized cross-correlation.
pub struct ZnccScalar;

/// Placement range `(max_x, max_y)` of `plan` inside `image`.
pub(crate) fn placement_range(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> LordeResult<(usize, usize)> {
    if image.width() < plan.width() || image.height() < plan.height() {
        return Err(LordeError::InvalidInput("template larger than image"));
    }
    Ok((image.width() - plan.width(), image.height() - plan.height()))
}

/// Scores one placement; `None` when the window has no energy.
///
/// Window sums come from `sums`; the cross term visits only the template's
/// non-zero taps.
#[inline]
fn zncc_window(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    sums: &WindowSums,
    x: usize,
    y: usize,
    min_var_i: f32,
) -> Option<f32> {
    let (sum_i, sum_i2) = sums.window(x, y, plan.width(), plan.height());
    let var_i = centered_energy(sum_i, sum_i2, plan.len());
    if var_i <= f64::from(min_var_i) {
        return None;
    }

    let stride = image.stride();
    let base = y * stride + x;
    let mut cross = 0u64;
    for tap in plan.taps() {
        let value = *image.data.get(base + tap.dy * stride + tap.dx)?;
        cross += u64::from(tap.value) * u64::from(value);
    }

    let dot = cross as f64 - plan.mean() * sum_i as f64;
    let score = (dot / (plan.var_t() * var_i).sqrt()) as f32;
    score.is_finite().then_some(score)
}

/// Scans all placements with top-left row `y`, appending to `summary`.
pub(crate) fn scan_row(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    sums: &WindowSums,
    y: usize,
    max_x: usize,
    params: ScanParams,
    summary: &mut ResponseSummary,
) {
    for x in 0..=max_x {
        if let Some(score) = zncc_window(image, plan, sums, x, y, params.min_var_i) {
            summary.push(x, y, score);
        }
    }
}

impl Kernel for ZnccScalar {
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32 {
        let sums = match WindowSums::from_view(image) {
            Ok(sums) => sums,
            Err(_) => return f32::NEG_INFINITY,
        };
        match placement_range(image, plan) {
            Ok((max_x, max_y)) if x <= max_x && y <= max_y => {
                zncc_window(image, plan, &sums, x, y, min_var_i).unwrap_or(f32::NEG_INFINITY)
            }
            _ => f32::NEG_INFINITY,
        }
    }

    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        params: ScanParams,
    ) -> LordeResult<ResponseSummary> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let sums = WindowSums::from_view(image)?;
        let mut summary = ResponseSummary::default();
        for y in 0..=max_y {
            scan_row(image, plan, &sums, y, max_x, params, &mut summary);
        }
        Ok(summary)
    }
}
