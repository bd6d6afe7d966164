//! Rayon-parallel ZNCC scan (feature-gated).
//!
//! Rows of placements are scored in parallel and their summaries merged in
//! row order, so the result is identical to the scalar scan.

use crate::kernel::scalar::{placement_range, scan_row};
use crate::kernel::sums::WindowSums;
use crate::kernel::{ResponseSummary, ScanParams};
use crate::template::TemplatePlan;
use crate::util::LordeResult;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan for the ZNCC kernel.
pub fn zncc_scan_full_par(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    params: ScanParams,
) -> LordeResult<ResponseSummary> {
    let (max_x, max_y) = placement_range(image, plan)?;
    let sums = WindowSums::from_view(image)?;
    let rows: Vec<ResponseSummary> = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut summary = ResponseSummary::default();
            scan_row(image, plan, &sums, y, max_x, params, &mut summary);
            summary
        })
        .collect();
    Ok(rows
        .into_iter()
        .fold(ResponseSummary::default(), ResponseSummary::merge))
}
