//! Edge templates cut from the reference region.

use crate::edges::{auto_canny, EdgeConfig};
use crate::frame::PixelBox;
use crate::image::{crop_gray, ImageView};
use crate::util::LordeResult;
use image::GrayImage;

pub(crate) mod plan;

pub use plan::{Tap, TemplatePlan};

/// Immutable edge map of the reference object, used as the matching kernel.
#[derive(Clone, Debug)]
pub struct Template {
    edges: GrayImage,
    plan: TemplatePlan,
}

impl Template {
    /// Wraps an existing edge map.
    pub fn from_edges(edges: GrayImage) -> LordeResult<Self> {
        let plan = TemplatePlan::from_view(ImageView::from_gray(&edges)?)?;
        Ok(Self { edges, plan })
    }

    /// Extracts the edge map of `bbox` from a similarity map.
    pub fn from_region(
        similarity: &GrayImage,
        bbox: &PixelBox,
        cfg: &EdgeConfig,
    ) -> LordeResult<Self> {
        let crop = crop_gray(similarity, bbox)?;
        Self::from_edges(auto_canny(&crop, cfg))
    }

    pub fn width(&self) -> usize {
        self.plan.width()
    }

    pub fn height(&self) -> usize {
        self.plan.height()
    }

    /// The template edge map.
    pub fn edges(&self) -> &GrayImage {
        &self.edges
    }

    pub(crate) fn plan(&self) -> &TemplatePlan {
        &self.plan
    }
}
