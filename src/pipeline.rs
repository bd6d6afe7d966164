//! One-shot depth estimation for a selected region.
//!
//! `DepthEstimator` composes the stages: similarity map, edge template from
//! the region, iterative matching, triangulation. It keeps only immutable
//! settings, so one estimator can serve every region selection of a session.

use crate::color::{similarity_map, HsvColor};
use crate::depth::{triangulate, Calibration, DepthConfig, DepthEstimate};
use crate::frame::{Frame, Region};
use crate::search::{LocateConfig, MatchBox, MatchConfig, MultiScaleMatcher, ObjectLocator};
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::{LordeError, LordeResult};

/// Settings for every pipeline stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineConfig {
    /// Color the similarity map is computed against.
    pub target: HsvColor,
    pub matching: MatchConfig,
    pub locate: LocateConfig,
    pub depth: DepthConfig,
}

/// Matched boxes and their depths, index-aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthReport {
    pub matched_boxes: Vec<MatchBox>,
    pub depth_estimates: Vec<DepthEstimate>,
}

impl DepthReport {
    /// Triangulated depth of the far instance.
    pub fn target_depth(&self) -> Option<f64> {
        self.depth_estimates.get(1).and_then(|e| e.computed)
    }
}

/// Estimates far-object depth from a near instance of the same object.
#[derive(Clone, Debug)]
pub struct DepthEstimator {
    calibration: Calibration,
    cfg: PipelineConfig,
}

impl DepthEstimator {
    pub fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            cfg: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: PipelineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Runs the full pipeline for `region` of `frame`.
    ///
    /// The region is the reference (near) object; the report's first entry
    /// describes it and the second the farther instance found elsewhere.
    pub fn estimate(&self, frame: &Frame, region: Region) -> LordeResult<DepthReport> {
        let roi = region.normalize(frame.width(), frame.height())?;
        if self.cfg.locate.max_objects != 2 {
            return Err(LordeError::InvalidInput(
                "triangulation needs exactly one near and one far instance",
            ));
        }
        let _span = trace_span!(
            "estimate",
            x1 = roi.x1,
            y1 = roi.y1,
            x2 = roi.x2,
            y2 = roi.y2
        )
        .entered();

        let similarity = similarity_map(frame, self.cfg.target)?;
        let template = Template::from_region(&similarity, &roi, &self.cfg.matching.edge)?;
        let locator = ObjectLocator::new(
            MultiScaleMatcher::new(template).with_config(self.cfg.matching),
        )
        .with_config(self.cfg.locate);
        let matched_boxes = locator.locate(&similarity)?;

        let (reference, target) = match matched_boxes.as_slice() {
            [reference, target] => (reference.bbox, target.bbox),
            _ => {
                return Err(LordeError::NoMatchFound {
                    reason: "locator returned fewer than two instances",
                })
            }
        };
        let estimates = triangulate(
            frame.depth_view(),
            &reference,
            &target,
            &self.calibration,
            &self.cfg.depth,
        )?;
        trace_event!(
            "estimate_done",
            reference_depth = estimates[0].sensor.unwrap_or(f64::NAN),
            target_depth = estimates[1].computed.unwrap_or(f64::NAN)
        );

        Ok(DepthReport {
            matched_boxes,
            depth_estimates: estimates.to_vec(),
        })
    }
}
