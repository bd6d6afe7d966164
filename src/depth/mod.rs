//! Depth inference from apparent size.
//!
//! The reference box's physical extent is recovered from its sensor depth
//! with the pinhole relation `size = 2 d tan(angle / 2)`. The target is
//! assumed to be the same object, so inverting the relation with the
//! target's angular extent yields its depth.

use crate::frame::PixelBox;
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::math::median_u16;
use crate::util::{LordeError, LordeResult};

/// Sensor constants for one color/depth configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    degrees_per_pixel: f64,
    depth_unit_scale: f64,
}

impl Calibration {
    /// Validates and stores the angular resolution and depth unit scale.
    pub fn new(degrees_per_pixel: f64, depth_unit_scale: f64) -> LordeResult<Self> {
        if !degrees_per_pixel.is_finite() || degrees_per_pixel <= 0.0 {
            return Err(LordeError::InvalidInput(
                "degrees_per_pixel must be finite and positive",
            ));
        }
        if !depth_unit_scale.is_finite() || depth_unit_scale <= 0.0 {
            return Err(LordeError::InvalidInput(
                "depth_unit_scale must be finite and positive",
            ));
        }
        Ok(Self {
            degrees_per_pixel,
            depth_unit_scale,
        })
    }

    pub fn degrees_per_pixel(&self) -> f64 {
        self.degrees_per_pixel
    }

    pub fn depth_unit_scale(&self) -> f64 {
        self.depth_unit_scale
    }

    /// Angular extent in radians of a span of `pixels`.
    pub fn angle_rad(&self, pixels: usize) -> f64 {
        (pixels as f64 * self.degrees_per_pixel).to_radians()
    }
}

/// Range of raw depth samples treated as valid measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthConfig {
    pub min_valid_raw: u16,
    pub max_valid_raw: u16,
}

impl Default for DepthConfig {
    fn default() -> Self {
        // zero is the sensor's "no return" value
        Self {
            min_valid_raw: 1,
            max_valid_raw: u16::MAX,
        }
    }
}

/// Depth of one matched box in physical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthEstimate {
    /// Depth inferred from apparent size; `None` for the reference box.
    pub computed: Option<f64>,
    /// Median sensor depth in the box; `None` when the sensor has no valid
    /// sample there.
    pub sensor: Option<f64>,
}

/// Median valid depth inside `bbox`, scaled to physical units.
pub fn sensor_depth(
    depth: ImageView<'_, u16>,
    bbox: &PixelBox,
    calibration: &Calibration,
    cfg: &DepthConfig,
) -> Option<f64> {
    let mut samples: Vec<u16> = depth
        .box_rows(bbox)
        .flat_map(|row| row.iter().copied())
        .filter(|&v| v >= cfg.min_valid_raw && v <= cfg.max_valid_raw)
        .collect();
    median_u16(&mut samples).map(|raw| raw * calibration.depth_unit_scale())
}

/// `2 tan(angle / 2)` for the span, rejecting spans that cannot be inverted.
fn chord_factor(pixels: usize, calibration: &Calibration) -> LordeResult<f64> {
    if pixels == 0 {
        return Err(LordeError::DegenerateGeometry {
            reason: "box has zero pixel extent",
        });
    }
    let angle = calibration.angle_rad(pixels);
    let factor = 2.0 * (angle / 2.0).tan();
    if angle >= std::f64::consts::PI || !factor.is_finite() || factor <= 0.0 {
        return Err(LordeError::DegenerateGeometry {
            reason: "angular extent outside the open range (0, 180) degrees",
        });
    }
    Ok(factor)
}

/// Triangulates the depth of `target` from the sensor-measured `reference`.
///
/// Returns `[reference, target]` estimates. The reference box must hold
/// valid depth samples; the target's sensor depth is reported when present.
pub fn triangulate(
    depth: ImageView<'_, u16>,
    reference: &PixelBox,
    target: &PixelBox,
    calibration: &Calibration,
    cfg: &DepthConfig,
) -> LordeResult<[DepthEstimate; 2]> {
    let _span = trace_span!("triangulate").entered();

    let ref_h = chord_factor(reference.height(), calibration)?;
    let ref_w = chord_factor(reference.width(), calibration)?;
    let tgt_h = chord_factor(target.height(), calibration)?;
    let tgt_w = chord_factor(target.width(), calibration)?;

    let ref_depth =
        sensor_depth(depth, reference, calibration, cfg).ok_or(LordeError::EmptyDepthSample {
            x1: reference.x1,
            y1: reference.y1,
            x2: reference.x2,
            y2: reference.y2,
        })?;
    let tgt_sensor = sensor_depth(depth, target, calibration, cfg);

    let physical_h = ref_depth * ref_h;
    let physical_w = ref_depth * ref_w;
    let from_height = physical_h / tgt_h;
    let from_width = physical_w / tgt_w;
    let computed = (from_height + from_width) / 2.0;

    trace_event!(
        "triangulated",
        reference_depth = ref_depth,
        physical_height = physical_h,
        physical_width = physical_w,
        depth_from_height = from_height,
        depth_from_width = from_width,
        computed = computed
    );

    Ok([
        DepthEstimate {
            computed: None,
            sensor: Some(ref_depth),
        },
        DepthEstimate {
            computed: Some(computed),
            sensor: tgt_sensor,
        },
    ])
}
