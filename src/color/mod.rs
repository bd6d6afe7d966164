//! Color-similarity masking.
//!
//! Every pixel of a color frame is scored by its HSV distance to a target
//! color: circular distance on hue, plain differences on saturation and
//! value, combined as a Euclidean norm. Distances are normalized by the
//! frame-wide maximum and inverted, so 255 marks the closest pixels.

mod hsv;

pub use hsv::{rgb_to_hsv, HsvColor, HUE_PERIOD};

use crate::frame::{ColorOrder, Frame};
use crate::trace::{trace_event, trace_span};
use crate::util::math::hue_distance;
use crate::util::{LordeError, LordeResult};
use image::GrayImage;

/// Builds the similarity map of `frame` against `target`.
pub fn similarity_map(frame: &Frame, target: HsvColor) -> LordeResult<GrayImage> {
    similarity_map_from_slice(
        frame.color(),
        frame.width(),
        frame.height(),
        frame.color_order(),
        target,
    )
}

/// Builds a similarity map from an interleaved 3-channel buffer.
pub fn similarity_map_from_slice(
    color: &[u8],
    width: usize,
    height: usize,
    order: ColorOrder,
    target: HsvColor,
) -> LordeResult<GrayImage> {
    let _span = trace_span!("similarity_map", width = width, height = height).entered();
    if width == 0 || height == 0 {
        return Err(LordeError::InvalidDimensions { width, height });
    }
    let needed = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(LordeError::InvalidDimensions { width, height })?;
    if color.len() != needed {
        return Err(LordeError::BufferTooSmall {
            needed,
            got: color.len(),
        });
    }

    let th = f32::from(target.h);
    let ts = f32::from(target.s);
    let tv = f32::from(target.v);
    let distances: Vec<f32> = color
        .chunks_exact(3)
        .map(|px| {
            let hsv = match order {
                ColorOrder::Rgb => rgb_to_hsv(px[0], px[1], px[2]),
                ColorOrder::Bgr => rgb_to_hsv(px[2], px[1], px[0]),
            };
            let dh = hue_distance(f32::from(hsv.h), th, HUE_PERIOD);
            let ds = f32::from(hsv.s) - ts;
            let dv = f32::from(hsv.v) - tv;
            (dh * dh + ds * ds + dv * dv).sqrt()
        })
        .collect();

    let max = distances.iter().copied().fold(0.0f32, f32::max);
    trace_event!("similarity_range", max_distance = max);
    let pixels: Vec<u8> = if max > 0.0 {
        distances
            .iter()
            .map(|&d| 255 - (255.0 * d / max) as u8)
            .collect()
    } else {
        vec![255; distances.len()]
    };

    GrayImage::from_raw(width as u32, height as u32, pixels)
        .ok_or(LordeError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{similarity_map_from_slice, HsvColor};
    use crate::frame::ColorOrder;
    use crate::util::LordeError;

    #[test]
    fn farthest_pixel_maps_to_zero() {
        // red, blue, and a mid hue in between
        let color = [255, 0, 0, 0, 0, 255, 0, 255, 0];
        let map = similarity_map_from_slice(&color, 3, 1, ColorOrder::Rgb, HsvColor::RED).unwrap();
        assert_eq!(map.get_pixel(0, 0)[0], 255);
        // blue (hue 120) is 60 units from red, green (hue 60) is 60 units too
        assert_eq!(map.get_pixel(1, 0)[0], 0);
        assert_eq!(map.get_pixel(2, 0)[0], 0);
    }

    #[test]
    fn bgr_order_swaps_channels() {
        let color = [0, 0, 255, 255, 0, 0];
        let map = similarity_map_from_slice(&color, 2, 1, ColorOrder::Bgr, HsvColor::RED).unwrap();
        assert_eq!(map.get_pixel(0, 0)[0], 255);
        assert_eq!(map.get_pixel(1, 0)[0], 0);
    }

    #[test]
    fn uniform_frames_give_uniform_maps() {
        let color = [10u8, 200, 30].repeat(6);
        let map = similarity_map_from_slice(&color, 3, 2, ColorOrder::Rgb, HsvColor::RED).unwrap();
        assert!(map.pixels().all(|p| p[0] == 0));

        let color = [255u8, 0, 0].repeat(6);
        let map = similarity_map_from_slice(&color, 3, 2, ColorOrder::Rgb, HsvColor::RED).unwrap();
        assert!(map.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn rejects_short_buffers() {
        let err = similarity_map_from_slice(&[0u8; 5], 2, 1, ColorOrder::Rgb, HsvColor::RED);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let err = similarity_map_from_slice(&[], usize::MAX / 2, 2, ColorOrder::Rgb, HsvColor::RED)
            .unwrap_err();
        assert_eq!(
            err,
            LordeError::InvalidDimensions {
                width: usize::MAX / 2,
                height: 2,
            }
        );
    }
}
