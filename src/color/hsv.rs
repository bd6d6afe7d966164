//! 8-bit RGB to HSV conversion.
//!
//! Hue is stored on a `[0, 180)` scale (degrees halved) so that it fits a
//! byte; saturation and value use `[0, 255]`.

/// Number of hue units in a full turn of the 8-bit hue scale.
pub const HUE_PERIOD: f32 = 180.0;

/// Color in 8-bit HSV coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvColor {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl HsvColor {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Fully saturated, fully bright red.
    pub const RED: HsvColor = HsvColor::new(0, 255, 255);
}

impl Default for HsvColor {
    fn default() -> Self {
        Self::RED
    }
}

/// Converts one RGB pixel to HSV, rounding each channel to the nearest unit.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> HsvColor {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max > 0.0 {
        (255.0 * delta / max).round()
    } else {
        0.0
    };

    let mut hue_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if hue_deg < 0.0 {
        hue_deg += 360.0;
    }
    let h = (hue_deg / 2.0).round() % HUE_PERIOD;

    HsvColor {
        h: h as u8,
        s: s as u8,
        v: max as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::{rgb_to_hsv, HsvColor};

    #[test]
    fn primaries_land_on_expected_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), HsvColor::new(0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), HsvColor::new(60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), HsvColor::new(120, 255, 255));
    }

    #[test]
    fn grays_have_no_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), HsvColor::new(0, 0, 0));
        assert_eq!(rgb_to_hsv(128, 128, 128), HsvColor::new(0, 0, 128));
    }

    #[test]
    fn near_red_magenta_wraps_to_top_of_scale() {
        let hsv = rgb_to_hsv(255, 0, 10);
        assert!(hsv.h >= 177, "got {hsv:?}");
    }
}
