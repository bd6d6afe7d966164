//! Numeric helpers shared by the masker, matcher and triangulator.

/// Circular distance between two hue values on a wheel of `period` units.
pub(crate) fn hue_distance(a: f32, b: f32, period: f32) -> f32 {
    let diff = (a - b).abs() % period;
    diff.min(period - diff)
}

/// Linearly spaced values from `start` to `end` inclusive.
///
/// A single sample yields `start`; zero samples yield an empty vector.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Median of `values`, averaging the middle pair for even lengths.
///
/// The slice is reordered in place. Returns `None` for an empty slice.
pub(crate) fn median_u16(values: &mut [u16]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(f64::from(values[mid]))
    } else {
        Some((f64::from(values[mid - 1]) + f64::from(values[mid])) / 2.0)
    }
}

/// Median intensity of an 8-bit buffer computed from its histogram.
pub(crate) fn median_u8(values: &[u8]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut hist = [0usize; 256];
    for &v in values {
        hist[v as usize] += 1;
    }
    let nth = |k: usize| -> f32 {
        let mut seen = 0usize;
        for (value, &count) in hist.iter().enumerate() {
            seen += count;
            if seen > k {
                return value as f32;
            }
        }
        255.0
    };
    let n = values.len();
    if n % 2 == 1 {
        Some(nth(n / 2))
    } else {
        Some((nth(n / 2 - 1) + nth(n / 2)) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{hue_distance, linspace, median_u16, median_u8};

    #[test]
    fn hue_distance_wraps_past_half_period() {
        assert_eq!(hue_distance(0.0, 179.0, 180.0), 1.0);
        assert_eq!(hue_distance(170.0, 10.0, 180.0), 20.0);
        assert_eq!(hue_distance(30.0, 120.0, 180.0), 90.0);
    }

    #[test]
    fn linspace_includes_both_ends() {
        let values = linspace(1.0, 2.0, 5);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 1.0);
        assert!((values[2] - 1.5).abs() < 1e-12);
        assert!((values[4] - 2.0).abs() < 1e-12);
        assert_eq!(linspace(1.0, 4.0, 1), vec![1.0]);
        assert!(linspace(1.0, 4.0, 0).is_empty());
    }

    #[test]
    fn medians_average_middle_pair() {
        let mut depth = [4u16, 1, 3, 2];
        assert_eq!(median_u16(&mut depth), Some(2.5));
        assert_eq!(median_u16(&mut []), None);
        assert_eq!(median_u8(&[9, 1, 5]), Some(5.0));
        assert_eq!(median_u8(&[0, 0, 255, 255]), Some(127.5));
    }
}
