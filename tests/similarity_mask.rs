use lorde::color::{rgb_to_hsv, similarity_map_from_slice};
use lorde::{similarity_map, ColorOrder, Frame, HsvColor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn exact_target_pixels_are_maximally_similar_at_any_size() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let width = rng.random_range(1..40usize);
        let height = rng.random_range(1..30usize);
        let target_rgb = [rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>()];
        let target = rgb_to_hsv(target_rgb[0], target_rgb[1], target_rgb[2]);

        let mut color = Vec::with_capacity(width * height * 3);
        let mut is_target = Vec::with_capacity(width * height);
        for _ in 0..width * height {
            if rng.random_bool(0.3) {
                color.extend_from_slice(&target_rgb);
                is_target.push(true);
            } else {
                color.extend_from_slice(&[rng.random(), rng.random(), rng.random()]);
                is_target.push(false);
            }
        }

        let map = similarity_map_from_slice(&color, width, height, ColorOrder::Rgb, target).unwrap();
        assert_eq!(map.dimensions(), (width as u32, height as u32));
        for (pixel, &hit) in map.as_raw().iter().zip(&is_target) {
            if hit {
                assert_eq!(*pixel, 255);
            }
        }
    }
}

#[test]
fn hue_distance_wraps_around_red() {
    // pure red against two reds on either side of the hue seam
    let color = [255u8, 0, 0, 255, 0, 12, 255, 12, 0, 0, 0, 255];
    let map = similarity_map_from_slice(&color, 4, 1, ColorOrder::Rgb, HsvColor::RED).unwrap();
    let raw = map.as_raw();
    assert_eq!(raw[0], 255);
    assert!(raw[1] > 200, "magenta-red scored {}", raw[1]);
    assert!(raw[2] > 200, "orange-red scored {}", raw[2]);
    assert_eq!(raw[3], 0);
}

#[test]
fn frame_similarity_respects_channel_order() {
    let rgb = vec![255u8, 0, 0, 0, 0, 255];
    let bgr = vec![0u8, 0, 255, 255, 0, 0];
    let rgb_frame = Frame::new(2, 1, rgb, vec![0; 2]).unwrap();
    let bgr_frame = Frame::new(2, 1, bgr, vec![0; 2])
        .unwrap()
        .with_color_order(ColorOrder::Bgr);
    let a = similarity_map(&rgb_frame, HsvColor::RED).unwrap();
    let b = similarity_map(&bgr_frame, HsvColor::RED).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_raw(), &vec![255u8, 0]);
}
