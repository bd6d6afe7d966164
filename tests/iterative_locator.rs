use image::{GrayImage, Luma};
use lorde::{
    EdgeConfig, LocateConfig, LordeError, MatchConfig, MultiScaleMatcher, ObjectLocator,
    PixelBox, Template,
};

fn two_squares() -> GrayImage {
    let mut img = GrayImage::new(96, 64);
    for (x0, y0, side) in [(8u32, 8u32, 16u32), (60, 40, 8)] {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    }
    img
}

fn locator(image: &GrayImage, max_objects: usize) -> ObjectLocator {
    let roi = PixelBox::new(4, 4, 28, 28).unwrap();
    let template = Template::from_region(image, &roi, &EdgeConfig::default()).unwrap();
    let matcher = MultiScaleMatcher::new(template).with_config(MatchConfig {
        max_scale: 2.0,
        num_scales: 5,
        ..MatchConfig::default()
    });
    ObjectLocator::new(matcher).with_config(LocateConfig {
        max_objects,
        ..LocateConfig::default()
    })
}

#[test]
fn finds_near_instance_then_far_instance() {
    let image = two_squares();
    let found = locator(&image, 2).locate(&image).unwrap();
    assert_eq!(found.len(), 2);

    let near = found[0];
    let far = found[1];
    assert_eq!(near.bbox, PixelBox::new(4, 4, 28, 28).unwrap());
    assert!(!near.bbox.overlaps(&far.bbox), "{near:?} / {far:?}");
    assert!(far.bbox.width() < near.bbox.width(), "{far:?}");
    assert!(far.scale_ratio < near.scale_ratio);

    let cx = (far.bbox.x1 + far.bbox.x2) as f64 / 2.0;
    let cy = (far.bbox.y1 + far.bbox.y2) as f64 / 2.0;
    assert!((cx - 64.0).abs() <= 3.0 && (cy - 44.0).abs() <= 3.0, "{far:?}");
}

#[test]
fn caller_image_is_left_untouched() {
    let image = two_squares();
    let before = image.clone();
    locator(&image, 2).locate(&image).unwrap();
    assert_eq!(image, before);
}

#[test]
fn single_object_skips_erasure() {
    let image = two_squares();
    let found = locator(&image, 1).locate(&image).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].bbox, PixelBox::new(4, 4, 28, 28).unwrap());
}

#[test]
fn zero_objects_is_invalid() {
    let image = two_squares();
    let err = locator(&image, 0).locate(&image).unwrap_err();
    assert!(matches!(err, LordeError::InvalidInput(_)));
}

#[test]
fn search_fails_once_nothing_is_left() {
    let mut image = GrayImage::new(96, 64);
    for y in 8..24 {
        for x in 8..24 {
            image.put_pixel(x, y, Luma([255]));
        }
    }
    let err = locator(&image, 2).locate(&image).unwrap_err();
    assert!(matches!(err, LordeError::NoMatchFound { .. }), "{err:?}");
}
