use lorde::{Calibration, Frame, ImageView, LordeError, PixelBox, Region};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        LordeError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        LordeError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];
    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        LordeError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u16; 3];
    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, LordeError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn padded_view_reads_rows_and_pixels() {
    let data: Vec<u16> = (0u16..12).collect();
    let view = ImageView::new(&data, 3, 3, 4).unwrap();
    assert_eq!(view.row(1).unwrap(), &[4u16, 5, 6]);
    assert_eq!(view.get(2, 2).copied(), Some(10));
    assert!(view.get(3, 0).is_none());
    assert!(view.row(3).is_none());
}

#[test]
fn frame_exposes_aligned_planes() {
    let color = vec![7u8; 5 * 4 * 3];
    let depth: Vec<u16> = (0..20).collect();
    let frame = Frame::new(5, 4, color, depth).unwrap();
    assert_eq!((frame.width(), frame.height()), (5, 4));
    let view = frame.depth_view();
    assert_eq!(view.get(4, 3).copied(), Some(19));
    assert_eq!(frame.color().len(), 60);
}

#[test]
fn frame_rejects_empty_dimensions() {
    let err = Frame::new(0, 4, Vec::new(), Vec::new()).unwrap_err();
    assert_eq!(
        err,
        LordeError::InvalidDimensions {
            width: 0,
            height: 4,
        }
    );
}

#[test]
fn region_inside_frame_is_kept_verbatim() {
    let bbox = Region::new(3, 4, 10, 12).normalize(64, 48).unwrap();
    assert_eq!(bbox, PixelBox::new(3, 4, 10, 12).unwrap());
    assert_eq!((bbox.width(), bbox.height()), (7, 8));
}

#[test]
fn region_fully_outside_frame_is_invalid() {
    for region in [
        Region::new(-20, -20, -5, -5),
        Region::new(70, 10, 90, 20),
        Region::new(10, 50, 20, 60),
    ] {
        let err = region.normalize(64, 48).unwrap_err();
        assert!(
            matches!(err, LordeError::InvalidRoi { .. }),
            "{region:?} gave {err:?}"
        );
    }
}

#[test]
fn region_straddling_the_border_is_clipped() {
    let bbox = Region::new(50, -10, 80, 20).normalize(64, 48).unwrap();
    assert_eq!(bbox, PixelBox::new(50, 0, 64, 20).unwrap());
    let bbox = Region::new(70, 60, 40, 30).normalize(64, 48).unwrap();
    assert_eq!(bbox, PixelBox::new(40, 30, 64, 48).unwrap());
}

#[test]
fn frame_reports_plane_lengths() {
    let err = Frame::new(3, 3, vec![0; 26], vec![0; 9]).unwrap_err();
    assert_eq!(
        err,
        LordeError::PlaneLength {
            plane: "color",
            needed: 27,
            got: 26,
        }
    );
}

#[test]
fn zero_area_region_is_invalid() {
    let err = Region::new(10, 10, 10, 30).normalize(64, 48).unwrap_err();
    assert_eq!(
        err,
        LordeError::InvalidRoi {
            x1: 10,
            y1: 10,
            x2: 10,
            y2: 30,
            reason: "zero area",
        }
    );
}

#[test]
fn pixel_box_rejects_reversed_corners() {
    assert!(PixelBox::new(5, 0, 4, 3).is_err());
    assert!(PixelBox::new(2, 2, 2, 2).unwrap().is_empty());
}

#[test]
fn calibration_keeps_constants() {
    let cal = Calibration::new(0.1491, 0.001).unwrap();
    assert_eq!(cal.degrees_per_pixel(), 0.1491);
    assert_eq!(cal.depth_unit_scale(), 0.001);
    assert!((cal.angle_rad(10) - 1.491f64.to_radians()).abs() < 1e-12);
}
