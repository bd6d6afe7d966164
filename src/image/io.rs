//! Loading frames and images through the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Depth planes are read
//! from 16-bit grayscale PNGs holding raw sensor units.

use crate::frame::{ColorOrder, Frame};
use crate::util::{LordeError, LordeResult};
use image::GrayImage;
use std::path::Path;

fn open(path: &Path) -> LordeResult<image::DynamicImage> {
    image::open(path).map_err(|err| LordeError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })
}

/// Loads an image from disk and converts it to 8-bit grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> LordeResult<GrayImage> {
    Ok(open(path.as_ref())?.to_luma8())
}

/// Builds a frame from a color image and a raw 16-bit depth image.
pub fn load_frame<P: AsRef<Path>, Q: AsRef<Path>>(color_path: P, depth_path: Q) -> LordeResult<Frame> {
    let color = open(color_path.as_ref())?.to_rgb8();
    let depth = open(depth_path.as_ref())?.to_luma16();
    if color.dimensions() != depth.dimensions() {
        return Err(LordeError::PlaneMismatch {
            color_width: color.width() as usize,
            color_height: color.height() as usize,
            depth_width: depth.width() as usize,
            depth_height: depth.height() as usize,
        });
    }
    let (width, height) = (color.width() as usize, color.height() as usize);
    Frame::new(width, height, color.into_raw(), depth.into_raw())
        .map(|frame| frame.with_color_order(ColorOrder::Rgb))
}

/// Saves a grayscale map, e.g. a similarity map or edge template.
pub fn save_gray_image<P: AsRef<Path>>(img: &GrayImage, path: P) -> LordeResult<()> {
    img.save(path.as_ref()).map_err(|err| LordeError::ImageIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })
}
