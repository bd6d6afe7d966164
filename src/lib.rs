//! LoRDE estimates the distance to far objects beyond a depth sensor's
//! reliable range.
//!
//! The user marks a near object whose depth the sensor measures well. The
//! crate finds a second, farther instance of the same object through
//! color-similarity masking and multi-scale edge-template ZNCC matching, then
//! infers its depth from the ratio of apparent sizes. Everything is a pure
//! function of the caller's frame and region; display and camera handling
//! live outside the crate.

pub mod color;
pub mod depth;
pub mod edges;
pub mod frame;
pub mod image;
pub mod kernel;
pub mod pipeline;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use color::{similarity_map, HsvColor};
pub use depth::{triangulate, Calibration, DepthConfig, DepthEstimate};
pub use edges::{auto_canny, EdgeConfig};
pub use frame::{ColorOrder, Frame, PixelBox, Region};
pub use crate::image::ImageView;
pub use pipeline::{DepthEstimator, DepthReport, PipelineConfig};
pub use search::{LocateConfig, MatchBox, MatchConfig, MultiScaleMatcher, ObjectLocator};
pub use template::Template;
pub use util::{LordeError, LordeResult};
