use crate::image::inpaint::{box_mask, inpaint_telea};
use crate::search::{MatchBox, MultiScaleMatcher};
use crate::trace::{trace_event, trace_span};
use crate::util::{LordeError, LordeResult};
use image::GrayImage;

/// Configuration for iterative object search.
#[derive(Clone, Copy, Debug)]
pub struct LocateConfig {
    /// Upper bound on the number of instances to find.
    pub max_objects: usize,
    /// Neighborhood radius of the inpainting used to erase found instances.
    pub inpaint_radius: usize,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            max_objects: 2,
            inpaint_radius: 3,
        }
    }
}

/// Finds several instances of one template by matching, erasing the match
/// from a private copy of the image, and matching again.
#[derive(Clone, Debug)]
pub struct ObjectLocator {
    matcher: MultiScaleMatcher,
    cfg: LocateConfig,
}

impl ObjectLocator {
    pub fn new(matcher: MultiScaleMatcher) -> Self {
        Self {
            matcher,
            cfg: LocateConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: LocateConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn matcher(&self) -> &MultiScaleMatcher {
        &self.matcher
    }

    /// Returns matches in discovery order; the first is the reference
    /// instance.
    ///
    /// `image` is never modified.
    pub fn locate(&self, image: &GrayImage) -> LordeResult<Vec<MatchBox>> {
        let max_objects = self.cfg.max_objects;
        if max_objects == 0 {
            return Err(LordeError::InvalidInput("max_objects must be at least 1"));
        }
        let _span = trace_span!("locate_objects", max_objects = max_objects).entered();

        let mut working = image.clone();
        let mut found = Vec::with_capacity(max_objects);
        for iteration in 0..max_objects {
            let matched = self.matcher.match_image(&working)?;
            trace_event!(
                "object_located",
                iteration = iteration,
                score = matched.score,
                ratio = matched.scale_ratio
            );
            found.push(matched);
            if iteration + 1 == max_objects {
                break;
            }
            erase(&mut working, &matched, self.cfg.inpaint_radius);
        }
        Ok(found)
    }
}

fn erase(image: &mut GrayImage, matched: &MatchBox, radius: usize) {
    let mask = box_mask(
        image.width() as usize,
        image.height() as usize,
        &matched.bbox,
    );
    inpaint_telea(image, &mask, radius);
}
