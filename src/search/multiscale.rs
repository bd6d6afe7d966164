use crate::edges::auto_canny;
use crate::frame::PixelBox;
use crate::image::resize::{rescale, scaled_dims};
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{Kernel, Peak, ResponseSummary, ScanParams};
use crate::search::{MatchBox, MatchConfig};
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::math::linspace;
use crate::util::{LordeError, LordeResult};
use crate::ImageView;
use image::GrayImage;

#[cfg(feature = "rayon")]
use crate::kernel::rayon::zncc_scan_full_par;

/// Finds the best placement of a fixed-size edge template across enlarged
/// copies of a search image.
///
/// The template keeps its pixel size; enlarging the image lets it line up
/// with instances that look smaller than the reference crop. Scales are
/// tried from the largest down, and a later scale replaces the best only
/// with a strictly higher score.
#[derive(Clone, Debug)]
pub struct MultiScaleMatcher {
    template: Template,
    cfg: MatchConfig,
}

impl MultiScaleMatcher {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            cfg: MatchConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Runs the sweep over `image`, a similarity map.
    pub fn match_image(&self, image: &GrayImage) -> LordeResult<MatchBox> {
        let cfg = &self.cfg;
        if cfg.num_scales == 0 {
            return Err(LordeError::InvalidInput("num_scales must be at least 1"));
        }
        if !cfg.max_scale.is_finite() || cfg.max_scale < 1.0 {
            return Err(LordeError::InvalidInput("max_scale must be at least 1"));
        }

        let _span = trace_span!(
            "multiscale_match",
            scales = cfg.num_scales,
            max_scale = cfg.max_scale
        )
        .entered();

        let (tpl_width, tpl_height) = (self.template.width(), self.template.height());
        let mut evaluated = 0usize;
        let mut found: Option<(Peak, f64)> = None;

        for scale in linspace(1.0, cfg.max_scale, cfg.num_scales).into_iter().rev() {
            let (width, height) = scaled_dims(image.width(), image.height(), scale);
            if (width as usize) < tpl_width || (height as usize) < tpl_height {
                break;
            }
            let resized = rescale(image, scale)?;
            let ratio = f64::from(image.width()) / f64::from(resized.width());
            let edged = auto_canny(&resized, &cfg.edge);
            let summary = self.scan(ImageView::from_gray(&edged)?)?;
            evaluated += 1;

            trace_event!(
                "scale_scanned",
                scale = scale,
                valid = summary.valid,
                best = summary.best.map_or(f32::NAN, |p| p.score)
            );

            if summary.is_degenerate(cfg.flat_tolerance) {
                continue;
            }
            if let Some(peak) = summary.best {
                if found.map_or(true, |(best, _)| peak.score > best.score) {
                    found = Some((peak, ratio));
                }
            }
        }

        if evaluated == 0 {
            return Err(LordeError::NoMatchFound {
                reason: "template larger than the search image",
            });
        }
        let (peak, ratio) = found.ok_or(LordeError::NoMatchFound {
            reason: "response surface is flat at every scale",
        })?;

        let to_frame = |v: usize, max: u32| ((v as f64 * ratio) as usize).min(max as usize);
        let bbox = PixelBox {
            x1: to_frame(peak.x, image.width()),
            y1: to_frame(peak.y, image.height()),
            x2: to_frame(peak.x + tpl_width, image.width()),
            y2: to_frame(peak.y + tpl_height, image.height()),
        };
        trace_event!(
            "match_found",
            x1 = bbox.x1,
            y1 = bbox.y1,
            x2 = bbox.x2,
            y2 = bbox.y2,
            ratio = ratio,
            score = peak.score
        );
        Ok(MatchBox {
            bbox,
            scale_ratio: ratio,
            score: peak.score,
        })
    }

    fn scan(&self, view: ImageView<'_, u8>) -> LordeResult<ResponseSummary> {
        let params = ScanParams {
            min_var_i: self.cfg.min_var_i,
        };
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return zncc_scan_full_par(view, self.template.plan(), params);
            }
        }
        <ZnccScalar as Kernel>::scan_full(view, self.template.plan(), params)
    }
}
