use clap::Parser;
use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use lorde::io::{load_frame, save_gray_image};
use lorde::{
    similarity_map, Calibration, ColorOrder, DepthConfig, DepthEstimator, DepthReport, EdgeConfig,
    Frame, HsvColor, LocateConfig, MatchConfig, PipelineConfig, Region, Template,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "LoRDE CLI: long range depth from a near reference object")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ColorOrderConfig {
    #[default]
    Rgb,
    Bgr,
}

impl From<&ColorOrderConfig> for ColorOrder {
    fn from(value: &ColorOrderConfig) -> Self {
        match value {
            ColorOrderConfig::Rgb => ColorOrder::Rgb,
            ColorOrderConfig::Bgr => ColorOrder::Bgr,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CalibrationJson {
    degrees_per_pixel: f64,
    depth_unit_scale: f64,
}

impl Default for CalibrationJson {
    fn default() -> Self {
        Self {
            degrees_per_pixel: 0.1491,
            depth_unit_scale: 0.0010000000474974513,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    max_scale: f64,
    num_scales: usize,
    edge_sigma: f32,
    min_var_i: f32,
    flat_tolerance: f32,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            max_scale: cfg.max_scale,
            num_scales: cfg.num_scales,
            edge_sigma: cfg.edge.sigma,
            min_var_i: cfg.min_var_i,
            flat_tolerance: cfg.flat_tolerance,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LocateConfigJson {
    inpaint_radius: usize,
}

impl Default for LocateConfigJson {
    fn default() -> Self {
        Self {
            inpaint_radius: LocateConfig::default().inpaint_radius,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DepthConfigJson {
    min_valid_raw: u16,
    max_valid_raw: u16,
}

impl Default for DepthConfigJson {
    fn default() -> Self {
        let cfg = DepthConfig::default();
        Self {
            min_valid_raw: cfg.min_valid_raw,
            max_valid_raw: cfg.max_valid_raw,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    color_path: String,
    depth_path: String,
    color_order: ColorOrderConfig,
    region: Option<[i64; 4]>,
    target_hsv: [u8; 3],
    calibration: CalibrationJson,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
    locate: LocateConfigJson,
    depth: DepthConfigJson,
    output_path: Option<String>,
    annotate_path: Option<String>,
    similarity_path: Option<String>,
    template_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let target = HsvColor::default();
        Self {
            color_path: String::new(),
            depth_path: String::new(),
            color_order: ColorOrderConfig::default(),
            region: None,
            target_hsv: [target.h, target.s, target.v],
            calibration: CalibrationJson::default(),
            match_cfg: MatchConfigJson::default(),
            locate: LocateConfigJson::default(),
            depth: DepthConfigJson::default(),
            output_path: None,
            annotate_path: None,
            similarity_path: None,
            template_path: None,
        }
    }
}

impl Config {
    fn pipeline(&self) -> PipelineConfig {
        let [h, s, v] = self.target_hsv;
        PipelineConfig {
            target: HsvColor::new(h, s, v),
            matching: MatchConfig {
                max_scale: self.match_cfg.max_scale,
                num_scales: self.match_cfg.num_scales,
                edge: EdgeConfig {
                    sigma: self.match_cfg.edge_sigma,
                },
                min_var_i: self.match_cfg.min_var_i,
                flat_tolerance: self.match_cfg.flat_tolerance,
                parallel: self.match_cfg.parallel,
            },
            locate: LocateConfig {
                inpaint_radius: self.locate.inpaint_radius,
                ..LocateConfig::default()
            },
            depth: DepthConfig {
                min_valid_raw: self.depth.min_valid_raw,
                max_valid_raw: self.depth.max_valid_raw,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ObjectRecord {
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
    scale_ratio: f64,
    score: f32,
    computed_depth: Option<f64>,
    sensor_depth: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Output {
    target_depth: Option<f64>,
    objects: Vec<ObjectRecord>,
}

impl From<&DepthReport> for Output {
    fn from(report: &DepthReport) -> Self {
        let objects = report
            .matched_boxes
            .iter()
            .zip(&report.depth_estimates)
            .map(|(matched, estimate)| ObjectRecord {
                x1: matched.bbox.x1,
                y1: matched.bbox.y1,
                x2: matched.bbox.x2,
                y2: matched.bbox.y2,
                scale_ratio: matched.scale_ratio,
                score: matched.score,
                computed_depth: estimate.computed,
                sensor_depth: estimate.sensor,
            })
            .collect();
        Self {
            target_depth: report.target_depth(),
            objects,
        }
    }
}

fn annotate(
    color_path: &str,
    report: &DepthReport,
    out_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = image::open(color_path)?.to_rgb8();
    for (idx, matched) in report.matched_boxes.iter().enumerate() {
        let bbox = matched.bbox;
        if bbox.is_empty() {
            continue;
        }
        let color = if idx == 0 {
            Rgb([0u8, 255, 0])
        } else {
            Rgb([255u8, 0, 0])
        };
        let rect = Rect::at(bbox.x1 as i32, bbox.y1 as i32)
            .of_size(bbox.width() as u32, bbox.height() as u32);
        draw_hollow_rect_mut(&mut canvas, rect, color);
    }
    canvas.save(out_path)?;
    Ok(())
}

/// Writes the intermediate similarity map and edge template when requested.
fn dump_intermediates(
    config: &Config,
    frame: &Frame,
    region: Region,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.similarity_path.is_none() && config.template_path.is_none() {
        return Ok(());
    }
    let pipeline = config.pipeline();
    let similarity = similarity_map(frame, pipeline.target)?;
    if let Some(path) = &config.similarity_path {
        save_gray_image(&similarity, path)?;
    }
    if let Some(path) = &config.template_path {
        let roi = region.normalize(frame.width(), frame.height())?;
        let template = Template::from_region(&similarity, &roi, &pipeline.matching.edge)?;
        save_gray_image(template.edges(), path)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("lorde=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.color_path.is_empty() || config.depth_path.is_empty() {
        return Err("color_path and depth_path must be set in the config".into());
    }
    let [x1, y1, x2, y2] = config
        .region
        .ok_or("region must be set in the config as [x1, y1, x2, y2]")?;

    let frame = load_frame(&config.color_path, &config.depth_path)?
        .with_color_order(ColorOrder::from(&config.color_order));
    let calibration = Calibration::new(
        config.calibration.degrees_per_pixel,
        config.calibration.depth_unit_scale,
    )?;
    let estimator = DepthEstimator::new(calibration).with_config(config.pipeline());
    let region = Region::new(x1, y1, x2, y2);
    dump_intermediates(&config, &frame, region)?;
    let report = estimator.estimate(&frame, region)?;
    tracing::info!(
        objects = report.matched_boxes.len(),
        target_depth = ?report.target_depth(),
        "estimate complete"
    );

    if let Some(path) = &config.annotate_path {
        annotate(&config.color_path, &report, path)?;
    }

    let json = serde_json::to_string_pretty(&Output::from(&report))?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
