use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use zbqr::raster::Raster;
use zbqr::scan::{scan_frames, Frame, ScanConfig};

/// zbqr reader: decode codes from PNG/JPEG images
#[derive(Parser)]
#[command(name = "zbqr-detect", version)]
struct Args {
    /// Input image files (PNG or JPEG)
    #[arg(required = true)]
    images: Vec<String>,

    /// Four corner points "x,y x,y x,y x,y" bounding the code, in any order.
    /// Defaults to the image bounds (an already cropped code).
    #[arg(long)]
    corners: Option<String>,

    /// TOML file with scan settings
    #[arg(long)]
    config: Option<String>,

    /// Gray level at or below which a pixel reads as black (overrides config)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Flip images left to right before scanning (overrides config)
    #[arg(long)]
    mirrored: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress non-JSON output
    #[arg(short, long)]
    quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct OutputResult {
    file: String,
    image_width: u32,
    image_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<u32>,
    /// Classified corners as [TL, TR, BL, BR].
    #[serde(skip_serializing_if = "Option::is_none")]
    corners: Option<[[f64; 2]; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn load_image(path: &str) -> Result<Raster> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image: {path}"))?
        .into_luma8();

    let width = img.width();
    let height = img.height();
    let pixels = img.into_raw();

    Ok(Raster::from_buf(width, height, width, pixels))
}

/// Parse four points written as `x,y` pairs separated by spaces or semicolons.
fn parse_corners(text: &str) -> Result<[[f64; 2]; 4]> {
    let points = text
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("corner '{pair}' is not of the form x,y"))?;
            let x: f64 = x.trim().parse().with_context(|| format!("invalid x in '{pair}'"))?;
            let y: f64 = y.trim().parse().with_context(|| format!("invalid y in '{pair}'"))?;
            Ok([x, y])
        })
        .collect::<Result<Vec<_>>>()?;

    let n = points.len();
    points
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected 4 corner points, got {n}"))
}

fn image_bounds(img: &Raster) -> [[f64; 2]; 4] {
    let w = img.width.saturating_sub(1) as f64;
    let h = img.height.saturating_sub(1) as f64;
    [[0.0, 0.0], [w, 0.0], [0.0, h], [w, h]]
}

fn load_config(args: &Args) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let s = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            ScanConfig::from_toml_str(&s).with_context(|| format!("parsing {path}"))?
        }
        None => ScanConfig::default(),
    };
    if let Some(t) = args.threshold {
        config.threshold = t;
    }
    if args.mirrored {
        config.mirrored = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(&args)?;
    let corners = args.corners.as_deref().map(parse_corners).transpose()?;

    let mut frames = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let image = load_image(path)?;
        if !args.quiet {
            eprintln!("scanning {} ({}x{})", path, image.width, image.height);
        }
        let quad = corners.unwrap_or_else(|| image_bounds(&image));
        frames.push(Frame { image, quad });
    }

    let results = scan_frames(&frames, &config);

    for ((path, frame), result) in args.images.iter().zip(&frames).zip(results) {
        let mut out = OutputResult {
            file: path.clone(),
            image_width: frame.image.width,
            image_height: frame.image.height,
            text: None,
            rotation: None,
            corners: None,
            error: None,
        };
        match result {
            Ok(r) => {
                out.text = Some(r.text);
                out.rotation = Some(r.rotation.degrees());
                out.corners = Some(r.corners.to_array());
            }
            Err(e) => {
                log::debug!("{path}: {e}");
                out.error = Some(e.to_string());
            }
        }

        let json = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{json}");
    }

    Ok(())
}
