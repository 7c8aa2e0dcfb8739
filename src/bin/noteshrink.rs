use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use note_shrink_wasm::{ShrinkOptions, shrink_bytes};

/// Shrink scanned notes to a small palette on a clean background.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Total number of output colors, background included
    #[arg(short = 'n', long, default_value_t = 8)]
    num_colors: usize,

    /// Fraction of pixels sampled for background and palette detection
    #[arg(short = 's', long, default_value_t = 0.05)]
    sample_fraction: f32,

    /// HSV value distance from the background that marks ink
    #[arg(long, default_value_t = 0.25)]
    value_threshold: f32,

    /// HSV saturation distance from the background that marks ink
    #[arg(long, default_value_t = 0.20)]
    sat_threshold: f32,

    /// Maximum number of k-means rounds
    #[arg(long, default_value_t = 40)]
    kmeans_iter: usize,

    /// Keep the palette's saturation as clustered
    #[arg(long)]
    no_saturate: bool,

    /// Render the detected background color instead of white
    #[arg(long)]
    no_white_background: bool,

    /// Seed for pixel sampling, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "shrinked_")]
    prefix: String,

    /// Print a JSON summary for every written file
    #[arg(long)]
    json: bool,
}

impl Args {
    fn options(&self) -> ShrinkOptions {
        ShrinkOptions {
            sample_fraction: self.sample_fraction,
            brightness_threshold: self.value_threshold,
            saturation_threshold: self.sat_threshold,
            num_colors: self.num_colors,
            kmeans_max_iter: self.kmeans_iter,
            saturate: !self.no_saturate,
            white_background: !self.no_white_background,
        }
    }

    fn output_path(&self, input: &Path) -> Result<PathBuf> {
        let stem = input
            .file_stem()
            .with_context(|| format!("input path has no file name: {}", input.display()))?
            .to_string_lossy();
        Ok(match &self.out_dir {
            Some(dir) => dir.join(format!("{stem}.png")),
            None => PathBuf::from(format!("{}{}.png", self.prefix, stem)),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = args.options();
    options.validate().context("invalid options")?;

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let (png, palette) = shrink_bytes(&bytes, &options, args.seed)
            .with_context(|| format!("shrinking {}", input.display()))?;

        let out_path = args.output_path(input)?;
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, png).with_context(|| format!("writing {}", out_path.display()))?;
        tracing::info!(input = %input.display(), output = %out_path.display(), "Saved");

        if args.json {
            let summary = serde_json::json!({
                "input": input.display().to_string(),
                "output": out_path.display().to_string(),
                "palette": palette,
            });
            println!("{summary}");
        }
    }

    Ok(())
}
