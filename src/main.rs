//! Command-line front-end: photo in, extraction result out as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image::GenericImageView;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendance_ocr::ocr::{pass_specs, preprocess};
use attendance_ocr::{extract_with_tesseract, Settings};

/// Extract the clock time and branch name from an attendance photo.
#[derive(Parser, Debug)]
#[command(name = "attendance-ocr")]
#[command(about = "Extract clock time and branch name from a POS clock-in screen photo")]
struct Args {
    /// Photo of the clock-in screen
    image: PathBuf,

    /// JSON settings file (engine path, language, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write each pass's preprocessed bitmap here for tuning
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut settings = args
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if args.dump_dir.is_some() {
        settings.dump_dir = args.dump_dir;
    }

    let bytes = fs::read(&args.image)
        .with_context(|| format!("reading {}", args.image.display()))?;

    if let Some(dir) = settings.dump_dir.clone() {
        dump_passes(&bytes, &dir)?;
    }

    let result = extract_with_tesseract(&bytes, &settings)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}

/// Saves every pass's preprocessed bitmap as `pass-<index>.png`.
fn dump_passes(bytes: &[u8], dir: &Path) -> Result<()> {
    let photo = image::load_from_memory(bytes).context("decoding image")?;
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let (width, height) = photo.dimensions();
    for (index, spec) in pass_specs(width, height).iter().enumerate() {
        let bitmap = preprocess(&photo, &spec.config);
        let path = dir.join(format!("pass-{index}.png"));
        bitmap
            .save(&path)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
