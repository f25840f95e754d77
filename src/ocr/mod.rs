//! Attendance-photo recognition pipeline.
//!
//! A photo of the POS clock-in screen goes through a fixed set of
//! preprocess-plus-recognize passes; the pass texts are joined in pass
//! order into one combined text, and the time and branch extractors search
//! that union. Missing fields come back as empty strings; once the image
//! decodes, a result object is always produced.

pub mod anchor;
pub mod branch;
pub mod engine;
pub mod passes;
pub mod preprocess;
pub mod setup;
pub mod time;

pub use anchor::{find_anchors, AnchorMatch};
pub use branch::extract_branch;
pub use engine::{EngineError, Recognizer, TesseractEngine};
pub use passes::{pass_specs, CropRect, LayoutMode, PassConfig, PassSpec};
pub use preprocess::preprocess;
pub use time::extract_time;

use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::settings::Settings;

/// The one fatal error: the upload is not a decodable image. Everything
/// after decoding degrades softly.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Fields recovered from one photo. Absent fields are empty strings,
/// never null; `raw_text` carries the combined recognition output for
/// auditing and manual correction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub time: String,
    pub branch_name: String,
    pub raw_text: String,
}

/// Runs every pass for this photo and joins the texts in pass order.
///
/// A failed recognition call contributes an empty string for that pass
/// only; the join always has one separator per pass boundary, so the
/// combined text is deterministic for a given photo and engine.
pub fn combined_text<R: Recognizer>(photo: &DynamicImage, engine: &R) -> String {
    let (width, height) = photo.dimensions();
    let specs = pass_specs(width, height);

    let mut texts = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let bitmap = preprocess(photo, &spec.config);
        match engine.recognize(&bitmap, spec.layout) {
            Ok(text) => texts.push(text),
            Err(err) => {
                debug!("pass {index} failed, continuing without it: {err}");
                texts.push(String::new());
            }
        }
    }

    texts.join("\n")
}

/// Extracts the clock time and branch name from a photo of the clock-in
/// screen. The only error is an undecodable image; engine failures and
/// missing fields degrade to empty strings.
pub fn extract<R: Recognizer>(bytes: &[u8], engine: &R) -> Result<ExtractionResult, ExtractError> {
    let photo = image::load_from_memory(bytes)?;
    let raw_text = combined_text(&photo, engine);

    let time = extract_time(&raw_text);
    let branch_name = extract_branch(&raw_text);
    info!(
        time_found = !time.is_empty(),
        branch_found = !branch_name.is_empty(),
        "extraction finished"
    );

    Ok(ExtractionResult { time, branch_name, raw_text })
}

/// [`extract`] with the system Tesseract engine. A missing engine is not
/// fatal: every pass degrades to empty text and the result carries empty
/// fields for the caller to handle.
pub fn extract_with_tesseract(
    bytes: &[u8],
    settings: &Settings,
) -> Result<ExtractionResult, ExtractError> {
    match TesseractEngine::from_settings(settings) {
        Ok(tesseract) => extract(bytes, &tesseract),
        Err(err) => {
            warn!("recognition engine unavailable: {err}");
            extract(bytes, &engine::Unavailable)
        }
    }
}
