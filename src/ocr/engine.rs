//! External recognition engine boundary.
//!
//! The engine is a black box behind [`Recognizer`]: it takes one
//! preprocessed bitmap and a layout hint and returns text. The production
//! implementation shells out to the system Tesseract binary.

use std::path::PathBuf;
use std::process::Command;

use image::GrayImage;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::passes::LayoutMode;
use super::setup;
use crate::settings::Settings;

/// Errors from a single recognition call. These never escape the pass
/// orchestrator, which downgrades them to an empty pass text.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("recognition engine not found: {0}")]
    NotFound(String),

    #[error("recognition failed: {0}")]
    Failed(String),

    #[error("tessdata download failed: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write bitmap: {0}")]
    Bitmap(#[from] image::ImageError),
}

/// One recognition call over one preprocessed bitmap.
pub trait Recognizer {
    fn recognize(&self, bitmap: &GrayImage, layout: LayoutMode) -> Result<String, EngineError>;
}

/// Tesseract invoked as an external command.
pub struct TesseractEngine {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
    language: String,
}

impl TesseractEngine {
    /// Locates the Tesseract binary and (if needed) a tessdata directory.
    ///
    /// Fails only when no binary can be found; a missing tessdata directory
    /// is left to the binary's own defaults.
    pub fn from_settings(settings: &Settings) -> Result<Self, EngineError> {
        let executable = setup::locate_tesseract(settings)?;
        let tessdata = setup::ensure_tessdata(settings);
        Ok(Self {
            executable,
            tessdata,
            language: settings.language.clone(),
        })
    }
}

impl Recognizer for TesseractEngine {
    fn recognize(&self, bitmap: &GrayImage, layout: LayoutMode) -> Result<String, EngineError> {
        // Tesseract reads from a file, so the bitmap goes through a temp PNG.
        let input = NamedTempFile::with_suffix(".png")?;
        bitmap.save(input.path())?;

        let mut cmd = Command::new(&self.executable);
        cmd.arg(input.path())
            .arg("stdout")
            .args(["-l", &self.language])
            .args(["--psm", &layout.psm().to_string()]);
        if let Some(dir) = &self.tessdata {
            cmd.arg("--tessdata-dir").arg(dir);
        }

        match cmd.output() {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(EngineError::Failed(format!("tesseract: {}", stderr.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(EngineError::NotFound(
                format!("{} (install tesseract-ocr)", self.executable.display()),
            )),
            Err(e) => Err(EngineError::Io(e)),
        }
    }
}

/// Stand-in used when no engine could be located. Every call fails, so
/// the orchestrator degrades each pass to empty text and the caller still
/// gets a result object.
pub(crate) struct Unavailable;

impl Recognizer for Unavailable {
    fn recognize(&self, _bitmap: &GrayImage, _layout: LayoutMode) -> Result<String, EngineError> {
        Err(EngineError::NotFound("no recognition engine available".to_string()))
    }
}
