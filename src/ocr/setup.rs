//! Locates the Tesseract installation and its language data.
//!
//! Resolution is side-effect-free except for one case: when no
//! `eng.traineddata` exists anywhere, it is downloaded once into the
//! per-user data directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::engine::EngineError;
use crate::settings::Settings;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

/// Conventional install locations probed after PATH.
const COMMON_EXECUTABLES: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

/// System tessdata locations; when one exists the binary finds its own
/// data and no `--tessdata-dir` override is needed.
const SYSTEM_TESSDATA: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
    r"C:\Program Files\Tesseract-OCR\tessdata",
];

/// Per-user directory for downloaded language data.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("attendance-ocr")
}

/// Finds the Tesseract executable: configured override, then PATH, then
/// conventional install locations.
pub fn locate_tesseract(settings: &Settings) -> Result<PathBuf, EngineError> {
    if let Some(path) = &settings.tesseract_path {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(EngineError::NotFound(format!(
            "configured tesseract at {} does not exist",
            path.display()
        )));
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in COMMON_EXECUTABLES {
        let p = Path::new(path);
        if p.exists() {
            debug!("found tesseract at {}", p.display());
            return Ok(p.to_path_buf());
        }
    }

    Err(EngineError::NotFound(
        "tesseract not found; install tesseract-ocr or set tesseract_path".to_string(),
    ))
}

/// Finds a tessdata directory worth passing as `--tessdata-dir`:
/// configured override, then the per-user data dir, then TESSDATA_PREFIX.
pub fn locate_tessdata(settings: &Settings) -> Option<PathBuf> {
    if let Some(dir) = &settings.tessdata_dir {
        if has_traineddata(dir, &settings.language) {
            return Some(dir.clone());
        }
        warn!(
            "configured tessdata_dir {} has no {}.traineddata",
            dir.display(),
            settings.language
        );
    }

    let local = data_dir().join("tessdata");
    if has_traineddata(&local, &settings.language) {
        return Some(local);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        for dir in [PathBuf::from(&prefix), PathBuf::from(&prefix).join("tessdata")] {
            if has_traineddata(&dir, &settings.language) {
                return Some(dir);
            }
        }
    }

    None
}

/// Returns a usable tessdata directory, downloading the language data on
/// first use when none exists anywhere. `None` means "let the binary use
/// its own defaults": either a system install was found or the download
/// failed (logged, never fatal).
pub fn ensure_tessdata(settings: &Settings) -> Option<PathBuf> {
    if let Some(found) = locate_tessdata(settings) {
        return Some(found);
    }

    if SYSTEM_TESSDATA.iter().any(|dir| has_traineddata(Path::new(dir), &settings.language)) {
        return None;
    }

    match download_traineddata(&settings.language) {
        Ok(dir) => Some(dir),
        Err(err) => {
            warn!("could not fetch {}.traineddata: {err}", settings.language);
            None
        }
    }
}

fn has_traineddata(dir: &Path, language: &str) -> bool {
    dir.join(format!("{language}.traineddata")).exists()
}

/// Downloads `<language>.traineddata` into the per-user data directory.
fn download_traineddata(language: &str) -> Result<PathBuf, EngineError> {
    let dir = data_dir().join("tessdata");
    fs::create_dir_all(&dir)?;

    let url = format!("{TESSDATA_REPO}/{language}.traineddata");
    info!("downloading {url}");

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()
        .map_err(|e| EngineError::Download(e.to_string()))?;
    let response = client
        .get(&url)
        .header("User-Agent", "attendance-ocr")
        .send()
        .map_err(|e| EngineError::Download(e.to_string()))?;

    if !response.status().is_success() {
        return Err(EngineError::Download(format!("HTTP {} for {url}", response.status())));
    }

    let bytes = response.bytes().map_err(|e| EngineError::Download(e.to_string()))?;
    let path = dir.join(format!("{language}.traineddata"));
    let mut file = fs::File::create(&path)?;
    file.write_all(&bytes)?;

    info!("downloaded {} ({} bytes)", path.display(), bytes.len());
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_namespaced() {
        assert!(data_dir().ends_with("attendance-ocr"));
    }

    #[test]
    fn missing_configured_executable_is_an_error() {
        let settings = Settings {
            tesseract_path: Some(PathBuf::from("/definitely/not/here/tesseract")),
            ..Settings::default()
        };
        assert!(matches!(locate_tesseract(&settings), Err(EngineError::NotFound(_))));
    }

    #[test]
    fn configured_tessdata_without_data_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            tessdata_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };
        // The empty override is rejected; whatever else resolves, it is
        // never the configured directory.
        assert_ne!(locate_tessdata(&settings), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn configured_tessdata_with_data_is_used() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("eng.traineddata"), b"stub").unwrap();
        let settings = Settings {
            tessdata_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };
        assert_eq!(locate_tessdata(&settings), Some(dir.path().to_path_buf()));
    }
}
