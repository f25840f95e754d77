//! Runtime settings.
//!
//! Loaded from a JSON file when one is given; every field has a default so
//! a missing or unreadable file never stops an extraction.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit path to the Tesseract executable. When unset the binary is
    /// looked up on PATH and in conventional install locations.
    pub tesseract_path: Option<PathBuf>,
    /// Explicit tessdata directory. When unset one is resolved from the
    /// per-user data dir or TESSDATA_PREFIX, or left to the engine.
    pub tessdata_dir: Option<PathBuf>,
    /// Recognition language.
    pub language: String,
    /// When set, each pass's preprocessed bitmap is written here.
    pub dump_dir: Option<PathBuf>,
}

fn default_language() -> String {
    "eng".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            tessdata_dir: None,
            language: default_language(),
            dump_dir: None,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file, falling back to defaults on any
    /// read or parse failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("failed to parse {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_use_english_and_no_overrides() {
        let settings = Settings::default();
        assert_eq!(settings.language, "eng");
        assert!(settings.tesseract_path.is_none());
        assert!(settings.tessdata_dir.is_none());
        assert!(settings.dump_dir.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load(Path::new("/no/such/settings.json"));
        assert_eq!(settings.language, "eng");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"language": "deu"}}"#).unwrap();
        let settings = Settings::load(file.path());
        assert_eq!(settings.language, "deu");
        assert!(settings.tesseract_path.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let settings = Settings::load(file.path());
        assert_eq!(settings.language, "eng");
    }
}
