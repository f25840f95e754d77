//! Attendance-photo field extraction.
//!
//! Recovers a clock time and a branch/location name from a noisy photo of
//! a third-party POS clock-in screen. Recognition itself is
//! delegated to an external engine (Tesseract by default); this crate owns
//! the preprocessing variants, the redundant pass schedule, and the
//! noise-tolerant text heuristics that pull the two fields out of garbled
//! recognition output.
//!
//! The caller owns everything around it: upload validation, persistence,
//! and matching the extracted branch name against a real branch directory.

pub mod ocr;
pub mod settings;

pub use ocr::{
    extract, extract_with_tesseract, ExtractError, ExtractionResult, Recognizer, TesseractEngine,
};
pub use settings::Settings;
