//! The fixed recognition pass table.
//!
//! Each pass preprocesses one variant of the photo (crop, upscale, contrast,
//! threshold) and runs the engine with one page-segmentation mode. The crops
//! overlap on purpose: different variants recover different substrings from
//! the same noisy photo, and the extractors search their union.

/// A crop window in fractional coordinates (0.0–1.0) against the
/// dimensions of the source photo, before any upscaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Preprocessing parameters for a single pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassConfig {
    /// Upscale factor, at least 1.
    pub scale: u32,
    /// Contrast multiplier applied to the deviation from mid-gray.
    pub contrast: f32,
    /// Binarization cutoff: pixels above become white, the rest black.
    pub threshold: u8,
    /// Optional crop, applied before upscaling.
    pub crop: Option<CropRect>,
}

/// Page-segmentation hint handed to the recognition engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// One uniform block of text (Tesseract psm 6).
    SingleBlock,
    /// Sparse text scattered over the page (psm 11).
    SparseText,
    /// Automatic segmentation (psm 3).
    Auto,
}

impl LayoutMode {
    /// Tesseract `--psm` value for this mode.
    pub fn psm(self) -> u32 {
        match self {
            LayoutMode::SingleBlock => 6,
            LayoutMode::SparseText => 11,
            LayoutMode::Auto => 3,
        }
    }
}

/// One preprocess-plus-recognize cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSpec {
    pub config: PassConfig,
    pub layout: LayoutMode,
}

/// Top-left region holding branch name, status line, and time on portrait
/// photos. Recognized twice with different segmentation modes.
const TOP_LEFT: PassConfig = PassConfig {
    scale: 3,
    contrast: 2.5,
    threshold: 140,
    crop: Some(CropRect { x0: 0.0, y0: 0.03, x1: 0.65, y1: 0.45 }),
};

/// Returns the ordered pass list for a photo of the given dimensions.
///
/// The list is a pure function of (width, height): five passes for portrait
/// photos, six for landscape (width > height), always in the same order.
pub fn pass_specs(width: u32, height: u32) -> Vec<PassSpec> {
    let mut specs = vec![
        // Full image, moderate preprocessing.
        PassSpec {
            config: PassConfig { scale: 2, contrast: 2.0, threshold: 130, crop: None },
            layout: LayoutMode::Auto,
        },
        PassSpec { config: TOP_LEFT, layout: LayoutMode::SparseText },
        // Second segmentation pass over the identical bitmap.
        PassSpec { config: TOP_LEFT, layout: LayoutMode::Auto },
        // Top half with aggressive contrast for blurry photos.
        PassSpec {
            config: PassConfig {
                scale: 3,
                contrast: 3.0,
                threshold: 120,
                crop: Some(CropRect { x0: 0.0, y0: 0.0, x1: 1.0, y1: 0.55 }),
            },
            layout: LayoutMode::Auto,
        },
    ];

    // Landscape photos put the card on the left.
    if width > height {
        specs.push(PassSpec {
            config: PassConfig {
                scale: 2,
                contrast: 2.5,
                threshold: 130,
                crop: Some(CropRect { x0: 0.0, y0: 0.0, x1: 0.55, y1: 1.0 }),
            },
            layout: LayoutMode::Auto,
        });
    }

    // Center card, recovers off-center framing (dark-wallpaper phones).
    specs.push(PassSpec {
        config: PassConfig {
            scale: 2,
            contrast: 2.5,
            threshold: 130,
            crop: Some(CropRect { x0: 0.05, y0: 0.2, x1: 0.95, y1: 0.65 }),
        },
        layout: LayoutMode::Auto,
    });

    specs
}
