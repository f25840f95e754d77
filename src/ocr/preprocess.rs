use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};

use super::passes::{CropRect, PassConfig};

/// Fixed 3x3 sharpening kernel, applied after the contrast stretch.
/// Weights sum to 1 so overall brightness is preserved.
const SHARPEN_KERNEL: [f32; 9] = [
    -0.125, -0.125, -0.125, //
    -0.125, 2.0, -0.125, //
    -0.125, -0.125, -0.125,
];

/// Turns a raw photo into a recognition-ready monochrome bitmap.
///
/// Steps, in order: luminance conversion, crop (fractional coordinates
/// against the source dimensions), Lanczos upscale, contrast stretch,
/// sharpen, binarize. The source image is never mutated.
pub fn preprocess(src: &DynamicImage, config: &PassConfig) -> GrayImage {
    let gray = src.to_luma8();

    let cropped = match &config.crop {
        Some(rect) => crop_fraction(&gray, rect),
        None => gray,
    };

    let (w, h) = cropped.dimensions();
    let mut scaled = if config.scale > 1 {
        imageops::resize(&cropped, w * config.scale, h * config.scale, FilterType::Lanczos3)
    } else {
        cropped
    };

    stretch_contrast(&mut scaled, config.contrast);
    let mut sharpened = imageops::filter3x3(&scaled, &SHARPEN_KERNEL);
    binarize(&mut sharpened, config.threshold);
    sharpened
}

/// Crops a sub-region using fractional coordinates (0.0–1.0).
///
/// Coordinates are converted to pixels against the image's own dimensions
/// and clamped to bounds; the result is always at least 1x1.
pub(crate) fn crop_fraction(img: &GrayImage, rect: &CropRect) -> GrayImage {
    let (w, h) = img.dimensions();

    let x0 = ((rect.x0 * w as f32) as u32).min(w.saturating_sub(1));
    let y0 = ((rect.y0 * h as f32) as u32).min(h.saturating_sub(1));
    let x1 = ((rect.x1 * w as f32) as u32).clamp(x0 + 1, w.max(x0 + 1));
    let y1 = ((rect.y1 * h as f32) as u32).clamp(y0 + 1, h.max(y0 + 1));

    imageops::crop_imm(img, x0, y0, x1 - x0, y1 - y0).to_image()
}

/// Multiplies each pixel's deviation from mid-gray (128) by `factor`.
fn stretch_contrast(img: &mut GrayImage, factor: f32) {
    for pixel in img.pixels_mut() {
        let value = pixel[0] as f32;
        pixel[0] = ((value - 128.0) * factor + 128.0).clamp(0.0, 255.0) as u8;
    }
}

/// Pixels above the threshold become white, all others black.
fn binarize(img: &mut GrayImage, threshold: u8) {
    for pixel in img.pixels_mut() {
        pixel[0] = if pixel[0] > threshold { 255 } else { 0 };
    }
}
