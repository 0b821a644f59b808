use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use tracing::debug;

use crate::color::Pixel;
use crate::error::ExtractError;

/// Upper bound on the number of samples handed to an extractor.
pub const DEFAULT_MAX_SAMPLES: usize = 50_000;

/// A decoded image: dimensions plus RGB pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let pixels = img.pixels().map(|p| Pixel::from(p.0)).collect();
        Self::new(img.width(), img.height(), pixels)
    }
}

/// The pixels an extractor works on. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet(Vec<Pixel>);

impl SampleSet {
    /// Wrap an already-collected pixel list.
    pub fn new(pixels: Vec<Pixel>) -> Result<Self, ExtractError> {
        if pixels.is_empty() {
            return Err(ExtractError::EmptyImage {
                width: 0,
                height: 0,
            });
        }
        Ok(Self(pixels))
    }

    pub fn as_slice(&self) -> &[Pixel] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Load an image from disk and decode its first frame to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;
    let rgb_img = img.to_rgb8();
    debug!(
        path = %path.display(),
        width = rgb_img.width(),
        height = rgb_img.height(),
        "decoded image"
    );
    Ok(DecodedImage::from_rgb_image(&rgb_img))
}

/// Reduce an image to at most `max_samples` pixels.
///
/// Images at or below the threshold pass through unchanged. Larger images are
/// read on a fixed row-major stride, so the same image and threshold always
/// produce the same sample set.
pub fn sample(image: &DecodedImage, max_samples: usize) -> Result<SampleSet, ExtractError> {
    if image.width == 0 || image.height == 0 {
        return Err(ExtractError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }
    let expected = image.width as usize * image.height as usize;
    if image.pixels.len() != expected {
        return Err(ExtractError::DimensionMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }

    let stride = expected.div_ceil(max_samples.max(1));
    let pixels: Vec<Pixel> = image.pixels.iter().step_by(stride).copied().collect();
    debug!(total = expected, stride, samples = pixels.len(), "sampled image");

    Ok(SampleSet(pixels))
}
