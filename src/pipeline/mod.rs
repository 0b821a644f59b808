//! Image to palette: sample, extract candidates, assign slots.

pub mod ansi;
pub mod assign;
pub mod extract;
pub mod kmeans;
pub mod sample;

use tracing::info;

use crate::error::ExtractError;
use assign::{assemble, Palette};
use extract::Extractor;
use sample::{sample, DecodedImage, DEFAULT_MAX_SAMPLES};

/// Parameters for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtractOptions {
    pub extractor: Extractor,
    pub max_samples: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extractor: Extractor::default(),
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

/// Run the whole pipeline on a decoded image.
pub fn extract_palette(
    image: &DecodedImage,
    options: &ExtractOptions,
) -> Result<Palette, ExtractError> {
    let samples = sample(image, options.max_samples)?;
    let candidates = options.extractor.extract(&samples)?;
    let palette = assemble(&candidates)?;
    info!(
        method = options.extractor.name(),
        samples = samples.len(),
        candidates = candidates.len(),
        "palette extracted"
    );
    Ok(palette)
}
