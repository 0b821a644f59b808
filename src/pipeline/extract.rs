use tracing::debug;

use crate::color::{Color, Pixel};
use crate::error::ExtractError;
use crate::pipeline::ansi::ansi_buckets;
use crate::pipeline::kmeans::{kmeans, DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS, DEFAULT_SEED};
use crate::pipeline::sample::SampleSet;

/// Candidate extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// One candidate: the mean of every sample.
    AreaAverage,
    /// `clusters` candidates from seeded k-means.
    KMeans {
        clusters: usize,
        max_iterations: usize,
        seed: u64,
    },
    /// Up to 16 candidates, one per non-empty hue/lightness bucket.
    AnsiBucket,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::KMeans {
            clusters: DEFAULT_CLUSTERS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

impl Extractor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AreaAverage => "area-average",
            Self::KMeans { .. } => "kmeans",
            Self::AnsiBucket => "ansi",
        }
    }

    /// Produce unordered candidate colors from a sample set.
    pub fn extract(&self, samples: &SampleSet) -> Result<Vec<Color>, ExtractError> {
        let candidates = match *self {
            Self::AreaAverage => vec![area_average(samples)],
            Self::KMeans {
                clusters,
                max_iterations,
                seed,
            } => kmeans(samples.as_slice(), clusters, max_iterations, seed)?.colors(),
            Self::AnsiBucket => ansi_buckets(samples.as_slice()),
        };
        debug!(
            method = self.name(),
            candidates = candidates.len(),
            "extracted candidates"
        );
        Ok(candidates)
    }
}

/// Mean color of the whole sample set.
pub fn area_average(samples: &SampleSet) -> Color {
    let mut sum = ChannelSums::default();
    for pixel in samples.as_slice() {
        sum.add(*pixel);
    }
    // SampleSet is never empty
    Color::from_pixel(sum.mean().unwrap_or(Pixel::new(0, 0, 0)))
}

/// Running per-channel totals for averaging pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ChannelSums {
    r: u64,
    g: u64,
    b: u64,
    count: u64,
}

impl ChannelSums {
    pub(crate) fn add(&mut self, pixel: Pixel) {
        self.r += pixel.r as u64;
        self.g += pixel.g as u64;
        self.b += pixel.b as u64;
        self.count += 1;
    }

    /// Rounded per-channel mean, or `None` if nothing was added.
    pub(crate) fn mean(&self) -> Option<Pixel> {
        if self.count == 0 {
            return None;
        }
        let avg = |sum: u64| ((sum + self.count / 2) / self.count) as u8;
        Some(Pixel::new(avg(self.r), avg(self.g), avg(self.b)))
    }
}
