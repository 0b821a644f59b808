use std::path::PathBuf;

/// Failures of a single palette extraction. None of these are retried; the
/// caller may try again with different parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("image buffer holds {actual} pixels, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cluster count must be at least 1")]
    InvalidClusterCount,

    #[error("{samples} samples are not enough for {clusters} clusters")]
    InsufficientSamples { samples: usize, clusters: usize },

    #[error("extraction produced no candidate colors")]
    NoCandidates,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache file {path}: expected 16 colors, found {found}")]
    WrongColorCount { path: PathBuf, found: usize },

    #[error("cache file {path}: invalid color on line {line}: {reason}")]
    InvalidColor {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
