use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::Parser;

use crate::pipeline::extract::Extractor;
use crate::pipeline::kmeans::{DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS, DEFAULT_SEED};
use crate::pipeline::sample::DEFAULT_MAX_SAMPLES;
use crate::pipeline::ExtractOptions;

/// Generate a 16-color palette from an image and render it into templates.
#[derive(Parser, Debug)]
#[command(name = "pal", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Extraction method
    #[arg(short, long, value_enum, default_value_t = Method::Kmeans)]
    pub method: Method,

    /// Number of K-means clusters
    #[arg(
        short = 'k',
        long = "colors",
        default_value_t = DEFAULT_CLUSTERS,
        value_parser = clap::value_parser!(u8).range(1..=16).map(usize::from)
    )]
    pub colors: usize,

    /// Maximum K-means iterations
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Seed for K-means centroid selection
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Sample at most this many pixels
    #[arg(long, default_value_t = DEFAULT_MAX_SAMPLES)]
    pub max_samples: usize,

    /// Saturation multiplier applied to the finished palette
    #[arg(short, long, default_value_t = 1.0)]
    pub saturation: f32,

    /// Color format written into templates and printed output
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Hex)]
    pub format: OutputFormat,

    /// Template directory (defaults to $XDG_CONFIG_HOME/pal)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Directory for rendered templates (defaults to $XDG_CACHE_HOME/pal)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Neither read nor write the palette cache
    #[arg(long)]
    pub no_cache: bool,

    /// Print the palette to stdout
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a colored terminal preview instead of rendering templates
    #[arg(short, long)]
    pub preview: bool,

    /// Open the interactive palette viewer instead of rendering templates
    #[arg(long, conflicts_with = "preview")]
    pub tui: bool,

    /// Log filter directive (e.g. debug, pal=trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn extract_options(&self) -> ExtractOptions {
        let extractor = match self.method {
            Method::AreaAverage => Extractor::AreaAverage,
            Method::Kmeans => Extractor::KMeans {
                clusters: self.colors,
                max_iterations: self.max_iterations,
                seed: self.seed,
            },
            Method::Ansi => Extractor::AnsiBucket,
        };
        ExtractOptions {
            extractor,
            max_samples: self.max_samples,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    #[value(alias = "aa")]
    AreaAverage,
    #[value(alias = "km")]
    Kmeans,
    #[value(alias = "an")]
    Ansi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Hex,
    Rgb,
}
