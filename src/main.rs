use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pal::cache::SchemeCache;
use pal::cli::Args;
use pal::pipeline::assign::Palette;
use pal::pipeline::sample::load_image;
use pal::pipeline::{extract_palette, ExtractOptions};
use pal::tui::TuiApp;
use pal::{paths, preview, template, tui};

const DEFAULT_LOG_FILTER: &str = "pal=warn";

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("pal: invalid --log-level {directive:?} ({e}), using {DEFAULT_LOG_FILTER}");
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reuse a cached palette when one exists for this image and parameter set,
/// otherwise decode and extract, then cache the result.
fn load_or_extract(args: &Args, options: &ExtractOptions) -> Result<Palette> {
    let cache = (!args.no_cache).then(|| SchemeCache::new(paths::cache_dir().join("schemes")));
    let entry = cache
        .as_ref()
        .map(|cache| cache.entry_path(&args.image, options, args.saturation));

    if let (Some(cache), Some(entry)) = (&cache, &entry) {
        match cache.load(entry) {
            Ok(Some(palette)) => {
                info!(path = %entry.display(), "using cached palette");
                return Ok(palette);
            }
            Ok(None) => {}
            Err(e) => warn!("ignoring unreadable palette cache: {e}"),
        }
    }

    let image = load_image(&args.image)?;
    let palette = extract_palette(&image, options)
        .with_context(|| format!("failed to extract palette from {}", args.image.display()))?
        .with_saturation(args.saturation);

    if let (Some(cache), Some(entry)) = (&cache, &entry) {
        if let Err(e) = cache.store(entry, &palette) {
            warn!("failed to cache palette: {e}");
        }
    }
    Ok(palette)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());
    info!("pal v{} starting", env!("CARGO_PKG_VERSION"));

    let options = args.extract_options();
    let palette = load_or_extract(&args, &options)?;

    if args.tui {
        let app = TuiApp::new(
            palette,
            args.image.clone(),
            options.extractor.name(),
            args.format,
        );
        return tui::run(app);
    }

    if args.preview {
        print!("{}", preview::render(&palette, args.format));
    } else {
        let templates = args.templates.clone().unwrap_or_else(paths::config_dir);
        let out_dir = args.out_dir.clone().unwrap_or_else(paths::cache_dir);
        std::fs::create_dir_all(&templates).with_context(|| {
            format!("failed to create template directory: {}", templates.display())
        })?;
        template::render_dir(&templates, &out_dir, &palette, args.format)?;
    }

    if args.verbose {
        print!("{}", preview::list(&palette, args.format));
    }
    Ok(())
}
