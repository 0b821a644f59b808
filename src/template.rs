use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::color::Color;
use crate::pipeline::assign::Palette;

impl OutputFormat {
    pub fn format(self, color: Color) -> String {
        match self {
            OutputFormat::Hex => color.to_hex(),
            OutputFormat::Rgb => color.to_rgb_string(),
        }
    }
}

/// Resolve a token body (the text between backticks) to a palette color.
///
/// `@background`, `@foreground` and `@color1`..`@color16`, where `@colorN`
/// is ANSI position N: `@color1` is the background and `@color16` the
/// foreground.
fn resolve(token: &str, palette: &Palette) -> Option<Color> {
    let name = token.strip_prefix('@')?;
    match name {
        "background" => Some(palette.background()),
        "foreground" => Some(palette.foreground()),
        _ => {
            let digits = name.strip_prefix("color")?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            palette.ansi(digits.parse().ok()?)
        }
    }
}

/// Substitute every palette token in `template`.
///
/// Backtick-delimited text that is not a palette token is copied through
/// with its backticks, as is an unterminated backtick at the end.
pub fn render(template: &str, palette: &Palette, format: OutputFormat) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('`') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('`') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &after[..close];
        match resolve(token, palette) {
            Some(color) => out.push_str(&format.format(color)),
            None => {
                out.push('`');
                out.push_str(token);
                out.push('`');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Render every regular file in `templates_dir` into `out_dir` under the
/// same file name. Returns the written paths in file-name order.
pub fn render_dir(
    templates_dir: &Path,
    out_dir: &Path,
    palette: &Palette,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(templates_dir).with_context(|| {
        format!(
            "failed to read template directory: {}",
            templates_dir.display()
        )
    })?;

    let mut templates = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", templates_dir.display()))?
            .path();
        if path.is_file() {
            templates.push(path);
        }
    }
    templates.sort();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(templates.len());
    for template in templates {
        let Some(file_name) = template.file_name() else {
            continue;
        };
        let content = std::fs::read_to_string(&template)
            .with_context(|| format!("failed to read template {}", template.display()))?;
        let out_path = out_dir.join(file_name);
        std::fs::write(&out_path, render(&content, palette, format))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!(template = %template.display(), output = %out_path.display(), "rendered template");
        written.push(out_path);
    }

    info!(count = written.len(), dir = %out_dir.display(), "rendered templates");
    Ok(written)
}
