use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::debug;

use crate::color::Color;
use crate::error::CacheError;
use crate::pipeline::assign::{Palette, SLOT_COUNT};
use crate::pipeline::ExtractOptions;

/// Previously extracted palettes, one `.pal` file per image and parameter set.
#[derive(Debug, Clone)]
pub struct SchemeCache {
    dir: PathBuf,
}

impl SchemeCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file for an image. The key covers the image path and mtime plus
    /// every parameter that changes the resulting palette.
    pub fn entry_path(&self, image: &Path, options: &ExtractOptions, saturation: f32) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        image.as_os_str().hash(&mut hasher);
        if let Some(secs) = std::fs::metadata(image)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
        {
            secs.hash(&mut hasher);
        }
        options.hash(&mut hasher);
        saturation.to_bits().hash(&mut hasher);

        self.dir.join(format!("{:x}.pal", hasher.finish()))
    }

    /// Read a cached palette. A missing file is `Ok(None)`.
    pub fn load(&self, path: &Path) -> Result<Option<Palette>, CacheError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let palette = parse(&content, path)?;
        debug!(path = %path.display(), "palette cache hit");
        Ok(Some(palette))
    }

    pub fn store(&self, path: &Path, palette: &Palette) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serialize(palette))?;
        debug!(path = %path.display(), "palette cached");
        Ok(())
    }
}

/// Cache order: background, foreground, then color1..color14.
fn cache_order() -> impl Iterator<Item = usize> {
    [0, SLOT_COUNT - 1].into_iter().chain(1..SLOT_COUNT - 1)
}

pub fn serialize(palette: &Palette) -> String {
    let slots = palette.slots();
    cache_order()
        .map(|i| format!("{}\n", slots[i].to_hex()))
        .collect()
}

pub fn parse(content: &str, path: &Path) -> Result<Palette, CacheError> {
    let mut colors = Vec::with_capacity(SLOT_COUNT);
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let color = Color::from_hex(line).map_err(|e| CacheError::InvalidColor {
            path: path.to_path_buf(),
            line: n + 1,
            reason: e.to_string(),
        })?;
        colors.push(color);
    }
    if colors.len() != SLOT_COUNT {
        return Err(CacheError::WrongColorCount {
            path: path.to_path_buf(),
            found: colors.len(),
        });
    }

    let mut slots = [colors[0]; SLOT_COUNT];
    for (slot, color) in cache_order().zip(colors) {
        slots[slot] = color;
    }
    Ok(Palette::from_slots(slots))
}
