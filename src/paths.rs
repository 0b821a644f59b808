use std::path::PathBuf;

const APP_DIR: &str = "pal";

/// `$XDG_CONFIG_HOME/pal`, falling back to `~/.config/pal`. Holds templates.
pub fn config_dir() -> PathBuf {
    resolve(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
        ".config",
    )
}

/// `$XDG_CACHE_HOME/pal`, falling back to `~/.cache/pal`. Holds rendered
/// templates and the palette cache.
pub fn cache_dir() -> PathBuf {
    resolve(
        std::env::var("XDG_CACHE_HOME").ok(),
        std::env::var("HOME").ok(),
        ".cache",
    )
}

fn resolve(xdg: Option<String>, home: Option<String>, fallback: &str) -> PathBuf {
    let base = xdg.filter(|dir| !dir.is_empty()).map(PathBuf::from).unwrap_or_else(|| {
        let home = home.unwrap_or_else(|| "~".to_string());
        PathBuf::from(home).join(fallback)
    });
    base.join(APP_DIR)
}
