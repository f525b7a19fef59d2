//! Configuration types for festin.
//!
//! [`Config::load`] reads `~/.config/festin/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[dataset]
url = "https://www.data.gouv.fr/fr/datasets/r/47ac11c2-8a00-46a7-9fa8-9b802643f975"

[ui]
sidebar_width_pct = 28
map_grid_cols     = 60
map_grid_rows     = 40

[keybindings]
cycle_focus  = "Tab"
switch_view  = "1-5"
apply_filter = "Enter"
command      = ":"
help         = "?"
quit         = "q"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from
/// `~/.config/festin/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[dataset]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Stable download URL of the festivals export.
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    "https://www.data.gouv.fr/fr/datasets/r/47ac11c2-8a00-46a7-9fa8-9b802643f975".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_sidebar_width_pct")]
    pub sidebar_width_pct: u16,
    /// Horizontal resolution of the map density grid.
    #[serde(default = "default_map_grid_cols")]
    pub map_grid_cols: usize,
    /// Vertical resolution of the map density grid.
    #[serde(default = "default_map_grid_rows")]
    pub map_grid_rows: usize,
}

fn default_sidebar_width_pct() -> u16 { 28 }
fn default_map_grid_cols() -> usize { 60 }
fn default_map_grid_rows() -> usize { 40 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width_pct: default_sidebar_width_pct(),
            map_grid_cols: default_map_grid_cols(),
            map_grid_rows: default_map_grid_rows(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/festin/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("festin")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert!(cfg.dataset.url.starts_with("https://www.data.gouv.fr/"));
        assert_eq!(cfg.ui.sidebar_width_pct, 28);
        assert_eq!(cfg.ui.map_grid_cols, 60);
        assert_eq!(cfg.ui.map_grid_rows, 40);
    }
}
