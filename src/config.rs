//! Configuration loaded once at startup from `config.json`.

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

mod app_config;

pub use app_config::{
    normalize_font_size, Config, EditorConfig, StorageConfig, TrayConfig, WindowConfig,
};

const FILENAME: &str = "config.json";

/// Global configuration
pub static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::load()));

impl Config {
    /// Get the configuration file path
    pub fn path() -> PathBuf {
        if let Some(mut path) = dirs::config_dir() {
            path.push("tripad");
            path.push(FILENAME);
            return path;
        }

        // Fallback to home directory
        if let Some(mut path) = dirs::home_dir() {
            path.push(".tripad");
            path.push(FILENAME);
            return path;
        }

        PathBuf::from(FILENAME)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load from `path`. A missing file is normal; a broken one is logged.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded config");
                    config.normalized()
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config file, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            Config::load_from(&dir.path().join("config.json")),
            Config::default()
        );
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"window": {"alwaysOnTop": true}, "editor": {"fontSize": 14}}"#)
            .unwrap();

        let config = Config::load_from(&path);
        assert!(config.window.always_on_top);
        assert_eq!(config.window.width, 1400);
        assert_eq!(config.editor.font_size, 14);
        assert!(config.tray.enabled);
    }

    #[test]
    fn test_load_invalid_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_load_clamps_font_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"editor": {"fontSize": 500}}"#).unwrap();
        assert_eq!(Config::load_from(&path).editor.font_size, 72);
    }
}
