//! CLI configuration management.
//!
//! Values come from built-in defaults, then the JSON config file, then
//! environment variables (a `.env` file is honoured).

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable that overrides the config file location.
pub const CONFIG_FILE_ENV: &str = "WW_CONFIG_FILE";

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playback rate for `ww run`, in generations per second. `<= 0` is unpaced.
    pub fps: f64,

    /// Default view width in cells.
    pub view_width: usize,

    /// Default view height in cells.
    pub view_height: usize,

    /// Width of boards created with `ww new --empty`.
    pub board_width: usize,

    /// Height of boards created with `ww new --empty`.
    pub board_height: usize,

    /// Render with ANSI true colour instead of plain glyphs.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 15.0,
            view_width: 30,
            view_height: 40,
            board_width: 100,
            board_height: 100,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file()?;

        // Environment takes precedence over the file
        if let Some(fps) = env_value("WW_FPS") {
            config.fps = fps;
        }
        if let Some(width) = env_value("WW_VIEW_WIDTH") {
            config.view_width = width;
        }
        if let Some(height) = env_value("WW_VIEW_HEIGHT") {
            config.view_height = height;
        }
        if let Some(width) = env_value("WW_BOARD_WIDTH") {
            config.board_width = width;
        }
        if let Some(height) = env_value("WW_BOARD_HEIGHT") {
            config.board_height = height;
        }
        if let Some(color) = env_value("WW_COLOR") {
            config.color = color;
        }

        Ok(config)
    }

    /// Load defaults overlaid with the config file only.
    ///
    /// Used when the configuration is about to be written back, so that
    /// environment overrides never end up persisted.
    pub fn load_file() -> Result<Self> {
        let Some(config_path) = Self::config_file_path() else {
            return Ok(Self::default());
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_FILE_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "wireworld", "ww")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}

/// Parse an environment variable, ignoring it when unset or malformed.
fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match parse_value(&raw) {
        Some(value) => Some(value),
        None => {
            warn!(key, value = %raw, "Ignoring malformed environment value");
            None
        }
    }
}

/// Parse a config value, accepting `yes`/`no`/`on`/`off`/`1`/`0` for booleans.
pub fn parse_value<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    raw.parse().ok().or_else(|| {
        let alias = match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => "true",
            "false" | "no" | "off" | "0" => "false",
            _ => return None,
        };
        alias.parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fps, 15.0);
        assert_eq!((config.view_width, config.view_height), (30, 40));
        assert_eq!((config.board_width, config.board_height), (100, 100));
        assert!(config.color);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "fps": 4.0 }"#).unwrap();
        assert_eq!(config.fps, 4.0);
        assert_eq!(config.view_width, 30);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<bool>("off"), Some(false));
        assert_eq!(parse_value::<bool>("TRUE"), Some(true));
        assert_eq!(parse_value::<bool>("1"), Some(true));
        assert_eq!(parse_value::<bool>("true"), Some(true));
        assert_eq!(parse_value::<usize>("1"), Some(1));
        assert_eq!(parse_value::<usize>("0"), Some(0));
        assert_eq!(parse_value::<f64>(" 2.5 "), Some(2.5));
        assert_eq!(parse_value::<usize>("-3"), None);
    }
}
