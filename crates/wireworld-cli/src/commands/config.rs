//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::{Context, Result};

use crate::config::{parse_value, Config};

const VALID_KEYS: &str = "fps, view-width, view-height, board-width, board-height, color";

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("WireWorld CLI Configuration");
    println!("{:-<40}", "");

    println!("FPS:                 {}", config.fps);
    println!("View Size:           {}x{}", config.view_width, config.view_height);
    println!("New Board Size:      {}x{}", config.board_width, config.board_height);
    println!("Color:               {}", if config.color { "on" } else { "off" });

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value and persist it.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let invalid = || format!("Invalid value for {}: {}", key, value);

    match key {
        "fps" => {
            let fps: f64 = parse_value(value).with_context(invalid)?;
            if !fps.is_finite() {
                anyhow::bail!("fps must be a finite number, got {}", value);
            }
            config.fps = fps;
        }
        "view-width" => config.view_width = parse_value(value).with_context(invalid)?,
        "view-height" => config.view_height = parse_value(value).with_context(invalid)?,
        "board-width" => config.board_width = parse_value(value).with_context(invalid)?,
        "board-height" => config.board_height = parse_value(value).with_context(invalid)?,
        "color" => config.color = parse_value(value).with_context(invalid)?,
        _ => {
            anyhow::bail!("Unknown config key: {}. Valid keys: {}", key, VALID_KEYS);
        }
    }

    config.save()?;
    println!("✅ Set {} to {}", key, value);
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "fps" => config.fps.to_string(),
        "view-width" => config.view_width.to_string(),
        "view-height" => config.view_height.to_string(),
        "board-width" => config.board_width.to_string(),
        "board-height" => config.board_height.to_string(),
        "color" => config.color.to_string(),
        _ => {
            anyhow::bail!("Unknown config key: {}. Valid keys: {}", key, VALID_KEYS);
        }
    };

    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
