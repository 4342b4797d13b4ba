//! Game tuning and playfield bounds
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the JSON config file
pub const CONFIG_ENV: &str = "INVADERS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything that shapes a game, in playfield units per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub canvas_width: f64,
    pub canvas_height: f64,

    // === Ship ===
    pub ship_width: f64,
    pub ship_height: f64,
    /// Gap between the ship and the bottom edge
    pub ship_margin: f64,
    pub ship_speed: f64,

    // === Bullets ===
    pub bullet_width: f64,
    pub bullet_height: f64,
    pub bullet_speed: f64,

    // === Enemy grid ===
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: f64,
    pub enemy_height: f64,
    pub enemy_padding: f64,
    pub enemy_offset_top: f64,
    pub enemy_offset_left: f64,
    pub enemy_speed: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,

            ship_width: 40.0,
            ship_height: 20.0,
            ship_margin: 10.0,
            ship_speed: 4.0,

            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 2.0,

            enemy_rows: 5,
            enemy_cols: 10,
            enemy_width: 30.0,
            enemy_height: 30.0,
            enemy_padding: 10.0,
            enemy_offset_top: 30.0,
            enemy_offset_left: 30.0,
            enemy_speed: 0.2,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `$INVADERS_CONFIG` if set, otherwise use the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    /// Horizontal extent of the enemy grid as first laid out
    pub fn grid_width(&self) -> f64 {
        let cols = self.enemy_cols as f64;
        cols * self.enemy_width + (cols - 1.0) * self.enemy_padding
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("ship_margin", self.ship_margin),
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_padding", self.enemy_padding),
            ("enemy_offset_top", self.enemy_offset_top),
            ("enemy_offset_left", self.enemy_offset_left),
            ("enemy_speed", self.enemy_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be non-negative, got {value}")));
            }
        }

        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            return Err(invalid(format!(
                "enemy grid must have at least one row and column, got {}x{}",
                self.enemy_rows, self.enemy_cols
            )));
        }
        if self.ship_width > self.canvas_width {
            return Err(invalid(format!(
                "ship_width {} exceeds canvas_width {}",
                self.ship_width, self.canvas_width
            )));
        }
        if self.ship_height + self.ship_margin > self.canvas_height {
            return Err(invalid(format!(
                "ship does not fit vertically in canvas_height {}",
                self.canvas_height
            )));
        }
        if self.enemy_offset_left + self.grid_width() > self.canvas_width {
            return Err(invalid(format!(
                "enemy grid ({} wide at offset {}) does not fit canvas_width {}",
                self.grid_width(),
                self.enemy_offset_left,
                self.canvas_width
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}
