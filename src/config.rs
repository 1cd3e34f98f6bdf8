use std::path::{Path, PathBuf};

use egui::Color32;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::controller::DrawSettings;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "SKETCH_PAD_CONFIG";

/// Startup configuration. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub background_color: Color32,
    /// Where the finished picture is written as PNG.
    pub export_path: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let settings = DrawSettings::default();
        Self {
            stroke_color: settings.color,
            stroke_width: settings.thickness,
            background_color: settings.background_color,
            export_path: PathBuf::from("sketch.png"),
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or use defaults.
    /// A broken config file is reported and ignored.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring config {}: {err}", Path::new(&path).display());
                Self::default()
            }
        }
    }

    /// Initial pen settings. Erase mode always starts off.
    pub fn draw_settings(&self) -> DrawSettings {
        DrawSettings {
            color: self.stroke_color,
            thickness: self.stroke_width,
            erase_mode: false,
            background_color: self.background_color,
        }
    }
}
