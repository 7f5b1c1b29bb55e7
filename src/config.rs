use std::path::Path;

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "PHOTOBOOTH_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the editor. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub max_photos: usize,
    pub photo_width: f32,
    pub photo_height: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Oldest history entries are dropped beyond this many snapshots
    pub history_limit: usize,
    pub export_file_name: String,
    /// Placeholder fill colors, indexed by photo id
    pub palette: Vec<[u8; 3]>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 276.0,
            canvas_height: 828.0,
            max_photos: 8,
            photo_width: 100.0,
            photo_height: 75.0,
            min_scale: 0.1,
            max_scale: 5.0,
            history_limit: 100,
            export_file_name: "photobooth-frame.png".to_owned(),
            palette: vec![
                [239, 68, 68],
                [59, 130, 246],
                [16, 185, 129],
                [245, 158, 11],
                [139, 92, 246],
                [236, 72, 153],
                [20, 184, 166],
                [249, 115, 22],
            ],
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the editor cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be a positive number, got {value}")))
            }
        };
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("photo_width", self.photo_width)?;
        positive("photo_height", self.photo_height)?;
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(ConfigError::Invalid(format!(
                "min_scale {} is above max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".to_owned()));
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `PHOTOBOOTH_CONFIG` if set, falling back to defaults on any error
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {path}: {err}");
                Self::default()
            }
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    pub fn photo_size(&self) -> Vec2 {
        Vec2::new(self.photo_width, self.photo_height)
    }

    /// Placeholder color for a photo id, cycling through the palette
    pub fn placeholder_color(&self, photo_id: usize) -> Color32 {
        if self.palette.is_empty() {
            return Color32::GRAY;
        }
        let [r, g, b] = self.palette[(photo_id.saturating_sub(1)) % self.palette.len()];
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "max_photos": 4 }"#).unwrap();
        assert_eq!(config.max_photos, 4);
        assert_eq!(config.canvas_size(), Vec2::new(276.0, 828.0));
        assert_eq!(config.export_file_name, "photobooth-frame.png");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn inverted_scale_bounds_are_invalid() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{ "min_scale": 5.0, "max_scale": 0.1 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn non_positive_canvas_is_invalid() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{ "canvas_width": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        let config = EditorConfig {
            max_scale: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("photobooth-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "history_limit": 0 }"#).unwrap();
        let result = EditorConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn palette_cycles_by_photo_id() {
        let config = EditorConfig::default();
        assert_eq!(config.placeholder_color(1), Color32::from_rgb(239, 68, 68));
        assert_eq!(config.placeholder_color(9), config.placeholder_color(1));
        assert_eq!(config.placeholder_color(2), Color32::from_rgb(59, 130, 246));
    }

    #[test]
    fn empty_palette_falls_back_to_gray() {
        let config = EditorConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.placeholder_color(3), Color32::GRAY);
    }
}
