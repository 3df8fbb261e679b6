use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::Profile;

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV_VAR: &str = "WHITEBOARD_CONFIG";

/// Tunables for a whiteboard session.
///
/// Every field has a default so a config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Color the surface is cleared to; also what the eraser paints.
    pub background: [u8; 3],
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    pub brush_size_min: f32,
    pub brush_size_max: f32,
    pub brush_size: f32,
    pub color: [u8; 3],
    pub polygon_sides: usize,
    /// Text font size is `brush_size * text_scale`.
    pub text_scale: f32,
    pub export_file_name: String,
    pub profile: Option<Profile>,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            background: [255, 255, 255],
            zoom_min: 0.2,
            zoom_max: 5.0,
            zoom_step: 0.1,
            brush_size_min: 1.0,
            brush_size_max: 30.0,
            brush_size: 4.0,
            color: [0, 0, 0],
            polygon_sides: 5,
            text_scale: 4.0,
            export_file_name: "drawing.png".to_owned(),
            profile: None,
        }
    }
}

impl WhiteboardConfig {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.sanitized())
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    ///
    /// A broken config file is logged and ignored rather than refusing to start.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {err}", Path::new(&path).display());
                Self::default()
            }
        }
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    pub fn default_color(&self) -> Color32 {
        let [r, g, b] = self.color;
        Color32::from_rgb(r, g, b)
    }

    /// Repair values that would make the engine misbehave.
    ///
    /// Afterwards `zoom_min <= zoom_max`, `brush_size_min <= brush_size_max`,
    /// `zoom_step > 0` and every range bound is finite, so clamping into them
    /// can never panic.
    pub(crate) fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.canvas_width = self.canvas_width.max(1);
        self.canvas_height = self.canvas_height.max(1);

        finite_or(&mut self.zoom_min, defaults.zoom_min);
        finite_or(&mut self.zoom_max, defaults.zoom_max);
        if self.zoom_min > self.zoom_max {
            std::mem::swap(&mut self.zoom_min, &mut self.zoom_max);
        }
        self.zoom_min = self.zoom_min.max(0.01);
        self.zoom_max = self.zoom_max.max(self.zoom_min);
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            self.zoom_step = defaults.zoom_step;
        }

        finite_or(&mut self.brush_size_min, defaults.brush_size_min);
        finite_or(&mut self.brush_size_max, defaults.brush_size_max);
        finite_or(&mut self.brush_size, defaults.brush_size);
        if self.brush_size_min > self.brush_size_max {
            std::mem::swap(&mut self.brush_size_min, &mut self.brush_size_max);
        }
        self.brush_size_min = self.brush_size_min.max(1.0);
        self.brush_size_max = self.brush_size_max.max(self.brush_size_min);
        self.brush_size = self.brush_size.clamp(self.brush_size_min, self.brush_size_max);

        finite_or(&mut self.text_scale, defaults.text_scale);
        self.polygon_sides = self.polygon_sides.max(3);
        self
    }
}

fn finite_or(value: &mut f32, fallback: f32) {
    if !value.is_finite() {
        *value = fallback;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = WhiteboardConfig::from_json(r#"{ "canvas_width": 64, "zoom_max": 3.0 }"#).unwrap();
        assert_eq!(config.canvas_width, 64);
        assert_eq!(config.canvas_height, 720);
        assert_eq!(config.zoom_max, 3.0);
        assert_eq!(config.export_file_name, "drawing.png");
        assert_eq!(config.polygon_sides, 5);
    }

    #[test]
    fn test_config_with_profile() {
        let config = WhiteboardConfig::from_json(
            r#"{ "profile": { "username": "ada", "email": "ada@example.com" } }"#,
        )
        .unwrap();
        let profile = config.profile.unwrap();
        assert_eq!(profile.username, "ada");
        assert_eq!(profile.initial(), "A");
    }

    #[test]
    fn test_inverted_ranges_are_repaired() {
        let config = WhiteboardConfig::from_json(
            r#"{ "zoom_min": 4.0, "zoom_max": 0.5, "brush_size": 100.0, "polygon_sides": 1 }"#,
        )
        .unwrap();
        assert_eq!(config.zoom_min, 0.5);
        assert_eq!(config.zoom_max, 4.0);
        assert_eq!(config.brush_size, config.brush_size_max);
        assert_eq!(config.polygon_sides, 3);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(WhiteboardConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_negative_zoom_range_is_repaired() {
        let config = WhiteboardConfig::from_json(r#"{ "zoom_min": -1.0, "zoom_max": -0.5, "zoom_step": -0.3 }"#)
            .unwrap();
        assert_eq!(config.zoom_min, 0.01);
        assert_eq!(config.zoom_max, 0.01);
        assert_eq!(config.zoom_step, 0.1);
    }

    #[test]
    fn test_hand_built_config_is_repaired() {
        let config = WhiteboardConfig {
            brush_size_min: 10.0,
            brush_size_max: 2.0,
            zoom_min: f32::NAN,
            zoom_step: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!((config.brush_size_min, config.brush_size_max), (2.0, 10.0));
        assert_eq!(config.brush_size, 4.0);
        assert_eq!(config.zoom_min, 0.2);
        assert_eq!(config.zoom_step, 0.1);
    }
}
