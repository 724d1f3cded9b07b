use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{ShapeError, ShapeResult};

/// Tunables for a [`crate::Canvas`].
///
/// Missing fields fall back to their defaults when deserializing, so a partial
/// JSON document such as `{"width": 4000}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Size of the scrollable background, in canvas units at zoom 1.
    pub width: f32,
    pub height: f32,
    /// Background color as `[r, g, b]`.
    pub background_color: [u8; 3],
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    /// Zooming in stops once the background is taller than this.
    pub max_zoomed_extent: f32,
    /// Zooming out stops once the background is narrower than the view plus this margin.
    pub min_zoom_margin: f32,
    /// Horizontal offset of the two injected wire midpoints at zoom 1.
    pub wire_curve_offset: f32,
    /// Frames used to slide a toggle switch from one end to the other.
    pub slider_steps: u32,
    pub event_queue_capacity: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 10_000.0,
            height: 10_000.0,
            background_color: [0x99, 0xbb, 0xff],
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            max_zoomed_extent: 50_000.0,
            min_zoom_margin: 1_000.0,
            wire_curve_offset: 20.0,
            slider_steps: 5,
            event_queue_capacity: 100,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> ShapeResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ShapeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ShapeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ShapeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ShapeResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ShapeError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.zoom_in_factor <= 1.0 {
            return Err(ShapeError::Config(format!(
                "zoom_in_factor must be greater than 1, got {}",
                self.zoom_in_factor
            )));
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(ShapeError::Config(format!(
                "zoom_out_factor must be between 0 and 1, got {}",
                self.zoom_out_factor
            )));
        }
        if self.slider_steps == 0 {
            return Err(ShapeError::Config("slider_steps must be at least 1".into()));
        }
        if self.event_queue_capacity == 0 {
            return Err(ShapeError::Config(
                "event_queue_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn background(&self) -> Color32 {
        let [r, g, b] = self.background_color;
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json_str(r#"{ "width": 4000.0 }"#).unwrap();
        assert_eq!(config.width, 4000.0);
        assert_eq!(config.height, 10_000.0);
        assert_eq!(config.event_queue_capacity, 100);
        assert_eq!(config.background(), Color32::from_rgb(0x99, 0xbb, 0xff));
    }

    #[test]
    fn rejects_bad_zoom_factors() {
        let err = CanvasConfig::from_json_str(r#"{ "zoom_out_factor": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ShapeError::Config(_)));

        let err = CanvasConfig::from_json_str(r#"{ "zoom_in_factor": 0.5 }"#).unwrap_err();
        assert!(matches!(err, ShapeError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = CanvasConfig::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, ShapeError::Config(_)));
    }

    #[test]
    fn json_roundtrip_preserves_values() {
        let config = CanvasConfig {
            slider_steps: 8,
            ..Default::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(CanvasConfig::from_json_str(&json).unwrap(), config);
    }
}
