//! Controller configuration and size bounds.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default smallest font size a gesture may produce.
pub const DEFAULT_MIN_SIZE: f64 = 12.0;
/// Default largest font size a gesture may produce.
pub const DEFAULT_MAX_SIZE: f64 = 72.0;
/// Font size change per wheel notch.
pub const DEFAULT_WHEEL_STEP: f64 = 1.0;
/// Font size units per pixel of corner handle displacement.
pub const DEFAULT_RESIZE_SENSITIVITY: f64 = 0.1;
/// Distance from perfect horizontal centering that still snaps, in pixels.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 20.0;
/// Corner handle size in pixels.
pub const DEFAULT_HANDLE_SIZE: f64 = 16.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid size bounds: min {min} must be positive and not exceed max {max}")]
    InvalidBounds { min: f64, max: f64 },
    #[error("invalid {name}: {value} (must be a positive finite number)")]
    InvalidValue { name: &'static str, value: f64 },
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Overlay colors as stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayColors {
    /// Box outline while the selection is free.
    pub stroke: SerializableColor,
    /// Box outline while the selection is snapped to the center line.
    pub snapped_stroke: SerializableColor,
    /// Corner handle fill.
    pub handle_fill: SerializableColor,
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            stroke: SerializableColor::new(59, 130, 246, 255),
            snapped_stroke: SerializableColor::new(236, 72, 153, 255),
            handle_fill: SerializableColor::new(255, 255, 255, 255),
        }
    }
}

/// Gesture controller configuration.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub min_size: f64,
    pub max_size: f64,
    pub wheel_step: f64,
    pub resize_sensitivity: f64,
    pub snap_threshold: f64,
    pub handle_size: f64,
    pub overlay: OverlayColors,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            wheel_step: DEFAULT_WHEEL_STEP,
            resize_sensitivity: DEFAULT_RESIZE_SENSITIVITY,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            handle_size: DEFAULT_HANDLE_SIZE,
            overlay: OverlayColors::default(),
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the size bounds.
    pub fn with_bounds(mut self, min_size: f64, max_size: f64) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Check that every numeric setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        for (name, value) in [
            ("wheel_step", self.wheel_step),
            ("resize_sensitivity", self.resize_sensitivity),
            ("snap_threshold", self.snap_threshold),
            ("handle_size", self.handle_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        Ok(())
    }

    /// The configured size bounds.
    pub fn bounds(&self) -> Result<SizeBounds, ConfigError> {
        SizeBounds::new(self.min_size, self.max_size)
    }
}

/// Inclusive font size bounds applied to every size-changing gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    min: f64,
    max: f64,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SIZE,
            max: DEFAULT_MAX_SIZE,
        }
    }
}

impl SizeBounds {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a size into the bounds. NaN maps to the minimum.
    pub fn clamp(&self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min;
        }
        size.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        let bounds = config.bounds().unwrap();
        assert_eq!(bounds.min(), 12.0);
        assert_eq!(bounds.max(), 72.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ControllerConfig::from_json(r#"{"min_size": 10, "max_size": 48}"#).unwrap();
        assert_eq!(config.min_size, 10.0);
        assert_eq!(config.max_size, 48.0);
        assert_eq!(config.snap_threshold, DEFAULT_SNAP_THRESHOLD);
        assert_eq!(config.overlay, OverlayColors::default());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = ControllerConfig::from_json(r#"{"min_size": 80, "max_size": 20}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let config = ControllerConfig {
            wheel_step: 0.0,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name: "wheel_step", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ControllerConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_clamp() {
        let bounds = SizeBounds::new(10.0, 72.0).unwrap();
        assert_eq!(bounds.clamp(5.0), 10.0);
        assert_eq!(bounds.clamp(100.0), 72.0);
        assert_eq!(bounds.clamp(30.0), 30.0);
        assert_eq!(bounds.clamp(f64::NAN), 10.0);
        assert_eq!(bounds.clamp(f64::INFINITY), 72.0);
        assert_eq!(bounds.clamp(f64::NEG_INFINITY), 10.0);
    }
}
