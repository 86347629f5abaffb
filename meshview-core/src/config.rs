/// Viewer configuration
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::input::Controls;
use crate::projection::Camera;
use crate::shading::Palette;

/// Everything the viewer treats as fixed for the lifetime of a session.
///
/// Every field has a default, so a TOML file only needs the values it
/// overrides:
///
/// ```toml
/// initial_offset = [0.0, 0.0, 6.0]
///
/// [controls]
/// rotation_speed = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub camera: Camera,
    pub palette: Palette,
    pub controls: Controls,
    /// Translation applied once to the loaded mesh
    pub initial_offset: [f32; 3],
}

impl ViewConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        contents.parse()
    }
}

impl ViewConfig {
    /// Reject camera settings the projection cannot divide by
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if camera.width == 0 || camera.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "camera resolution must be non-zero, got {}x{}",
                camera.width, camera.height
            )));
        }
        for (name, value) in [("fov_x", camera.fov_x), ("fov_y", camera.fov_y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("camera.{name} must be positive, got {value}")));
            }
        }
        if !camera.distance.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "camera.distance must be finite, got {}",
                camera.distance
            )));
        }
        Ok(())
    }
}

impl std::str::FromStr for ViewConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ViewConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            palette: Palette::default(),
            controls: Controls::default(),
            initial_offset: [0.0, 0.0, 10.0],
        }
    }
}
