//! Session configuration
//!
//! # Example Config File
//!
//! ```toml
//! distance_threshold = 0.05        # minimum spacing while dragging on a plane (m)
//! front_placement_distance = 0.2   # freeform placement distance from the camera (m)
//! reference_image_group = "AR Resources"
//! plane_overlay_opacity = 0.25
//! plane_overlay_color = [1.0, 0.68, 0.118, 1.0]
//! plane_detection = "horizontal"  # or "vertical"
//! ```
//!
//! Environment variables `ARDRAW_DISTANCE_THRESHOLD` and
//! `ARDRAW_FRONT_DISTANCE` override the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tracking::PlaneDetection;
use crate::{Result, SessionError};

/// Drawing session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum distance between consecutive plane placements of one drag
    pub distance_threshold: f32,

    /// How far in front of the camera freeform placements land
    pub front_placement_distance: f32,

    /// Reference image group used in image mode
    pub reference_image_group: String,

    pub plane_overlay_opacity: f32,

    /// RGBA
    pub plane_overlay_color: [f32; 4],

    /// Plane orientation the tracker looks for
    pub plane_detection: PlaneDetection,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.05,
            front_placement_distance: 0.2,
            reference_image_group: "AR Resources".to_string(),
            plane_overlay_opacity: 0.25,
            plane_overlay_color: [1.0, 0.68, 0.118, 1.0],
            plane_detection: PlaneDetection::Horizontal,
        }
    }
}

impl SessionConfig {
    pub const ENV_DISTANCE_THRESHOLD: &'static str = "ARDRAW_DISTANCE_THRESHOLD";
    pub const ENV_FRONT_DISTANCE: &'static str = "ARDRAW_FRONT_DISTANCE";

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key/value source. Unparseable values are
    /// ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for (key, field) in [
            (Self::ENV_DISTANCE_THRESHOLD, &mut self.distance_threshold),
            (Self::ENV_FRONT_DISTANCE, &mut self.front_placement_distance),
        ] {
            let Some(value) = lookup(key) else { continue };
            match value.trim().parse::<f32>() {
                Ok(parsed) => {
                    *field = parsed;
                    log::info!("{} from env: {}", key, parsed);
                }
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", key, value),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("distance_threshold", self.distance_threshold),
            ("front_placement_distance", self.front_placement_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SessionError::InvalidConfig(format!(
                    "{} must be a non-negative distance, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.plane_overlay_opacity) {
            return Err(SessionError::InvalidConfig(format!(
                "plane_overlay_opacity must be within [0, 1], got {}",
                self.plane_overlay_opacity
            )));
        }

        Ok(())
    }
}
