//! Viewer configuration file.

use std::path::{Path, PathBuf};

use beltrami_core::{Result, ViewerError};
use beltrami_render::{OrbitMode, ViewerOptions};
use serde::{Deserialize, Serialize};

/// Settings for a headless run, read from TOML.
///
/// ```toml
/// frames = 240
/// frame_interval = 0.0166
/// max_radius = 1.5
/// orbit = "circular"
/// export = "surface.json"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Number of frames to draw.
    pub frames: u64,
    /// Simulated seconds between frames.
    pub frame_interval: f64,
    pub max_radius: f64,
    pub orbit: OrbitMode,
    /// Where to write the surface mesh as JSON, if anywhere.
    pub export: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            frame_interval: 1.0 / 60.0,
            max_radius: 1.0,
            orbit: OrbitMode::Faithful,
            export: None,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ViewerError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(self.frame_interval.is_finite() && self.frame_interval >= 0.0) {
            return Err(ViewerError::Config(format!(
                "frame_interval must be a non-negative number, got {}",
                self.frame_interval
            )));
        }
        if !self.max_radius.is_finite() {
            return Err(ViewerError::Config("max_radius must be finite".to_string()));
        }
        Ok(())
    }

    pub fn options(&self) -> ViewerOptions {
        ViewerOptions {
            orbit: self.orbit,
            max_radius: self.max_radius,
        }
    }

    /// Elapsed time of frame `index`.
    pub fn frame_time(&self, index: u64) -> f64 {
        index as f64 * self.frame_interval
    }
}
