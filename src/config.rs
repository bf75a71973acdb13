//! Plot Configuration
//! Canvas geometry and sampling limits, loadable from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Insets between the surface edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 40,
            right: 40,
            bottom: 60,
            left: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    pub padding: Padding,
    /// Number of intervals; `sample_count + 1` x values are evaluated
    pub sample_count: usize,
    /// Widest accepted x range
    pub max_x_span: f64,
    /// Y spans above this fall back to `fallback_y_range`
    pub y_overflow_limit: f64,
    pub fallback_y_range: (f64, f64),
    /// Roughly how many markers to draw along the curve
    pub marker_target: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 550,
            padding: Padding::default(),
            sample_count: 800,
            max_x_span: 1000.0,
            y_overflow_limit: 1e6,
            fallback_y_range: (-10.0, 10.0),
            marker_target: 50,
        }
    }
}

impl PlotConfig {
    /// Load a JSON config. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: PlotConfig = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded plot config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("surface size must be non-zero".into()));
        }
        let horizontal = self.padding.left.checked_add(self.padding.right);
        let vertical = self.padding.top.checked_add(self.padding.bottom);
        match (horizontal, vertical) {
            (Some(h), Some(v)) if h < self.width && v < self.height => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "padding leaves no room for the plot area".into(),
                ))
            }
        }
        if self.sample_count == 0 {
            return Err(ConfigError::Invalid("sample_count must be at least 1".into()));
        }
        if !(self.max_x_span > 0.0) {
            return Err(ConfigError::Invalid("max_x_span must be positive".into()));
        }
        if !(self.y_overflow_limit > 0.0) {
            return Err(ConfigError::Invalid(
                "y_overflow_limit must be positive".into(),
            ));
        }
        let (lo, hi) = self.fallback_y_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ConfigError::Invalid(
                "fallback_y_range must be an increasing finite pair".into(),
            ));
        }
        Ok(())
    }

    /// Width of the plot area inside the padding.
    pub fn plot_width(&self) -> f64 {
        let padding = self.padding.left as u64 + self.padding.right as u64;
        (self.width as u64).saturating_sub(padding) as f64
    }

    /// Height of the plot area inside the padding.
    pub fn plot_height(&self) -> f64 {
        let padding = self.padding.top as u64 + self.padding.bottom as u64;
        (self.height as u64).saturating_sub(padding) as f64
    }
}
