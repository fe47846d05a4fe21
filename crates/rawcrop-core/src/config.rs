//! Tuning constants for active-area estimation
//!
//! [`CropConfig`] is an immutable value passed explicitly to every stage.
//! It can be built in code, or loaded from YAML:
//!
//! ```yaml
//! bit_depth: 14
//! max_delta_stops: 0.5
//! alignment: 4
//! ```
//!
//! Missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tuning constants for one estimation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// log2 of the white level set when the PFM was generated (default: 16).
    /// Samples are scaled by `2^bit_depth - 1` before analysis.
    pub bit_depth: u32,

    /// Pixels no more than this many stops below the brightest pixel are
    /// considered properly clipped, active pixels (default: 0.3)
    pub max_delta_stops: f64,

    /// Lowest acceptable fraction of clipped pixels (default: 0.95)
    pub threshold_low: f64,

    /// Highest acceptable fraction of clipped pixels (default: 0.999)
    pub threshold_high: f64,

    /// Crop coordinates are rounded up to a multiple of this (default: 2)
    pub alignment: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            bit_depth: 16,
            max_delta_stops: 0.3,
            threshold_low: 0.95,
            threshold_high: 0.999,
            alignment: 2,
        }
    }
}

impl CropConfig {
    /// Create new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the white level exponent
    pub fn with_bit_depth(mut self, bit_depth: u32) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Set the clipping tolerance in stops
    pub fn with_max_delta_stops(mut self, stops: f64) -> Self {
        self.max_delta_stops = stops;
        self
    }

    /// Set the acceptable clipped-fraction band
    pub fn with_threshold_band(mut self, low: f64, high: f64) -> Self {
        self.threshold_low = low;
        self.threshold_high = high;
        self
    }

    /// Set the crop rounding granularity
    pub fn with_alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }

    /// `2^bit_depth - 1`
    pub fn white_level(&self) -> f64 {
        2f64.powi(self.bit_depth as i32) - 1.0
    }

    /// `2^(-max_delta_stops)`, the multiplier applied to the brightest
    /// sample to get the clipping threshold
    pub fn clip_factor(&self) -> f64 {
        (-self.max_delta_stops).exp2()
    }

    /// Validate config
    pub fn validate(&self) -> Result<()> {
        if !(1..=32).contains(&self.bit_depth) {
            return Err(Error::InvalidParameter(format!(
                "bit_depth must be in 1..=32, got {}",
                self.bit_depth
            )));
        }
        if !self.max_delta_stops.is_finite() || self.max_delta_stops < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "max_delta_stops must be finite and non-negative, got {}",
                self.max_delta_stops
            )));
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.threshold_low) || !in_unit(self.threshold_high) {
            return Err(Error::InvalidParameter(format!(
                "threshold band must lie in [0, 1], got [{}, {}]",
                self.threshold_low, self.threshold_high
            )));
        }
        if self.threshold_low > self.threshold_high {
            return Err(Error::InvalidParameter(format!(
                "threshold_low {} exceeds threshold_high {}",
                self.threshold_low, self.threshold_high
            )));
        }
        if self.alignment == 0 {
            return Err(Error::InvalidParameter(
                "alignment must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: CropConfig = serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(format!("failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }
}
