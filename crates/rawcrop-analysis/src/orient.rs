//! Orientation normalization
//!
//! PFM stores rows bottom first. The analysis works on a top-first,
//! `(x, y)` indexed [`DPix`] whose first axis is the image width, scaled
//! to the sensor's integer white level.

use rawcrop_core::{CropConfig, DPix, FPix};
use rawcrop_io::RawImage;

use crate::{AnalysisError, AnalysisResult, validate_config};

/// Turn a loaded PFM into the canonical sample array.
///
/// Color images contribute channel 0 only. Rows are reversed into
/// top-first order before [`normalize_plane`] scales and checks them.
///
/// # Errors
///
/// Returns [`AnalysisError::Orientation`] if the image is taller than it
/// is wide, and [`AnalysisError::Config`] for an invalid `config`.
pub fn normalize(raw: &RawImage, config: &CropConfig) -> AnalysisResult<DPix> {
    if raw.channels > 1 {
        tracing::debug!(channels = raw.channels, "using channel 0 only");
    }
    let plane = raw.channel_plane(0)?.flip_tb();
    normalize_plane(&plane, config)
}

/// Scale an already oriented plane by the white level and check its shape.
pub fn normalize_plane(plane: &FPix, config: &CropConfig) -> AnalysisResult<DPix> {
    validate_config(config)?;

    if let Some(bad) = plane.data().iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(AnalysisError::Core(rawcrop_core::Error::InvalidParameter(
            format!("samples must be finite and non-negative, found {bad}"),
        )));
    }

    let mut samples = DPix::from_fpix(plane);
    samples.mul_constant(config.white_level());

    let (width, height) = samples.dimensions();
    if width < height {
        return Err(AnalysisError::Orientation { width, height });
    }

    tracing::debug!(width, height, white_level = config.white_level(), "normalized samples");
    Ok(samples)
}
