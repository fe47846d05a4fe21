//! Exposure sanity check
//!
//! A calibration capture should be clipped almost everywhere. The check
//! counts pixels within `max_delta_stops` of the brightest one, once by
//! histogram and once directly, and warns when the usable fraction falls
//! outside the configured band.

use rawcrop_core::{CropConfig, DPix};

use crate::{AnalysisError, AnalysisResult, validate_config};

/// Result of the exposure check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureReport {
    /// `floor(2^-max_delta_stops * max)`
    pub threshold: f64,
    /// Brightest sample
    pub max: f64,
    /// Samples at or above `threshold`
    pub usable: u64,
    /// All samples
    pub total: u64,
    /// `usable / total`
    pub fraction: f64,
    /// Whether `fraction` lies in `[threshold_low, threshold_high]`
    pub within_band: bool,
}

/// Clipping threshold for a sample array.
pub fn clipping_threshold(samples: &DPix, config: &CropConfig) -> f64 {
    let max = samples.max_value().unwrap_or(0.0);
    (config.clip_factor() * max).floor()
}

/// Count usable pixels and check the fraction against the band.
///
/// # Errors
///
/// Returns [`AnalysisError::Consistency`] if the histogram and the direct
/// count disagree. A fraction outside the band is only a warning.
pub fn check_exposure(samples: &DPix, config: &CropConfig) -> AnalysisResult<ExposureReport> {
    validate_config(config)?;

    let max = samples
        .max_value()
        .ok_or(rawcrop_core::Error::NullInput("sample array"))?;
    let threshold = clipping_threshold(samples, config);
    let total = samples.size() as u64;

    let histo = samples.histogram_with_edges(&[0.0, threshold, max])?;
    let binned = histo.sum().unwrap_or(0.0) as u64;
    if binned != total {
        return Err(AnalysisError::Consistency(format!(
            "histogram holds {binned} of {total} samples"
        )));
    }
    let by_histogram = histo.get(1).unwrap_or(0.0) as u64;
    let usable = samples.count_at_or_above(threshold);
    if by_histogram != usable {
        return Err(AnalysisError::Consistency(format!(
            "usable pixel count differs: histogram {by_histogram}, direct {usable}"
        )));
    }

    let fraction = usable as f64 / total as f64;
    let within_band = (config.threshold_low..=config.threshold_high).contains(&fraction);
    if !within_band {
        tracing::warn!(
            fraction,
            low = config.threshold_low,
            high = config.threshold_high,
            "usable pixel fraction is outside the expected band; check the exposure"
        );
    }

    tracing::info!(threshold, usable, total, fraction, "exposure check");
    Ok(ExposureReport {
        threshold,
        max,
        usable,
        total,
        fraction,
        within_band,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_floor() {
        let samples = DPix::from_data(2, 1, vec![0.0, 65535.0]).unwrap();
        // 2^-0.3 * 65535 = 53230.96...
        assert_eq!(clipping_threshold(&samples, &CropConfig::default()), 53230.0);
    }

    #[test]
    fn test_mostly_clipped_is_within_band() {
        let mut data = vec![1000.0; 1000];
        data[0] = 10.0;
        let samples = DPix::from_data(100, 10, data).unwrap();
        let report = check_exposure(&samples, &CropConfig::default()).unwrap();
        assert_eq!(report.usable, 999);
        assert_eq!(report.total, 1000);
        assert!(report.within_band);
    }

    #[test]
    fn test_fully_clipped_is_outside_band() {
        let samples = DPix::from_data(4, 2, vec![7.0; 8]).unwrap();
        let report = check_exposure(&samples, &CropConfig::default()).unwrap();
        assert_eq!(report.fraction, 1.0);
        assert!(!report.within_band);
    }

    #[test]
    fn test_all_zero() {
        let samples = DPix::new(4, 2).unwrap();
        let report = check_exposure(&samples, &CropConfig::default()).unwrap();
        assert_eq!(report.threshold, 0.0);
        assert_eq!(report.usable, 8);
    }
}
