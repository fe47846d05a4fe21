//! End-to-end analysis of one capture
//!
//! normalize, summarize, check exposure, then estimate each axis.
//! Orientation, consistency and configuration errors abort the run;
//! an [`ExtremaError`] only marks its own axis as failed.

use rawcrop_core::{CropConfig, DPix, SampleStats};
use rawcrop_io::RawImage;

use crate::axis::{Axis, AxisEstimate, estimate_axis};
use crate::error::ExtremaError;
use crate::exposure::{ExposureReport, check_exposure};
use crate::observer::WaveformObserver;
use crate::orient::normalize;
use crate::report::CropReport;
use crate::{AnalysisError, AnalysisResult};

/// Outcome of one axis
pub type AxisOutcome = Result<AxisEstimate, ExtremaError>;

/// Everything computed for one capture
#[derive(Debug, Clone)]
pub struct CropAnalysis {
    /// Width of the normalized sample array
    pub width: u32,
    /// Height of the normalized sample array
    pub height: u32,
    pub stats: SampleStats,
    pub exposure: ExposureReport,
    /// Width axis, giving the crop `x`
    pub x: AxisOutcome,
    /// Height axis, giving the crop `y`
    pub y: AxisOutcome,
}

impl CropAnalysis {
    /// Outcome for `axis`
    pub fn axis(&self, axis: Axis) -> &AxisOutcome {
        match axis {
            Axis::Width => &self.x,
            Axis::Height => &self.y,
        }
    }

    /// Total number of samples
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Axes whose boundary could not be selected
    pub fn failures(&self) -> impl Iterator<Item = (Axis, &ExtremaError)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(move |axis| self.axis(axis).as_ref().err().map(|e| (axis, e)))
    }

    /// Final crop line
    pub fn report(&self) -> CropReport {
        let crop = |outcome: &AxisOutcome| outcome.as_ref().ok().map(AxisEstimate::crop);
        CropReport::new(crop(&self.x), crop(&self.y))
    }
}

/// Analyze a loaded capture.
pub fn analyze(
    raw: &RawImage,
    config: &CropConfig,
    observer: &mut dyn WaveformObserver,
) -> AnalysisResult<CropAnalysis> {
    let samples = normalize(raw, config)?;
    analyze_samples(&samples, config, observer)
}

/// Analyze an already normalized sample array.
pub fn analyze_samples(
    samples: &DPix,
    config: &CropConfig,
    observer: &mut dyn WaveformObserver,
) -> AnalysisResult<CropAnalysis> {
    let (width, height) = samples.dimensions();
    if width < height {
        return Err(AnalysisError::Orientation { width, height });
    }

    let stats = samples.stats();
    let exposure = check_exposure(samples, config)?;

    let x = axis_outcome(samples, Axis::Width, config, observer)?;
    let y = axis_outcome(samples, Axis::Height, config, observer)?;

    Ok(CropAnalysis {
        width,
        height,
        stats,
        exposure,
        x,
        y,
    })
}

/// Run one axis, keeping an extrema failure as its outcome.
fn axis_outcome(
    samples: &DPix,
    axis: Axis,
    config: &CropConfig,
    observer: &mut dyn WaveformObserver,
) -> AnalysisResult<AxisOutcome> {
    match estimate_axis(samples, axis, config, observer) {
        Ok(est) => Ok(Ok(est)),
        Err(AnalysisError::Extrema(e)) => {
            tracing::warn!(%axis, error = %e, "no boundary along axis");
            Ok(Err(e))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    #[test]
    fn test_bordered_capture() {
        // 3 dark columns on the left, 1 dark row on top
        let (w, h) = (12u32, 6u32);
        let mut data = Vec::new();
        for y in 0..h {
            for x in 0..w {
                data.push(if x < 3 || y < 1 { 5.0 } else { 60000.0 });
            }
        }
        let samples = DPix::from_data(w, h, data).unwrap();
        let analysis = analyze_samples(&samples, &CropConfig::default(), &mut NullObserver).unwrap();

        assert_eq!(analysis.pixel_count(), 72);
        assert_eq!(analysis.report(), CropReport::new(Some(4), Some(2)));
        assert_eq!(analysis.failures().count(), 0);
    }

    #[test]
    fn test_framed_capture() {
        // dark columns 0..3 and 10..12, dark rows 0 and 5
        let (w, h) = (12u32, 6u32);
        let mut data = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let active = (3..10).contains(&x) && (1..5).contains(&y);
                data.push(if active { 60000.0 } else { 5.0 });
            }
        }
        let samples = DPix::from_data(w, h, data).unwrap();
        let analysis = analyze_samples(&samples, &CropConfig::default(), &mut NullObserver).unwrap();

        assert_eq!(analysis.report(), CropReport::new(Some(4), Some(2)));
        let x = analysis.x.as_ref().unwrap();
        assert_eq!(x.extrema, vec![0, 2, 3, 9, 10]);
        assert_eq!(x.selection.candidate, 3);
    }

    #[test]
    fn test_uniform_capture_fails_both_axes() {
        let samples = DPix::from_data(5, 3, vec![9.0; 15]).unwrap();
        let analysis = analyze_samples(&samples, &CropConfig::default(), &mut NullObserver).unwrap();
        assert_eq!(analysis.report(), CropReport::new(None, None));
        let failed: Vec<Axis> = analysis.failures().map(|(axis, _)| axis).collect();
        assert_eq!(failed, vec![Axis::Width, Axis::Height]);
    }
}
