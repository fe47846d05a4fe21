//! rawcrop-analysis - Active sensor area estimation
//!
//! Locates where the active pixel area of a saturated calibration capture
//! begins, from the brightness falloff along each image axis.
//!
//! # Quick Start
//!
//! ```no_run
//! use rawcrop_analysis::{NullObserver, analyze};
//! use rawcrop_core::CropConfig;
//!
//! let raw = rawcrop_io::read_pfm_file("flat.pfm").unwrap();
//! let analysis = analyze(&raw, &CropConfig::default(), &mut NullObserver).unwrap();
//! println!("{}", analysis.report());
//! ```
//!
//! # Modules
//!
//! - [`orient`]: PFM to top-first, white-level scaled sample array
//! - [`exposure`]: usable pixel fraction check
//! - [`axis`]: waveform, first difference and boundary selection
//! - [`observer`]: hooks for intermediate waveforms
//! - [`report`]: the final `<Crop .../>` line
//! - [`pipeline`]: all of the above for one capture

pub mod axis;
mod error;
pub mod exposure;
pub mod observer;
pub mod orient;
pub mod pipeline;
pub mod report;

pub use error::{AnalysisError, AnalysisResult, ExtremaError};

pub use axis::{
    Axis, AxisEstimate, Selection, estimate_axis, first_difference, round_up_to_multiple,
    select_boundary, waveform,
};
pub use exposure::{ExposureReport, check_exposure, clipping_threshold};
pub use observer::{NullObserver, Tee, WaveformObserver};
pub use orient::{normalize, normalize_plane};
pub use pipeline::{AxisOutcome, CropAnalysis, analyze, analyze_samples};
pub use report::CropReport;

// Re-export core for convenience
pub use rawcrop_core;

/// Reject a configuration before any work is done with it.
pub(crate) fn validate_config(config: &rawcrop_core::CropConfig) -> AnalysisResult<()> {
    config
        .validate()
        .map_err(|e| AnalysisError::Config(e.to_string()))
}
