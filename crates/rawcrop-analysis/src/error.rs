//! Error types for rawcrop-analysis
//!
//! [`ExtremaError`] is the only recoverable failure: it is reported for a
//! single axis and the other axis is still estimated. Every other
//! [`AnalysisError`] aborts the run.

use thiserror::Error;

/// Boundary selection failed along one axis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtremaError {
    /// The first difference has fewer than two local extrema
    #[error("found {found} local extrema in the first difference, need at least 2")]
    TooFew { found: usize },

    /// No extremum lies after the steepest rise of the waveform
    #[error("no local extremum after the peak at index {peak}")]
    NoNextExtremum { peak: usize },
}

/// Errors that can occur during active area analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rawcrop_core::Error),

    /// PFM I/O error
    #[error("I/O error: {0}")]
    Io(#[from] rawcrop_io::IoError),

    /// The normalized sample array is taller than it is wide
    #[error("image is taller than wide after normalization: {width}x{height}")]
    Orientation { width: u32, height: u32 },

    /// Two computations that must agree did not
    #[error("consistency check failed: {0}")]
    Consistency(String),

    /// Boundary selection failed
    #[error("extrema error: {0}")]
    Extrema(#[from] ExtremaError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
