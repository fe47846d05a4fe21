//! Axis crop estimation
//!
//! The active area boundary along one axis is found from the brightness
//! profile of that axis:
//!
//! 1. Project the samples onto the axis (column sums for [`Axis::Width`],
//!    row sums for [`Axis::Height`]) and divide by the maximum. This is
//!    the waveform.
//! 2. Take the forward difference of the waveform, pad it with a trailing
//!    zero and divide by its largest magnitude.
//! 3. Find the local extrema of that difference, including the knee where
//!    a flat run begins after an edge.
//! 4. The steepest rise of the waveform is the global maximum of the
//!    difference. The first extremum after it is where the rise has
//!    flattened out, and is taken as the boundary.
//! 5. Round the boundary up to the configured alignment.

use std::fmt;

use rawcrop_core::{CropConfig, DPix, Numa};

use crate::error::ExtremaError;
use crate::observer::WaveformObserver;
use crate::{AnalysisError, AnalysisResult, validate_config};

/// Image axis along which a boundary is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left edge; the estimate is the crop `x`
    Width,
    /// Top edge; the estimate is the crop `y`
    Height,
}

impl Axis {
    /// Both axes in report order
    pub const ALL: [Axis; 2] = [Axis::Width, Axis::Height];

    /// Lowercase axis name
    pub fn name(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }

    /// Crop coordinate this axis determines
    pub fn coordinate(self) -> &'static str {
        match self {
            Axis::Width => "x",
            Axis::Height => "y",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The chosen boundary along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// First index of the global maximum of the first difference
    pub peak: usize,
    /// First extremum after `peak`
    pub candidate: usize,
    /// `candidate` rounded up to the alignment
    pub crop: u32,
}

/// Everything computed for one axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisEstimate {
    pub axis: Axis,
    pub waveform: Numa,
    pub difference: Numa,
    pub extrema: Vec<usize>,
    pub selection: Selection,
}

impl AxisEstimate {
    /// The aligned crop coordinate
    pub fn crop(&self) -> u32 {
        self.selection.crop
    }
}

/// Normalized projection of `samples` onto `axis`.
///
/// The result has one entry per column (width) or row (height) and a
/// maximum of exactly `1.0`, unless every sum is zero.
pub fn waveform(samples: &DPix, axis: Axis) -> Numa {
    let projection = match axis {
        Axis::Width => samples.column_sums(),
        Axis::Height => samples.row_sums(),
    };
    projection.normalized_by_max()
}

/// Zero padded forward difference of a waveform, scaled into `[-1, 1]`.
pub fn first_difference(waveform: &Numa) -> Numa {
    waveform.forward_difference().normalized_by_max_abs()
}

/// Smallest multiple of `alignment` that is `>= value`.
///
/// ```
/// use rawcrop_analysis::round_up_to_multiple;
///
/// assert_eq!(round_up_to_multiple(13, 2), 14);
/// assert_eq!(round_up_to_multiple(14, 2), 14);
/// assert_eq!(round_up_to_multiple(0, 4), 0);
/// ```
pub fn round_up_to_multiple(value: u32, alignment: u32) -> u32 {
    let alignment = alignment.max(1);
    value.div_ceil(alignment) * alignment
}

/// Pick the boundary from a first difference and its extrema.
///
/// # Errors
///
/// - [`ExtremaError::TooFew`] if `extrema` has fewer than two entries
/// - [`AnalysisError::Consistency`] if the global maximum of
///   `difference` is not among the extrema
/// - [`ExtremaError::NoNextExtremum`] if no extremum follows the peak
pub fn select_boundary(
    difference: &Numa,
    extrema: &[usize],
    alignment: u32,
) -> AnalysisResult<Selection> {
    if extrema.len() < 2 {
        return Err(ExtremaError::TooFew {
            found: extrema.len(),
        }
        .into());
    }

    let (max, peak) = difference
        .max()
        .ok_or(rawcrop_core::Error::NullInput("first difference"))?;
    if difference.max_value_at(extrema) != Some(max) {
        return Err(AnalysisError::Consistency(format!(
            "global maximum {max} at index {peak} is not a detected extremum"
        )));
    }

    let candidate = extrema
        .iter()
        .copied()
        .find(|&i| i > peak)
        .ok_or(ExtremaError::NoNextExtremum { peak })?;

    let index = u32::try_from(candidate).map_err(|_| {
        AnalysisError::Consistency(format!("extremum index {candidate} exceeds u32"))
    })?;

    Ok(Selection {
        peak,
        candidate,
        crop: round_up_to_multiple(index, alignment),
    })
}

/// Estimate the active area boundary along `axis`.
///
/// The observer sees the waveform, the difference and the extrema even
/// when selection then fails.
pub fn estimate_axis(
    samples: &DPix,
    axis: Axis,
    config: &CropConfig,
    observer: &mut dyn WaveformObserver,
) -> AnalysisResult<AxisEstimate> {
    validate_config(config)?;

    let waveform = waveform(samples, axis);
    observer.on_waveform(axis, &waveform);

    let difference = first_difference(&waveform);
    observer.on_difference(axis, &difference);

    let extrema = difference.local_extrema_indices();
    tracing::debug!(%axis, count = extrema.len(), "local extrema of first difference");
    observer.on_extrema(axis, &extrema);

    let selection = select_boundary(&difference, &extrema, config.alignment)?;
    tracing::info!(
        %axis,
        peak = selection.peak,
        candidate = selection.candidate,
        crop = selection.crop,
        "selected boundary"
    );
    observer.on_selection(axis, &selection);

    Ok(AxisEstimate {
        axis,
        waveform,
        difference,
        extrema,
        selection,
    })
}
