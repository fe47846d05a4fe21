//! Hooks for inspecting intermediate waveforms
//!
//! The estimator reports every intermediate array to a
//! [`WaveformObserver`]. All methods default to doing nothing, so an
//! implementation only overrides what it wants to see.

use rawcrop_core::Numa;

use crate::axis::{Axis, Selection};

/// Receives the intermediate results of each axis estimate, in order.
pub trait WaveformObserver {
    /// The normalized projection
    fn on_waveform(&mut self, _axis: Axis, _waveform: &Numa) {}

    /// The normalized, zero padded first difference
    fn on_difference(&mut self, _axis: Axis, _difference: &Numa) {}

    /// Indices of the local extrema of the first difference
    fn on_extrema(&mut self, _axis: Axis, _extrema: &[usize]) {}

    /// The chosen boundary; not called when selection fails
    fn on_selection(&mut self, _axis: Axis, _selection: &Selection) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl WaveformObserver for NullObserver {}

/// Forwards every call to two observers, first `.0` then `.1`
#[derive(Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: WaveformObserver, B: WaveformObserver> WaveformObserver for Tee<A, B> {
    fn on_waveform(&mut self, axis: Axis, waveform: &Numa) {
        self.0.on_waveform(axis, waveform);
        self.1.on_waveform(axis, waveform);
    }

    fn on_difference(&mut self, axis: Axis, difference: &Numa) {
        self.0.on_difference(axis, difference);
        self.1.on_difference(axis, difference);
    }

    fn on_extrema(&mut self, axis: Axis, extrema: &[usize]) {
        self.0.on_extrema(axis, extrema);
        self.1.on_extrema(axis, extrema);
    }

    fn on_selection(&mut self, axis: Axis, selection: &Selection) {
        self.0.on_selection(axis, selection);
        self.1.on_selection(axis, selection);
    }
}

impl<O: WaveformObserver> WaveformObserver for Option<O> {
    fn on_waveform(&mut self, axis: Axis, waveform: &Numa) {
        if let Some(o) = self {
            o.on_waveform(axis, waveform);
        }
    }

    fn on_difference(&mut self, axis: Axis, difference: &Numa) {
        if let Some(o) = self {
            o.on_difference(axis, difference);
        }
    }

    fn on_extrema(&mut self, axis: Axis, extrema: &[usize]) {
        if let Some(o) = self {
            o.on_extrema(axis, extrema);
        }
    }

    fn on_selection(&mut self, axis: Axis, selection: &Selection) {
        if let Some(o) = self {
            o.on_selection(axis, selection);
        }
    }
}
