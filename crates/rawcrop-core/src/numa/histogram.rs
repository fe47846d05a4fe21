//! Histograms with explicit bin edges
//!
//! Bins are half-open `[edges[i], edges[i+1])` except the last one, which
//! is closed `[edges[n-1], edges[n]]` so the top edge value is counted.
//! Values outside `[edges[0], edges[n]]` are not counted.

use super::Numa;
use crate::error::{Error, Result};
use crate::fpix::DPix;

/// Count `values` into the bins described by `edges`.
fn bin_by_edges(values: impl IntoIterator<Item = f64>, edges: &[f64]) -> Result<Numa> {
    if edges.len() < 2 {
        return Err(Error::InvalidParameter(format!(
            "histogram needs at least 2 bin edges, got {}",
            edges.len()
        )));
    }
    if edges.windows(2).any(|w| !(w[0] <= w[1])) {
        return Err(Error::InvalidParameter(format!(
            "histogram bin edges must be non-decreasing: {edges:?}"
        )));
    }

    let nbins = edges.len() - 1;
    let first = edges[0];
    let last = edges[nbins];
    let mut counts = vec![0.0f64; nbins];

    for v in values {
        if v < first || v > last {
            continue;
        }
        let bin = if v == last {
            nbins - 1
        } else {
            // number of edges <= v, minus one
            edges.partition_point(|&e| e <= v) - 1
        };
        counts[bin] += 1.0;
    }

    Ok(Numa::from_vec(counts))
}

impl Numa {
    /// Histogram of the values in this array over explicit bin edges.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if fewer than two edges are given
    /// or the edges decrease.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawcrop_core::Numa;
    ///
    /// let na = Numa::from_vec(vec![0.0, 1.0, 2.0, 3.0, 3.0]);
    /// let histo = na.histogram_with_edges(&[0.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(histo.as_slice(), &[2.0, 3.0]);
    /// ```
    pub fn histogram_with_edges(&self, edges: &[f64]) -> Result<Numa> {
        bin_by_edges(self.iter(), edges)
    }
}

impl DPix {
    /// Histogram of all samples over explicit bin edges.
    ///
    /// See [`Numa::histogram_with_edges`] for the binning rule.
    pub fn histogram_with_edges(&self, edges: &[f64]) -> Result<Numa> {
        bin_by_edges(self.data().iter().copied(), edges)
    }
}
