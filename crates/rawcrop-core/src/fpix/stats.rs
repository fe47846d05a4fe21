//! Whole-array statistics for DPix
//!
//! Summary values printed before the exposure check. Variance and
//! standard deviation are population statistics.

use super::DPix;

/// Summary statistics of a sample array
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleStats {
    pub median: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl DPix {
    /// Median sample value.
    ///
    /// For an even number of samples this is the mean of the two middle
    /// values.
    pub fn median(&self) -> f64 {
        let mut sorted = self.data().to_vec();
        let n = sorted.len();
        let mid = n / 2;
        let (lower, &mut upper_mid, _) = sorted.select_nth_unstable_by(mid, f64::total_cmp);
        if n % 2 == 1 {
            upper_mid
        } else {
            let lower_mid = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (lower_mid + upper_mid) / 2.0
        }
    }

    /// Compute all summary statistics in one pass plus a median selection.
    pub fn stats(&self) -> SampleStats {
        let n = self.size() as f64;
        let sum = self.sum();
        let mean = sum / n;
        let variance = self
            .data()
            .iter()
            .map(|&v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        SampleStats {
            median: self.median(),
            mean,
            std_dev: variance.sqrt(),
            variance,
            min: self.min_value().unwrap_or(0.0),
            max: self.max_value().unwrap_or(0.0),
            sum,
        }
    }
}
