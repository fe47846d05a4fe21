//! Numa operations: normalization, differences, and local extrema.
//!
//! These are the signal primitives the axis crop estimator is built from:
//!
//!   - [`Numa::normalized_by_max`] - divide by the array's own maximum
//!   - [`Numa::normalized_by_max_abs`] - divide by the largest magnitude
//!   - [`Numa::forward_difference`] - `x[i+1] - x[i]`, zero padded
//!   - [`Numa::local_extrema`] - plateau-aware local minima, maxima and knees

use super::Numa;

/// Kind of point reported by [`Numa::local_extrema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Minimum,
    Maximum,
    /// Start of a flat run between a higher and a lower neighbour, where
    /// a monotone slope levels off
    Knee,
}

impl Numa {
    /// Divide every value by the array maximum.
    ///
    /// The maximum of the result is exactly `1.0`. An array whose maximum is
    /// zero is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawcrop_core::Numa;
    ///
    /// let na = Numa::from_vec(vec![1.0, 4.0, 2.0]).normalized_by_max();
    /// assert_eq!(na.as_slice(), &[0.25, 1.0, 0.5]);
    /// ```
    pub fn normalized_by_max(&self) -> Numa {
        match self.max_value() {
            Some(max) if max != 0.0 => self.iter().map(|v| v / max).collect(),
            _ => self.clone(),
        }
    }

    /// Divide every value by the largest absolute value.
    ///
    /// The result lies in `[-1, 1]`. An all-zero array is returned unchanged.
    pub fn normalized_by_max_abs(&self) -> Numa {
        let max_abs = self.iter().map(f64::abs).fold(0.0, f64::max);
        if max_abs == 0.0 {
            return self.clone();
        }
        self.iter().map(|v| v / max_abs).collect()
    }

    /// Forward difference `d[i] = x[i+1] - x[i]`, with a trailing `0.0`
    /// appended so the result has the same length as `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawcrop_core::Numa;
    ///
    /// let d = Numa::from_vec(vec![0.0, 0.5, 1.0, 1.0]).forward_difference();
    /// assert_eq!(d.as_slice(), &[0.5, 0.5, 0.0, 0.0]);
    /// ```
    pub fn forward_difference(&self) -> Numa {
        let mut out: Numa = self
            .as_slice()
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect();
        if !self.is_empty() {
            out.push(0.0);
        }
        out
    }

    /// Find local minima, maxima and knees.
    ///
    /// A run of equal consecutive values is treated as one point, reported
    /// at the run's first index. The run is a maximum when every existing
    /// neighbour (the values just before and just after the run) is strictly
    /// smaller, and a minimum when every existing neighbour is strictly
    /// larger. A run of two or more values with one neighbour above and the
    /// other below is a knee. A run spanning the whole array has no
    /// neighbours and is never reported.
    ///
    /// Without ties this is the plain strict comparison with both
    /// neighbours; the two ends of the array are compared with their single
    /// neighbour. The global maximum of any non-constant array is always
    /// reported.
    ///
    /// Indices are returned in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawcrop_core::{ExtremumKind, Numa};
    ///
    /// let na = Numa::from_vec(vec![0.0, 0.0, 0.25, 0.25, 0.0, 0.0]);
    /// let ext = na.local_extrema();
    /// assert_eq!(
    ///     ext,
    ///     vec![
    ///         (0, ExtremumKind::Minimum),
    ///         (2, ExtremumKind::Maximum),
    ///         (4, ExtremumKind::Minimum),
    ///     ]
    /// );
    /// ```
    pub fn local_extrema(&self) -> Vec<(usize, ExtremumKind)> {
        let data = self.as_slice();
        let n = data.len();
        let mut extrema = Vec::new();

        let mut start = 0;
        while start < n {
            let value = data[start];
            let mut end = start;
            while end + 1 < n && data[end + 1] == value {
                end += 1;
            }

            let left = start.checked_sub(1).map(|i| data[i]);
            let right = data.get(end + 1).copied();

            if left.is_some() || right.is_some() {
                let below = |nb: Option<f64>| nb.is_none_or(|v| v < value);
                let above = |nb: Option<f64>| nb.is_none_or(|v| v > value);
                if below(left) && below(right) {
                    extrema.push((start, ExtremumKind::Maximum));
                } else if above(left) && above(right) {
                    extrema.push((start, ExtremumKind::Minimum));
                } else if end > start && left.is_some() && right.is_some() {
                    extrema.push((start, ExtremumKind::Knee));
                }
            }

            start = end + 1;
        }

        extrema
    }

    /// Indices of [`Numa::local_extrema`], ascending.
    pub fn local_extrema_indices(&self) -> Vec<usize> {
        self.local_extrema().into_iter().map(|(i, _)| i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_by_max_degenerate() {
        let zeros = Numa::from_vec(vec![0.0; 4]);
        assert_eq!(zeros.normalized_by_max(), zeros);
        assert_eq!(zeros.normalized_by_max_abs(), zeros);
    }

    #[test]
    fn test_normalized_by_max_abs() {
        let na = Numa::from_vec(vec![-4.0, 2.0, 1.0]).normalized_by_max_abs();
        assert_eq!(na.as_slice(), &[-1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_forward_difference_lengths() {
        assert!(Numa::new().forward_difference().is_empty());
        assert_eq!(
            Numa::from_vec(vec![5.0]).forward_difference().as_slice(),
            &[0.0]
        );
    }

    #[test]
    fn test_local_extrema_strict() {
        let na = Numa::from_vec(vec![1.0, 3.0, 2.0, 5.0, 4.0]);
        assert_eq!(
            na.local_extrema(),
            vec![
                (0, ExtremumKind::Minimum),
                (1, ExtremumKind::Maximum),
                (2, ExtremumKind::Minimum),
                (3, ExtremumKind::Maximum),
                (4, ExtremumKind::Minimum),
            ]
        );
    }

    #[test]
    fn test_local_extrema_plateau_shoulder_is_knee() {
        let na = Numa::from_vec(vec![1.0, 2.0, 2.0, 3.0]);
        assert_eq!(
            na.local_extrema(),
            vec![
                (0, ExtremumKind::Minimum),
                (1, ExtremumKind::Knee),
                (3, ExtremumKind::Maximum),
            ]
        );

        // a single point on a monotone slope is not a knee
        let na = Numa::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(na.local_extrema_indices(), vec![0, 2]);
    }

    #[test]
    fn test_local_extrema_flat_top_between_edges() {
        // rising edge, flat interior, falling edge, padded tail
        let na = Numa::from_vec(vec![0.0, 1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0]);
        assert_eq!(
            na.local_extrema(),
            vec![
                (0, ExtremumKind::Minimum),
                (1, ExtremumKind::Maximum),
                (2, ExtremumKind::Knee),
                (5, ExtremumKind::Minimum),
                (6, ExtremumKind::Maximum),
            ]
        );
    }

    #[test]
    fn test_local_extrema_constant() {
        assert!(Numa::from_vec(vec![0.0; 10]).local_extrema().is_empty());
        assert!(Numa::from_vec(vec![1.0]).local_extrema().is_empty());
        assert!(Numa::new().local_extrema().is_empty());
    }

    #[test]
    fn test_local_extrema_contains_global_max() {
        let na = Numa::from_vec(vec![0.0, 0.1, 0.7, 0.7, 0.7, 0.2, 0.7, 0.0]);
        let idx = na.local_extrema_indices();
        let (_, argmax) = na.max().unwrap();
        assert_eq!(argmax, 2);
        assert!(idx.contains(&argmax));
        assert_eq!(na.max_value_at(&idx), na.max_value());
    }
}
