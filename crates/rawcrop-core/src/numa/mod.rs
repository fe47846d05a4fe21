//! Numa - Numeric arrays
//!
//! Arrays of `f64` values. Waveforms, their first differences and
//! histograms are all carried as `Numa`.

mod histogram;
mod operations;

pub use operations::ExtremumKind;

/// Array of floating-point numbers
///
/// `Numa` manages a dynamic array of `f64` values. Indices are positions
/// along the projected axis (column or row number) for waveforms, and bin
/// numbers for histograms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numa {
    data: Vec<f64>,
}

impl Numa {
    /// Create a new empty Numa
    pub fn new() -> Self {
        Numa { data: Vec::new() }
    }

    /// Create a Numa from a vector of values
    pub fn from_vec(data: Vec<f64>) -> Self {
        Numa { data }
    }

    /// Get the number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Add a value to the end
    pub fn push(&mut self, val: f64) {
        self.data.push(val);
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the minimum value and its index
    ///
    /// The index is that of the first occurrence.
    pub fn min(&self) -> Option<(f64, usize)> {
        let mut iter = self.data.iter().copied().enumerate();
        let (mut min_idx, mut min_val) = iter.next()?;
        for (i, v) in iter {
            if v < min_val {
                min_val = v;
                min_idx = i;
            }
        }
        Some((min_val, min_idx))
    }

    /// Get the minimum value only
    pub fn min_value(&self) -> Option<f64> {
        self.min().map(|(v, _)| v)
    }

    /// Get the maximum value and its index
    ///
    /// The index is that of the first occurrence.
    pub fn max(&self) -> Option<(f64, usize)> {
        let mut iter = self.data.iter().copied().enumerate();
        let (mut max_idx, mut max_val) = iter.next()?;
        for (i, v) in iter {
            if v > max_val {
                max_val = v;
                max_idx = i;
            }
        }
        Some((max_val, max_idx))
    }

    /// Get the maximum value only
    pub fn max_value(&self) -> Option<f64> {
        self.max().map(|(v, _)| v)
    }

    /// Maximum over a subset of indices. Out-of-range indices are skipped.
    pub fn max_value_at(&self, indices: &[usize]) -> Option<f64> {
        indices
            .iter()
            .filter_map(|&i| self.get(i))
            .reduce(f64::max)
    }

    /// Get the sum of all values
    pub fn sum(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().sum())
    }

    /// Create an iterator over values
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.data.iter().copied()
    }
}

impl<'a> IntoIterator for &'a Numa {
    type Item = f64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Numa {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl FromIterator<f64> for Numa {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Numa {
            data: iter.into_iter().collect(),
        }
    }
}

impl std::ops::Index<usize> for Numa {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_first_occurrence() {
        let na = Numa::from_vec(vec![3.0, 1.0, 5.0, 5.0, 1.0]);
        assert_eq!(na.max(), Some((5.0, 2)));
        assert_eq!(na.min(), Some((1.0, 1)));
        assert_eq!(Numa::new().max(), None);
    }

    #[test]
    fn test_max_value_at() {
        let na = Numa::from_vec(vec![0.0, 9.0, 2.0, 4.0]);
        assert_eq!(na.max_value_at(&[0, 2, 3]), Some(4.0));
        assert_eq!(na.max_value_at(&[10]), None);
    }

    #[test]
    fn test_collect_and_sum() {
        let na: Numa = (1..=4).map(f64::from).collect();
        assert_eq!(na.len(), 4);
        assert_eq!(na.sum(), Some(10.0));
        assert_eq!(na[3], 4.0);
    }
}
