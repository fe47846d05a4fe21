//! FPix / DPix - Floating-point sample planes
//!
//! `FPix` is a 2D array of `f32` values, the precision PFM files are
//! stored in. `DPix` holds `f64` values and is the sample array every
//! analysis stage works on, so that sums over whole columns do not lose
//! precision.
//!
//! See [`stats`] for whole-array statistics.
//!
//! # Examples
//!
//! ```
//! use rawcrop_core::{DPix, FPix};
//!
//! let mut fpix = FPix::new(4, 2).unwrap();
//! fpix.set_pixel(3, 1, 0.5).unwrap();
//!
//! let dpix = DPix::from_fpix(&fpix);
//! assert_eq!(dpix.get_pixel(3, 1).unwrap(), 0.5);
//! assert_eq!(dpix.max_value(), Some(0.5));
//! ```

pub mod stats;

pub use stats::SampleStats;

use crate::error::{Error, Result};
use crate::numa::Numa;

/// Single-precision floating-point plane
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at
/// (x, y) is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all samples set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rawcrop_core::FPix;
    ///
    /// let fpix = FPix::new_with_value(100, 60, 1.0).unwrap();
    /// assert_eq!(fpix.get_pixel(50, 30).unwrap(), 1.0);
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FPix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FPix from raw data in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the sample value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the sample value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
        Ok(())
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Return a copy with the row order reversed (top-to-bottom flip)
    pub fn flip_tb(&self) -> FPix {
        let w = self.width as usize;
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(w).rev() {
            data.extend_from_slice(row);
        }
        FPix {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Return the transposed plane: sample (x, y) moves to (y, x)
    pub fn transpose(&self) -> FPix {
        FPix {
            width: self.height,
            height: self.width,
            data: transpose_data(&self.data, self.width as usize, self.height as usize),
        }
    }

    /// Find the maximum value and its location
    ///
    /// Returns `(max_value, x, y)` where (x, y) is the location of the first
    /// occurrence of the maximum value.
    pub fn max(&self) -> Option<(f32, u32, u32)> {
        let (idx, &val) = self
            .data
            .iter()
            .enumerate()
            .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })?;
        let w = self.width as usize;
        Some((val, (idx % w) as u32, (idx / w) as u32))
    }

    /// Find the maximum value only
    pub fn max_value(&self) -> Option<f32> {
        self.max().map(|(v, _, _)| v)
    }

    /// Find the minimum value only
    pub fn min_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::min)
    }
}

// ============================================================================
// DPix - Double-precision floating-point sample array
// ============================================================================

/// Double-precision floating-point sample array
///
/// Same layout as [`FPix`] (row-major, no padding), stored as `f64`.
/// After orientation normalization this is the canonical sample array:
/// `(x, y)` indexed, rows top-to-bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DPix {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f64>,
}

impl DPix {
    /// Create a new DPix with all samples set to zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(DPix {
            width,
            height,
            data: vec![0.0f64; size],
        })
    }

    /// Create a DPix from raw data in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(DPix {
            width,
            height,
            data,
        })
    }

    /// Promote an FPix to double precision.
    pub fn from_fpix(fpix: &FPix) -> Self {
        DPix {
            width: fpix.width,
            height: fpix.height,
            data: fpix.data.iter().map(|&v| f64::from(v)).collect(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of samples.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get sample value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set sample value at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
        Ok(())
    }

    /// Raw read-only data access.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Multiply every sample by a constant.
    pub fn mul_constant(&mut self, value: f64) {
        for v in &mut self.data {
            *v *= value;
        }
    }

    /// Return the transposed array: sample (x, y) moves to (y, x).
    pub fn transpose(&self) -> DPix {
        DPix {
            width: self.height,
            height: self.width,
            data: transpose_data(&self.data, self.width as usize, self.height as usize),
        }
    }

    /// Maximum sample value, `None` only for an empty array.
    pub fn max_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Minimum sample value, `None` only for an empty array.
    pub fn min_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    /// Sum of all samples, accumulated in storage order.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Number of samples with value `>= threshold`.
    pub fn count_at_or_above(&self, threshold: f64) -> u64 {
        self.data.iter().filter(|&&v| v >= threshold).count() as u64
    }

    /// Sum of every column, one value per x.
    ///
    /// Each column is accumulated top to bottom.
    pub fn column_sums(&self) -> Numa {
        let mut sums = vec![0.0f64; self.width as usize];
        for row in self.data.chunks_exact(self.width as usize) {
            for (acc, &v) in sums.iter_mut().zip(row) {
                *acc += v;
            }
        }
        Numa::from_vec(sums)
    }

    /// Sum of every row, one value per y.
    pub fn row_sums(&self) -> Numa {
        self.data
            .chunks_exact(self.width as usize)
            .map(|row| row.iter().sum::<f64>())
            .collect()
    }
}

impl From<&FPix> for DPix {
    fn from(fpix: &FPix) -> Self {
        DPix::from_fpix(fpix)
    }
}

fn transpose_data<T: Copy>(data: &[T], width: usize, height: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());
    for x in 0..width {
        for y in 0..height {
            out.push(data[y * width + x]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpix_invalid_dimensions() {
        assert!(FPix::new(0, 10).is_err());
        assert!(DPix::new(10, 0).is_err());
        assert!(FPix::from_data(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_fpix_flip_tb() {
        let fpix = FPix::from_data(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let flipped = fpix.flip_tb();
        assert_eq!(flipped.data(), &[5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        assert_eq!(flipped.flip_tb(), fpix);
    }

    #[test]
    fn test_transpose() {
        let fpix = FPix::from_data(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = fpix.transpose();
        assert_eq!(t.dimensions(), (2, 3));
        assert_eq!(t.get_pixel(1, 2).unwrap(), fpix.get_pixel(2, 1).unwrap());
        assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        let dpix = DPix::from_fpix(&fpix).transpose();
        assert_eq!(dpix.dimensions(), (2, 3));
        assert_eq!(dpix.get_pixel(0, 2).unwrap(), 3.0);
    }

    #[test]
    fn test_fpix_max_first_occurrence() {
        let fpix = FPix::from_data(3, 2, vec![0.0, 7.0, 1.0, 7.0, 2.0, 3.0]).unwrap();
        assert_eq!(fpix.max(), Some((7.0, 1, 0)));
        assert_eq!(fpix.min_value(), Some(0.0));
    }

    #[test]
    fn test_dpix_projections() {
        let dpix = DPix::from_data(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(dpix.column_sums().as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!(dpix.row_sums().as_slice(), &[6.0, 15.0]);
        assert_eq!(dpix.sum(), 21.0);
    }

    #[test]
    fn test_dpix_count_at_or_above() {
        let dpix = DPix::from_data(2, 2, vec![0.0, 10.0, 9.99, 10.0]).unwrap();
        assert_eq!(dpix.count_at_or_above(10.0), 2);
        assert_eq!(dpix.count_at_or_above(0.0), 4);
        assert_eq!(dpix.count_at_or_above(10.5), 0);
    }

    #[test]
    fn test_dpix_mul_constant() {
        let mut dpix = DPix::from_data(2, 1, vec![0.5, 1.0]).unwrap();
        dpix.mul_constant(65535.0);
        assert_eq!(dpix.data(), &[32767.5, 65535.0]);
    }
}
