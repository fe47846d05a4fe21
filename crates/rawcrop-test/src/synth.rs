//! Synthetic fixtures
//!
//! Planes here are built top row first, the way they are analyzed.
//! The PFM encoders flip them to bottom-row-first storage order, so a
//! fixture that goes through [`rawcrop_io::read_pfm_mem`] and the
//! normalizer comes back exactly as it was built.

use crate::error::{TestError, TestResult};
use rawcrop_core::FPix;
use rawcrop_io::ByteOrder;

fn fixture_err(name: &str, e: impl std::fmt::Display) -> TestError {
    TestError::Fixture {
        name: name.to_string(),
        message: e.to_string(),
    }
}

/// Encode stored-order samples as a PFM byte stream.
///
/// The header is written by hand rather than through `rawcrop_io`, so
/// reader tests do not depend on the writer.
pub fn pfm_bytes(
    width: u32,
    height: u32,
    channels: u32,
    samples: &[f32],
    order: ByteOrder,
) -> Vec<u8> {
    let magic = if channels == 3 { "PF" } else { "Pf" };
    let scale = match order {
        ByteOrder::LittleEndian => "-1.0",
        ByteOrder::BigEndian => "1.0",
    };
    let mut out = format!("{magic}\n{width} {height} \n{scale}\n").into_bytes();
    out.reserve(samples.len() * 4);
    for &v in samples {
        match order {
            ByteOrder::LittleEndian => out.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::BigEndian => out.extend_from_slice(&v.to_be_bytes()),
        }
    }
    out
}

/// Encode a top-first grayscale plane as a `Pf` stream.
pub fn gray_pfm(plane: &FPix, order: ByteOrder) -> Vec<u8> {
    let stored = plane.flip_tb();
    pfm_bytes(plane.width(), plane.height(), 1, stored.data(), order)
}

/// Encode three top-first planes of equal size as a `PF` stream.
pub fn color_pfm(planes: [&FPix; 3], order: ByteOrder) -> TestResult<Vec<u8>> {
    let (w, h) = planes[0].dimensions();
    if planes.iter().any(|p| p.dimensions() != (w, h)) {
        return Err(fixture_err("color_pfm", "planes differ in size"));
    }
    let stored: Vec<FPix> = planes.iter().map(|p| p.flip_tb()).collect();
    let mut samples = Vec::with_capacity(w as usize * h as usize * 3);
    for i in 0..(w as usize * h as usize) {
        for p in &stored {
            samples.push(p.data()[i]);
        }
    }
    Ok(pfm_bytes(w, h, 3, &samples, order))
}

/// A plane with every sample set to `value`.
pub fn flat_plane(width: u32, height: u32, value: f32) -> TestResult<FPix> {
    FPix::new_with_value(width, height, value).map_err(|e| fixture_err("flat_plane", e))
}

/// A horizontal ramp.
///
/// Columns before `start` are 0, columns after `end` are 1 and the
/// columns `start..=end` rise linearly from 0 to 1.
pub fn ramp_plane(width: u32, height: u32, start: u32, end: u32) -> TestResult<FPix> {
    if start >= end || end >= width {
        return Err(fixture_err(
            "ramp_plane",
            format!("ramp {start}..={end} does not fit width {width}"),
        ));
    }
    let span = (end - start) as f32;
    let row: Vec<f32> = (0..width)
        .map(|x| {
            if x < start {
                0.0
            } else if x > end {
                1.0
            } else {
                (x - start) as f32 / span
            }
        })
        .collect();
    let data = row
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize)
        .collect();
    FPix::from_data(width, height, data).map_err(|e| fixture_err("ramp_plane", e))
}

/// Widths of the dark bands around a synthetic active area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Margins {
    /// Bands on the left and top only
    pub fn leading(left: u32, top: u32) -> Self {
        Self {
            left,
            top,
            ..Self::default()
        }
    }

    /// The same `horizontal` band left and right, `vertical` top and bottom
    pub fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

/// A flat field of `inner` framed by dark bands of `border`.
pub fn bordered_plane(
    width: u32,
    height: u32,
    margins: Margins,
    border: f32,
    inner: f32,
) -> TestResult<FPix> {
    let Margins {
        left,
        top,
        right,
        bottom,
    } = margins;
    if left.saturating_add(right) >= width || top.saturating_add(bottom) >= height {
        return Err(fixture_err(
            "bordered_plane",
            format!("{margins:?} leaves no active area in {width}x{height}"),
        ));
    }
    let (x_end, y_end) = (width - right, height - bottom);
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let active = (left..x_end).contains(&x) && (top..y_end).contains(&y);
            data.push(if active { inner } else { border });
        }
    }
    FPix::from_data(width, height, data).map_err(|e| fixture_err("bordered_plane", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_values() {
        let plane = ramp_plane(20, 2, 10, 14).unwrap();
        assert_eq!(plane.get_pixel(9, 0).unwrap(), 0.0);
        assert_eq!(plane.get_pixel(10, 1).unwrap(), 0.0);
        assert_eq!(plane.get_pixel(12, 0).unwrap(), 0.5);
        assert_eq!(plane.get_pixel(14, 1).unwrap(), 1.0);
        assert_eq!(plane.get_pixel(19, 0).unwrap(), 1.0);
        assert!(ramp_plane(20, 2, 14, 10).is_err());
    }

    #[test]
    fn test_gray_pfm_is_bottom_first() {
        let plane = FPix::from_data(1, 2, vec![1.0, 2.0]).unwrap();
        let bytes = gray_pfm(&plane, ByteOrder::BigEndian);
        let header_len = b"Pf\n1 2 \n1.0\n".len();
        assert_eq!(&bytes[..header_len], b"Pf\n1 2 \n1.0\n");
        assert_eq!(&bytes[header_len..header_len + 4], &2.0f32.to_be_bytes());
    }

    #[test]
    fn test_bordered_plane() {
        let plane = bordered_plane(6, 4, Margins::leading(2, 1), 0.1, 1.0).unwrap();
        assert_eq!(plane.get_pixel(1, 3).unwrap(), 0.1);
        assert_eq!(plane.get_pixel(4, 0).unwrap(), 0.1);
        assert_eq!(plane.get_pixel(2, 1).unwrap(), 1.0);
        assert_eq!(plane.get_pixel(5, 3).unwrap(), 1.0);

        let plane = bordered_plane(6, 4, Margins::symmetric(1, 1), 0.1, 1.0).unwrap();
        assert_eq!(plane.get_pixel(5, 2).unwrap(), 0.1);
        assert_eq!(plane.get_pixel(2, 3).unwrap(), 0.1);
        assert_eq!(plane.get_pixel(4, 2).unwrap(), 1.0);

        assert!(bordered_plane(6, 4, Margins::symmetric(3, 1), 0.1, 1.0).is_err());
    }
}
