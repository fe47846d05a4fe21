//! PFM (Portable Float Map) sample data
//!
//! Reads the binary block that follows a [`PfmHeader`] into a
//! [`RawImage`]. Rows are kept exactly as stored, bottom row first;
//! reorienting them is left to the analysis stage.

use crate::header::{ByteOrder, PfmHeader, read_pfm_header, write_pfm_header};
use crate::{IoError, IoResult};
use rawcrop_core::FPix;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Maximum sample count accepted from a single file (2^29)
const MAX_PFM_SAMPLES: u64 = 1 << 29;

/// Samples exactly as stored in a PFM file
///
/// `samples` is row-major and channel-interleaved, with the **bottom**
/// image row first. Its length is `width * height * channels`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    /// 1 (grayscale) or 3 (color)
    pub channels: u32,
    pub samples: Vec<f32>,
    /// Absolute value of the header scale factor
    pub scale: f32,
    pub byte_order: ByteOrder,
}

impl RawImage {
    /// Build a raw image from stored-order samples.
    pub fn new(width: u32, height: u32, channels: u32, samples: Vec<f32>) -> IoResult<Self> {
        if channels != 1 && channels != 3 {
            return Err(IoError::InvalidData(format!(
                "PFM images have 1 or 3 channels, got {channels}"
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if width == 0 || height == 0 || samples.len() != expected {
            return Err(IoError::InvalidData(format!(
                "{} samples do not fill a {width}x{height}x{channels} image",
                samples.len()
            )));
        }
        Ok(RawImage {
            width,
            height,
            channels,
            samples,
            scale: 1.0,
            byte_order: ByteOrder::LittleEndian,
        })
    }

    /// Extract one channel as a plane, rows still in stored order.
    pub fn channel_plane(&self, channel: u32) -> IoResult<FPix> {
        if channel >= self.channels {
            return Err(IoError::InvalidData(format!(
                "channel {channel} requested from a {}-channel image",
                self.channels
            )));
        }
        let plane: Vec<f32> = self
            .samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect();
        Ok(FPix::from_data(self.width, self.height, plane)?)
    }
}

fn decode_sample(bytes: [u8; 4], order: ByteOrder) -> f32 {
    match order {
        ByteOrder::LittleEndian => f32::from_le_bytes(bytes),
        ByteOrder::BigEndian => f32::from_be_bytes(bytes),
    }
}

/// Read a PFM image from a buffered reader.
///
/// The header is parsed first; a bad header fails before any sample byte
/// is read.
pub fn read_pfm<R: BufRead>(mut reader: R) -> IoResult<RawImage> {
    let header = read_pfm_header(&mut reader)?;
    read_samples(&mut reader, header)
}

fn read_samples<R: BufRead>(reader: &mut R, header: PfmHeader) -> IoResult<RawImage> {
    let count = header.sample_count();
    if count > MAX_PFM_SAMPLES {
        return Err(IoError::Format(format!(
            "PFM too large: {count} samples exceeds maximum {MAX_PFM_SAMPLES}"
        )));
    }

    let nbytes = count as usize * 4;
    let mut binary = Vec::with_capacity(nbytes);
    reader.by_ref().take(nbytes as u64).read_to_end(&mut binary)?;
    if binary.len() < nbytes {
        return Err(IoError::Format(format!(
            "PFM data truncated: need {nbytes} bytes but only have {}",
            binary.len()
        )));
    }

    let mut trailing = [0u8; 1];
    if reader.read(&mut trailing)? > 0 {
        tracing::debug!("ignoring bytes after the PFM sample block");
    }

    let samples: Vec<f32> = binary
        .chunks_exact(4)
        .map(|c| decode_sample([c[0], c[1], c[2], c[3]], header.byte_order))
        .collect();

    if let Some((idx, bad)) = samples
        .iter()
        .enumerate()
        .find(|&(_, v)| !v.is_finite() || *v < 0.0)
    {
        return Err(IoError::InvalidData(format!(
            "sample {idx} is {bad}; sensor samples must be finite and non-negative"
        )));
    }

    Ok(RawImage {
        width: header.width,
        height: header.height,
        channels: header.channels,
        samples,
        scale: header.scale,
        byte_order: header.byte_order,
    })
}

/// Read a PFM image from memory.
pub fn read_pfm_mem(data: &[u8]) -> IoResult<RawImage> {
    read_pfm(data)
}

/// Read a PFM image from a file.
pub fn read_pfm_file(path: impl AsRef<Path>) -> IoResult<RawImage> {
    let file = File::open(path.as_ref())?;
    read_pfm(BufReader::new(file))
}

/// Write a raw image as PFM, samples in `order`.
pub fn write_pfm<W: Write>(image: &RawImage, mut writer: W, order: ByteOrder) -> IoResult<()> {
    let header = PfmHeader {
        width: image.width,
        height: image.height,
        channels: image.channels,
        scale: image.scale,
        byte_order: order,
    };
    write_pfm_header(&header, &mut writer)?;
    for &v in &image.samples {
        let bytes = match order {
            ByteOrder::LittleEndian => v.to_le_bytes(),
            ByteOrder::BigEndian => v.to_be_bytes(),
        };
        writer.write_all(&bytes)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a raw image as PFM to a file.
pub fn write_pfm_file(image: &RawImage, path: impl AsRef<Path>, order: ByteOrder) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_pfm(image, BufWriter::new(file), order)
}
