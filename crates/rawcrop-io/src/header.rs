//! PFM header reading
//!
//! A PFM header is three text lines followed directly by binary samples:
//!
//! ```text
//! PF | Pf          color (3 channels) | grayscale (1 channel)
//! <w> <h>         digits, one whitespace, digits, one whitespace
//! <scale>         negative: little-endian samples, otherwise big-endian
//! ```
//!
//! The header is read line by line so a bad magic or dimension line is
//! reported before any sample byte is consumed.

use crate::{IoError, IoResult};
use std::io::{BufRead, Read, Write};

/// Longest header line we are willing to read.
const MAX_HEADER_LINE: u64 = 256;

/// Byte order of the binary samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Parsed PFM header
#[derive(Debug, Clone, PartialEq)]
pub struct PfmHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel: 3 for `PF`, 1 for `Pf`
    pub channels: u32,
    /// Absolute value of the scale line
    pub scale: f32,
    /// Byte order encoded in the sign of the scale line
    pub byte_order: ByteOrder,
}

impl PfmHeader {
    /// Number of `f32` samples that follow the header
    pub fn sample_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * u64::from(self.channels)
    }
}

/// Read one header line, including its terminating newline if present.
fn read_line<R: BufRead>(reader: &mut R, what: &str) -> IoResult<Vec<u8>> {
    let mut line = Vec::new();
    reader
        .by_ref()
        .take(MAX_HEADER_LINE)
        .read_until(b'\n', &mut line)?;
    if line.is_empty() {
        return Err(IoError::Format(format!("missing {what} line")));
    }
    if line.len() as u64 == MAX_HEADER_LINE && line.last() != Some(&b'\n') {
        return Err(IoError::Format(format!("{what} line too long")));
    }
    Ok(line)
}

fn parse_magic(line: &[u8]) -> IoResult<u32> {
    match line.trim_ascii_end() {
        b"PF" => Ok(3),
        b"Pf" => Ok(1),
        _ => Err(IoError::Format("not a PFM file".to_string())),
    }
}

/// Whitespace as matched by `\s` in a byte pattern: space, `\t`, `\n`,
/// `\r`, form feed and vertical tab.
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Split a leading run of ASCII digits off `bytes`.
fn take_digits(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let n = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    (n > 0).then(|| bytes.split_at(n))
}

/// Match the dimension line against `^(\d+)\s(\d+)\s$`.
///
/// `$` may sit just before a final newline, and the newline itself may
/// serve as the second whitespace, so both `"640 480 \n"` and
/// `"640 480\n"` are accepted while `"640  480 \n"` is not.
pub(crate) fn parse_dimension_line(line: &[u8]) -> IoResult<(u32, u32)> {
    let malformed = || IoError::Format("malformed PFM header".to_string());

    let matches = |body: &[u8]| -> Option<(u32, u32)> {
        let (w, rest) = take_digits(body)?;
        let (&sep, rest) = rest.split_first()?;
        if !is_separator(sep) {
            return None;
        }
        let (h, rest) = take_digits(rest)?;
        match rest {
            [ws] if is_separator(*ws) => {}
            _ => return None,
        }
        let w = std::str::from_utf8(w).ok()?.parse().ok()?;
        let h = std::str::from_utf8(h).ok()?.parse().ok()?;
        Some((w, h))
    };

    let dims = matches(line).or_else(|| {
        let body = line.strip_suffix(b"\n")?;
        matches(body)
    });

    let (width, height) = dims.ok_or_else(malformed)?;
    if width == 0 || height == 0 {
        return Err(IoError::Format(format!(
            "invalid PFM dimensions: {width}x{height}"
        )));
    }
    Ok((width, height))
}

fn parse_scale(line: &[u8]) -> IoResult<(f32, ByteOrder)> {
    let text = std::str::from_utf8(line)
        .map_err(|_| IoError::Format("scale line is not text".to_string()))?
        .trim();
    let scale: f32 = text
        .parse()
        .map_err(|_| IoError::Format(format!("invalid PFM scale: {text:?}")))?;
    if !scale.is_finite() {
        return Err(IoError::Format(format!("invalid PFM scale: {text:?}")));
    }
    let order = if scale < 0.0 {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    };
    Ok((scale.abs(), order))
}

/// Read a PFM header, leaving `reader` positioned at the first sample byte.
pub fn read_pfm_header<R: BufRead>(reader: &mut R) -> IoResult<PfmHeader> {
    let channels = parse_magic(&read_line(reader, "magic")?)?;
    let (width, height) = parse_dimension_line(&read_line(reader, "dimension")?)?;
    let (scale, byte_order) = parse_scale(&read_line(reader, "scale")?)?;

    tracing::debug!(width, height, channels, scale, ?byte_order, "read PFM header");

    Ok(PfmHeader {
        width,
        height,
        channels,
        scale,
        byte_order,
    })
}

/// Write a PFM header in the canonical `"<w> <h> \n"` form.
pub fn write_pfm_header<W: Write>(header: &PfmHeader, writer: &mut W) -> IoResult<()> {
    let magic = if header.channels == 3 { "PF" } else { "Pf" };
    let signed_scale = match header.byte_order {
        ByteOrder::LittleEndian => -header.scale.abs(),
        ByteOrder::BigEndian => header.scale.abs(),
    };
    writeln!(writer, "{magic}")?;
    writeln!(writer, "{} {} ", header.width, header.height)?;
    writeln!(writer, "{signed_scale:?}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_line_variants() {
        assert_eq!(parse_dimension_line(b"640 480 \n").unwrap(), (640, 480));
        assert_eq!(parse_dimension_line(b"640 480\n").unwrap(), (640, 480));
        assert_eq!(parse_dimension_line(b"640\t480 ").unwrap(), (640, 480));
        assert_eq!(parse_dimension_line(b"640 480\r\n").unwrap(), (640, 480));
        assert_eq!(parse_dimension_line(b"640\x0b480 \n").unwrap(), (640, 480));
        assert_eq!(parse_dimension_line(b"640 480\x0c\n").unwrap(), (640, 480));
        assert_eq!(parse_dimension_line(b"640 480\x0b").unwrap(), (640, 480));
    }

    #[test]
    fn test_dimension_line_rejects() {
        for line in [
            &b"640  480 \n"[..],
            b"640 480  \n",
            b" 640 480 \n",
            b"640 480",
            b"-640 480 \n",
            b"640x480 \n",
            b"640\x0b\x0b480 \n",
            b"640\x00480 \n",
            b"640 480 \r\n",
            b"0 480 \n",
        ] {
            assert!(
                parse_dimension_line(line).is_err(),
                "accepted {:?}",
                String::from_utf8_lossy(line)
            );
        }
    }

    #[test]
    fn test_scale_sign_selects_byte_order() {
        assert_eq!(
            parse_scale(b"-1.0\n").unwrap(),
            (1.0, ByteOrder::LittleEndian)
        );
        assert_eq!(parse_scale(b"2.5\n").unwrap(), (2.5, ByteOrder::BigEndian));
        assert!(parse_scale(b"abc\n").is_err());
        assert!(parse_scale(b"nan\n").is_err());
    }

    #[test]
    fn test_header_roundtrip() {
        let header = PfmHeader {
            width: 7,
            height: 3,
            channels: 1,
            scale: 1.0,
            byte_order: ByteOrder::LittleEndian,
        };
        let mut buf = Vec::new();
        write_pfm_header(&header, &mut buf).unwrap();
        assert_eq!(buf, b"Pf\n7 3 \n-1.0\n");
        let parsed = read_pfm_header(&mut &buf[..]).unwrap();
        assert_eq!(parsed, header);
    }
}
