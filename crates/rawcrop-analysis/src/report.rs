//! Final crop line

use std::fmt;

/// Crop origin, one coordinate per axis
///
/// An axis whose estimate failed is `None` and prints as `absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropReport {
    pub x: Option<u32>,
    pub y: Option<u32>,
}

impl CropReport {
    pub fn new(x: Option<u32>, y: Option<u32>) -> Self {
        Self { x, y }
    }

    /// Both coordinates were estimated
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

struct Coordinate(Option<u32>);

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("absent"),
        }
    }
}

impl fmt::Display for CropReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Crop x=\"{}\" y=\"{}\" width=\"???\" height=\"???\"/>",
            Coordinate(self.x),
            Coordinate(self.y)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = CropReport::new(Some(14), Some(8));
        assert_eq!(
            report.to_string(),
            r#"<Crop x="14" y="8" width="???" height="???"/>"#
        );
        assert!(report.is_complete());
    }

    #[test]
    fn test_absent_axis() {
        let report = CropReport::new(Some(14), None);
        assert_eq!(
            report.to_string(),
            r#"<Crop x="14" y="absent" width="???" height="???"/>"#
        );
        assert!(!report.is_complete());
    }
}
