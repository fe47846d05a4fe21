//! rawcrop - Active sensor area estimation for raw calibration captures
//!
//! Reads a PFM dump of a saturated (flat-field) capture and estimates
//! where the camera's active pixel area begins along each axis.
//!
//! # Example
//!
//! ```
//! use rawcrop::{CropConfig, FPix, NullObserver, analysis};
//!
//! // dark left border of 6 columns on a clipped field
//! let mut plane = FPix::new_with_value(64, 32, 1.0).unwrap();
//! for y in 0..32 {
//!     for x in 0..6 {
//!         plane.set_pixel(x, y, 0.01).unwrap();
//!     }
//! }
//! let config = CropConfig::default();
//! let samples = analysis::normalize_plane(&plane, &config).unwrap();
//! let result = analysis::analyze_samples(&samples, &config, &mut NullObserver).unwrap();
//! assert_eq!(result.report().x, Some(6));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rawcrop_core::*;

// Re-export the other crates as modules
pub use rawcrop_analysis as analysis;
pub use rawcrop_io as io;

pub use rawcrop_analysis::{CropReport, NullObserver, WaveformObserver, analyze};

pub mod dump;
mod logging;

pub use logging::init_logging;
