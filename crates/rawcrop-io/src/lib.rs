//! rawcrop I/O - PFM reading and writing
//!
//! Raw sensor dumps reach the estimator as Portable Float Map files:
//! a three line text header followed by `f32` samples, bottom row first.
//!
//! # Examples
//!
//! ```no_run
//! use rawcrop_io::read_pfm_file;
//!
//! let image = read_pfm_file("capture.pfm").unwrap();
//! println!("{}x{} ({} channels)", image.width, image.height, image.channels);
//! ```

mod error;
pub mod header;
pub mod pfm;

pub use error::{IoError, IoResult};
pub use header::{ByteOrder, PfmHeader, read_pfm_header, write_pfm_header};
pub use pfm::{RawImage, read_pfm, read_pfm_file, read_pfm_mem, write_pfm, write_pfm_file};
