//! I/O error types
//!
//! Every failure to turn a byte stream into a [`RawImage`](crate::RawImage)
//! is an `IoError`. All of them are fatal for a run: a file whose header
//! or sample data cannot be trusted is not analyzed at all.

use thiserror::Error;

/// Error type for PFM I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container header is not a PFM header, or the sample block does
    /// not match what the header promises
    #[error("format error: {0}")]
    Format(String),

    /// The samples were read but are not a usable sensor capture
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. invalid dimensions)
    #[error("core error: {0}")]
    Core(#[from] rawcrop_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
