//! Error types for rawcrop-core
//!
//! Provides a unified error type for the data structures in the core
//! crate. Each variant captures enough context for diagnostics without
//! exposing internal implementation details.

use thiserror::Error;

/// rawcrop-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Null pointer or empty input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),

    /// Configuration could not be loaded or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for rawcrop-core operations
pub type Result<T> = std::result::Result<T, Error>;
