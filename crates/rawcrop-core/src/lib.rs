//! rawcrop Core - Basic data structures for active-area estimation
//!
//! This crate provides the fundamental data structures used throughout
//! the rawcrop workspace:
//!
//! - [`FPix`] - Single-precision sample plane, as stored in a PFM file
//! - [`DPix`] - Double-precision sample array used for analysis
//! - [`Numa`] - Numeric arrays (waveforms, differences, histograms)
//! - [`CropConfig`] - Tuning constants threaded through every stage

pub mod config;
pub mod error;
pub mod fpix;
pub mod numa;

pub use config::CropConfig;
pub use error::{Error, Result};
pub use fpix::{DPix, FPix, SampleStats};
pub use numa::{ExtremumKind, Numa};
