//! rawcrop-test - Regression test framework for rawcrop
//!
//! Regression tests live in `crates/*/tests/*_reg.rs`. Each one creates a
//! [`RegParams`], runs any number of comparisons and asserts on
//! [`RegParams::cleanup`]:
//!
//! ```ignore
//! use rawcrop_test::RegParams;
//!
//! let mut rp = RegParams::new("axis");
//! rp.compare_values(14.0, crop as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Fixtures are synthesized in memory by [`synth`].
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"
//! - `RUST_LOG`: filter for [`init_tracing`]

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Install a test-writer tracing subscriber.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // rawcrop-test is at crates/rawcrop-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
