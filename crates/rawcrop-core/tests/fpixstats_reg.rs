//! Sample array regression test
//!
//! Projections, statistics and transposition of `DPix`, checked against
//! straightforward per-pixel loops on seeded random data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rawcrop_core::{DPix, FPix};
use rawcrop_test::RegParams;

#[test]
fn fpixstats_reg() {
    let mut rp = RegParams::new("fpixstats");
    let mut rng = StdRng::seed_from_u64(7);

    let (w, h) = (23u32, 11u32);
    let data: Vec<f64> = (0..w * h).map(|_| rng.random_range(0.0..100.0)).collect();
    let dpix = DPix::from_data(w, h, data).unwrap();

    // ========================================================================
    // Projections
    // ========================================================================
    eprintln!("\n=== Projections ===");

    let cols = dpix.column_sums();
    let rows = dpix.row_sums();
    rp.compare_values(w as f64, cols.len() as f64, 0.0);
    rp.compare_values(h as f64, rows.len() as f64, 0.0);
    for x in [0, 7, w - 1] {
        let expected: f64 = (0..h).map(|y| dpix.get_pixel(x, y).unwrap()).sum();
        rp.compare_values(expected, cols[x as usize], 1e-9);
    }
    for y in [0, 5, h - 1] {
        let expected: f64 = (0..w).map(|x| dpix.get_pixel(x, y).unwrap()).sum();
        rp.compare_values(expected, rows[y as usize], 1e-9);
    }
    rp.compare_values(dpix.sum(), cols.sum().unwrap(), 1e-6);
    rp.compare_values(dpix.sum(), rows.sum().unwrap(), 1e-6);

    // ========================================================================
    // Transpose swaps the projections
    // ========================================================================
    eprintln!("\n=== Transpose ===");

    let t = dpix.transpose();
    rp.compare_values(h as f64, t.width() as f64, 0.0);
    rp.compare_values(w as f64, t.height() as f64, 0.0);
    rp.compare_numa(rows.as_slice(), &t.column_sums(), 1e-9);
    rp.compare_values(
        dpix.get_pixel(3, 9).unwrap(),
        t.get_pixel(9, 3).unwrap(),
        0.0,
    );

    // ========================================================================
    // Statistics
    // ========================================================================
    eprintln!("\n=== Statistics ===");

    let stats = dpix.stats();
    let n = dpix.size() as f64;
    rp.compare_values(dpix.sum() / n, stats.mean, 1e-12);
    rp.compare_values(stats.variance.sqrt(), stats.std_dev, 1e-12);
    rp.compare_values(1.0, if stats.min <= stats.median { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if stats.median <= stats.max { 1.0 } else { 0.0 }, 0.0);
    let below = dpix.data().iter().filter(|&&v| v < stats.median).count();
    // odd sample count: exactly half of the others lie below the median
    rp.compare_values(((w * h - 1) / 2) as f64, below as f64, 0.0);

    // ========================================================================
    // FPix to DPix promotion
    // ========================================================================
    eprintln!("\n=== Promotion ===");

    let fpix = FPix::from_data(3, 1, vec![0.5, 0.25, 1.0]).unwrap();
    let promoted = DPix::from(&fpix);
    rp.compare_values(1.75, promoted.sum(), 0.0);
    rp.compare_values(1.0, fpix.flip_tb().data()[2] as f64, 0.0);

    assert!(rp.cleanup(), "fpixstats regression test failed");
}
