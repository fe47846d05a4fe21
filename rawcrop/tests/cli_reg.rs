//! Command line regression test
//!
//! Runs the `rawcrop` binary on synthetic captures written to a temporary
//! directory and checks its output and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use rawcrop::io::ByteOrder;
use rawcrop_test::{RegParams, synth};

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rawcrop_cli_reg_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn rawcrop(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawcrop"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn cli_reg() {
    let mut rp = RegParams::new("cli");
    let dir = scratch_dir();

    let ramp = dir.join("ramp.pfm");
    let plane = synth::ramp_plane(100, 60, 10, 14).unwrap();
    fs::write(&ramp, synth::gray_pfm(&plane, ByteOrder::LittleEndian)).unwrap();
    let ramp_arg = ramp.to_str().unwrap();

    // ========================================================================
    // Quiet run prints only the crop line
    // ========================================================================
    eprintln!("\n=== Quiet run ===");

    let out = rawcrop(&["-q", ramp_arg]);
    rp.compare_values(0.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);
    rp.compare_strings(
        b"<Crop x=\"14\" y=\"absent\" width=\"???\" height=\"???\"/>\n",
        &out.stdout,
    );

    // ========================================================================
    // Full diagnostics end with the crop line
    // ========================================================================
    eprintln!("\n=== Diagnostics ===");

    let out = rawcrop(&[ramp_arg]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    rp.compare_values(0.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);
    for needle in [
        "Dimensions: 100 x 60",
        "Total pixels: 6000",
        "Array statistics:",
        "Usable pixels: 5160 of 6000",
        "width axis (crop x):",
        "  W (100):\n",
        "         8: +0.000000 +0.000000 +0.000000 +0.250000 +0.500000 +0.750000 +1.000000 +1.000000\n",
        "  dW (100):\n",
        "max first difference +1.000000 at 10 (W 0.000000)",
        "min first difference +0.000000 at 0 (W 0.000000)",
        "selection: peak 10, next extremum 14, x = 14",
        "height axis (crop y):",
        "  W (60):\n",
        "min first difference +0.000000 at 0 (W 1.000000)",
        "no boundary:",
    ] {
        let found = stdout.contains(needle);
        if !found {
            eprintln!("missing {needle:?} in:\n{stdout}");
        }
        rp.compare_values(1.0, if found { 1.0 } else { 0.0 }, 0.0);
    }
    let last = stdout.lines().last().unwrap_or("");
    rp.compare_strings(
        b"<Crop x=\"14\" y=\"absent\" width=\"???\" height=\"???\"/>",
        last.as_bytes(),
    );

    // ========================================================================
    // Overrides and CSV dump
    // ========================================================================
    eprintln!("\n=== Overrides and dump ===");

    let dump = dir.join("dump");
    let out = rawcrop(&[
        "-q",
        "--alignment",
        "4",
        "--dump-dir",
        dump.to_str().unwrap(),
        ramp_arg,
    ]);
    rp.compare_values(0.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);
    rp.compare_strings(
        b"<Crop x=\"16\" y=\"absent\" width=\"???\" height=\"???\"/>\n",
        &out.stdout,
    );
    let csv = fs::read_to_string(dump.join("width_waveform.csv")).unwrap_or_default();
    rp.compare_values(101.0, csv.lines().count() as f64, 0.0);
    rp.compare_values(
        1.0,
        if csv.lines().any(|l| l.starts_with("14,") && l.ends_with(",1")) {
            1.0
        } else {
            0.0
        },
        0.0,
    );
    rp.compare_values(
        1.0,
        if dump.join("height_waveform.csv").is_file() {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    let config = dir.join("rawcrop.yaml");
    fs::write(&config, "alignment: 8\n").unwrap();
    let out = rawcrop(&["-q", "-c", config.to_str().unwrap(), ramp_arg]);
    rp.compare_strings(
        b"<Crop x=\"16\" y=\"absent\" width=\"???\" height=\"???\"/>\n",
        &out.stdout,
    );

    // ========================================================================
    // Exit codes
    // ========================================================================
    eprintln!("\n=== Exit codes ===");

    let missing = dir.join("missing.pfm");
    let out = rawcrop(&[missing.to_str().unwrap()]);
    rp.compare_values(2.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);
    let stderr = String::from_utf8_lossy(&out.stderr);
    rp.compare_values(
        1.0,
        if stderr.contains("file not found") {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    let out = rawcrop(&[]);
    rp.compare_values(2.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);

    let bad = dir.join("bad.pfm");
    fs::write(&bad, b"PG\n4 2 \n-1.0\n").unwrap();
    let out = rawcrop(&[bad.to_str().unwrap()]);
    rp.compare_values(1.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);

    let tall = dir.join("tall.pfm");
    fs::write(&tall, synth::gray_pfm(&plane.transpose(), ByteOrder::BigEndian)).unwrap();
    let out = rawcrop(&[tall.to_str().unwrap()]);
    rp.compare_values(1.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);

    let out = rawcrop(&["--alignment", "0", ramp_arg]);
    rp.compare_values(1.0, f64::from(out.status.code().unwrap_or(-1)), 0.0);

    let _ = fs::remove_dir_all(&dir);
    assert!(rp.cleanup(), "cli regression test failed");
}
