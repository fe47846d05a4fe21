use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use rawcrop::analysis::{Axis, CropAnalysis, Tee};
use rawcrop::dump::{CsvDump, DumpObserver};
use rawcrop::io::{ByteOrder, RawImage, read_pfm_file};
use rawcrop::{CropConfig, analyze, init_logging};

#[derive(Parser)]
#[command(name = "rawcrop")]
#[command(
    version,
    about = "Estimate the active sensor area of a PFM calibration capture",
    long_about = None
)]
struct Cli {
    /// PFM capture of a saturated exposure
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// White level exponent (samples are scaled by 2^N - 1)
    #[arg(long, value_name = "N")]
    bit_depth: Option<u32>,

    /// Clipping tolerance in stops below the brightest pixel
    #[arg(long, value_name = "F")]
    max_delta_stops: Option<f64>,

    /// Lowest acceptable fraction of clipped pixels
    #[arg(long, value_name = "F")]
    threshold_low: Option<f64>,

    /// Highest acceptable fraction of clipped pixels
    #[arg(long, value_name = "F")]
    threshold_high: Option<f64>,

    /// Round crop coordinates up to a multiple of N
    #[arg(long, value_name = "N")]
    alignment: Option<u32>,

    /// Write per-axis waveform CSV files into DIR
    #[arg(long, value_name = "DIR")]
    dump_dir: Option<PathBuf>,

    /// Print only the final crop line
    #[arg(short, long)]
    quiet: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.image.is_file() {
        eprintln!("Error: {} - file not found", cli.image.display());
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::from(2);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<CropConfig> {
    let mut config = match &cli.config {
        Some(path) => CropConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CropConfig::default(),
    };

    if let Some(v) = cli.bit_depth {
        config.bit_depth = v;
    }
    if let Some(v) = cli.max_delta_stops {
        config.max_delta_stops = v;
    }
    if let Some(v) = cli.threshold_low {
        config.threshold_low = v;
    }
    if let Some(v) = cli.threshold_high {
        config.threshold_high = v;
    }
    if let Some(v) = cli.alignment {
        config.alignment = v;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli)?;
    tracing::debug!(?config, "configuration");

    let raw = read_pfm_file(&cli.image)
        .with_context(|| format!("failed to read {}", cli.image.display()))?;

    let csv = cli
        .dump_dir
        .as_deref()
        .map(CsvDump::new)
        .transpose()
        .context("failed to create dump directory")?;
    let mut observer = Tee(DumpObserver::new(), csv);

    let analysis = analyze(&raw, &config, &mut observer)?;

    let Tee(dump, csv) = observer;
    if let Some(csv) = csv {
        for path in csv.finish().context("failed to write waveform dump")? {
            tracing::info!(path = %path.display(), "waveform dump written");
        }
    }

    if !cli.quiet {
        print_diagnostics(&cli.image, &raw, &config, &analysis, &dump);
    }
    println!("{}", analysis.report());
    Ok(())
}

fn print_diagnostics(
    path: &Path,
    raw: &RawImage,
    config: &CropConfig,
    analysis: &CropAnalysis,
    dump: &DumpObserver,
) {
    let order = match raw.byte_order {
        ByteOrder::LittleEndian => "little-endian",
        ByteOrder::BigEndian => "big-endian",
    };
    println!("{}", path.display());
    println!(
        "Dimensions: {} x {} ({} channel{}, {order}, scale {})",
        analysis.width,
        analysis.height,
        raw.channels,
        if raw.channels == 1 { "" } else { "s" },
        raw.scale
    );
    println!("Total pixels: {}", analysis.pixel_count());

    let s = &analysis.stats;
    println!("Array statistics:");
    println!("  median   {:.3}", s.median);
    println!("  mean     {:.3}", s.mean);
    println!("  std dev  {:.3}", s.std_dev);
    println!("  variance {:.3}", s.variance);
    println!("  min      {:.3}", s.min);
    println!("  max      {:.3}", s.max);
    println!("  sum      {:.3}", s.sum);

    let e = &analysis.exposure;
    println!(
        "Usable pixels: {} of {} ({:.3}%) at or above {} ({} stops below max {})",
        e.usable,
        e.total,
        e.fraction * 100.0,
        e.threshold,
        config.max_delta_stops,
        e.max
    );
    if !e.within_band {
        println!(
            "  outside the expected {:.1}%..{:.1}% band; check the exposure",
            config.threshold_low * 100.0,
            config.threshold_high * 100.0
        );
    }

    for axis in Axis::ALL {
        println!();
        println!("{} axis (crop {}):", axis, axis.coordinate());
        print!("{}", dump.section(axis));
        if let Err(err) = analysis.axis(axis) {
            println!("  no boundary: {err}");
        }
    }
    println!();
}
