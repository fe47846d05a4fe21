//! Diagnostic dumps of the per-axis waveforms
//!
//! [`DumpObserver`] collects a text section per axis for stdout.
//! [`CsvDump`] writes `<axis>_waveform.csv` files with one row per
//! waveform index, for plotting elsewhere.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use rawcrop_analysis::{Axis, Selection, WaveformObserver};
use rawcrop_core::Numa;

fn slot(axis: Axis) -> usize {
    match axis {
        Axis::Width => 0,
        Axis::Height => 1,
    }
}

/// Values per line in the array dumps
const VALUES_PER_LINE: usize = 8;

/// Append `values` as indented rows, each prefixed with its first index.
fn write_values(out: &mut String, values: &Numa) {
    for (row, chunk) in values.as_slice().chunks(VALUES_PER_LINE).enumerate() {
        let _ = write!(out, "    {:>6}:", row * VALUES_PER_LINE);
        for v in chunk {
            let _ = write!(out, " {v:+.6}");
        }
        out.push('\n');
    }
}

/// Text dump of each axis
///
/// Holds the full waveform and first difference, the locations of the
/// largest and smallest difference, the extrema and the selection.
#[derive(Debug, Default)]
pub struct DumpObserver {
    sections: [String; 2],
    waveforms: [Numa; 2],
    differences: [Numa; 2],
}

impl DumpObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines collected for `axis`, each ending in a newline
    pub fn section(&self, axis: Axis) -> &str {
        &self.sections[slot(axis)]
    }

    fn write_location(&mut self, axis: Axis, label: &str, found: Option<(f64, usize)>) {
        let waveform = &self.waveforms[slot(axis)];
        let out = &mut self.sections[slot(axis)];
        if let Some((value, at)) = found {
            let w = waveform.get(at).unwrap_or(0.0);
            let _ = writeln!(out, "  {label} first difference {value:+.6} at {at} (W {w:.6})");
        }
    }
}

impl WaveformObserver for DumpObserver {
    fn on_waveform(&mut self, axis: Axis, waveform: &Numa) {
        let out = &mut self.sections[slot(axis)];
        out.clear();
        let _ = writeln!(out, "  W ({}):", waveform.len());
        write_values(out, waveform);
        self.waveforms[slot(axis)] = waveform.clone();
    }

    fn on_difference(&mut self, axis: Axis, difference: &Numa) {
        let out = &mut self.sections[slot(axis)];
        let _ = writeln!(out, "  dW ({}):", difference.len());
        write_values(out, difference);
        self.write_location(axis, "max", difference.max());
        self.write_location(axis, "min", difference.min());
        self.differences[slot(axis)] = difference.clone();
    }

    fn on_extrema(&mut self, axis: Axis, extrema: &[usize]) {
        let difference = &self.differences[slot(axis)];
        let out = &mut self.sections[slot(axis)];
        let _ = writeln!(out, "  extrema ({}):", extrema.len());
        for &i in extrema {
            let _ = writeln!(out, "    {i:>6}  {:+.6}", difference.get(i).unwrap_or(0.0));
        }
    }

    fn on_selection(&mut self, axis: Axis, selection: &Selection) {
        let out = &mut self.sections[slot(axis)];
        let _ = writeln!(
            out,
            "  selection: peak {}, next extremum {}, {} = {}",
            selection.peak,
            selection.candidate,
            axis.coordinate(),
            selection.crop
        );
    }
}

/// Writes `<axis>_waveform.csv` into a directory
///
/// Columns are `index,waveform,difference,extremum`, where `extremum` is
/// 1 for indices in the extremum set. Write failures are kept and
/// returned by [`CsvDump::finish`].
#[derive(Debug)]
pub struct CsvDump {
    dir: PathBuf,
    waveform: Numa,
    difference: Numa,
    written: Vec<PathBuf>,
    error: Option<std::io::Error>,
}

impl CsvDump {
    /// Create the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            waveform: Numa::new(),
            difference: Numa::new(),
            written: Vec::new(),
            error: None,
        })
    }

    /// Path of the CSV file for `axis`
    pub fn path_for(&self, axis: Axis) -> PathBuf {
        self.dir.join(format!("{}_waveform.csv", axis.name()))
    }

    /// Files written so far, or the first write error.
    pub fn finish(self) -> std::io::Result<Vec<PathBuf>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.written),
        }
    }
}

/// Render the CSV text for one axis.
pub fn waveform_csv(waveform: &Numa, difference: &Numa, extrema: &[usize]) -> String {
    let mut out = String::from("index,waveform,difference,extremum\n");
    for (i, (w, d)) in waveform.iter().zip(difference.iter()).enumerate() {
        let flag = u8::from(extrema.binary_search(&i).is_ok());
        let _ = writeln!(out, "{i},{w},{d},{flag}");
    }
    out
}

impl WaveformObserver for CsvDump {
    fn on_waveform(&mut self, _axis: Axis, waveform: &Numa) {
        self.waveform = waveform.clone();
    }

    fn on_difference(&mut self, _axis: Axis, difference: &Numa) {
        self.difference = difference.clone();
    }

    fn on_extrema(&mut self, axis: Axis, extrema: &[usize]) {
        if self.error.is_some() {
            return;
        }
        let path = self.path_for(axis);
        let csv = waveform_csv(&self.waveform, &self.difference, extrema);
        match fs::write(&path, csv) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "wrote waveform dump");
                self.written.push(path);
            }
            Err(e) => self.error = Some(e),
        }
    }
}
