use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Series – one measurement file
// ---------------------------------------------------------------------------

/// One plotted curve: aligned x / y values read from a single measurement file.
///
/// `x` and `y` are private so that the only way to grow a series is
/// [`Series::push`], which keeps both sequences the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend name (file stem of `source` by default).
    pub name: String,
    /// File the values were read from.
    pub source: PathBuf,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    /// Empty series named after the file stem of `source`.
    pub fn new(source: &Path) -> Self {
        let name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| source.display().to_string());
        Self {
            name,
            source: source.to_path_buf(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of (x, y) pairs.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over the (x, y) pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Summary statistics, `None` when the series has no finite values.
    pub fn stats(&self) -> Option<SeriesStats> {
        if self.is_empty() {
            return None;
        }
        let x_range = min_max(self.x())?;
        let y_range = min_max(self.y())?;
        let finite_y: Vec<f64> = self.y().iter().copied().filter(|v| v.is_finite()).collect();
        let y_mean = finite_y.iter().sum::<f64>() / finite_y.len() as f64;
        Some(SeriesStats {
            count: self.len(),
            x_min: x_range.0,
            x_max: x_range.1,
            y_min: y_range.0,
            y_max: y_range.1,
            y_mean,
        })
    }
}

/// Smallest and largest finite value.
fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// ---------------------------------------------------------------------------
// SeriesStats – per-series summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub y_mean: f64,
}

impl fmt::Display for SeriesStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points, x {:.3}..{:.3}, y {:.3}..{:.3} (mean {:.3})",
            self.count, self.x_min, self.x_max, self.y_min, self.y_max, self.y_mean
        )
    }
}

// ---------------------------------------------------------------------------
// Bounds – axis ranges over several series
// ---------------------------------------------------------------------------

/// Inclusive data ranges for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Bounds {
    /// Widen degenerate ranges and clamp ranges whose span overflows, so a
    /// chart can still be drawn.
    pub fn padded(self) -> Self {
        fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
            // span of the clamped range is f64::MAX / 2
            const LIMIT: f64 = f64::MAX / 4.0;
            if !(hi - lo).is_finite() {
                (lo.max(-LIMIT), hi.min(LIMIT))
            } else if (hi - lo).abs() < f64::EPSILON {
                (lo - 1.0, hi + 1.0)
            } else {
                (lo, hi)
            }
        }
        Bounds {
            x: pad(self.x),
            y: pad(self.y),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            x: (0.0, 1.0),
            y: (0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// SeriesSet – everything drawn on one chart
// ---------------------------------------------------------------------------

/// The series for one chart, in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Series>,
}

impl SeriesSet {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points across all series.
    pub fn total_points(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// Combined ranges over every series; `None` if there are no points at all.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for stats in self.series.iter().filter_map(Series::stats) {
            bounds = Some(match bounds {
                None => Bounds {
                    x: (stats.x_min, stats.x_max),
                    y: (stats.y_min, stats.y_max),
                },
                Some(b) => Bounds {
                    x: (b.x.0.min(stats.x_min), b.x.1.max(stats.x_max)),
                    y: (b.y.0.min(stats.y_min), b.y.1.max(stats.y_max)),
                },
            });
        }
        bounds
    }
}
