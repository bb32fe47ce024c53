use std::borrow::Cow;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Series, SeriesSet};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A numeric segment of a `<x>=<y>` line that is not a float.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("line {line}: '{segment}' is not a number")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// The trimmed segment that failed to parse.
    pub segment: String,
    #[source]
    pub source: ParseFloatError,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read measurement file {}", path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed measurement file {}", path.display())]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one measurement file into a [`Series`].
///
/// File format, one record per line:
/// * `# ...`        – comment, ignored
/// * `<x> = <y>`    – data line, both sides parsed as `f64` after trimming
/// * anything else  – ignored (blank lines, no `=`, more than one `=`)
///
/// A data line whose segments are not numbers fails the whole load.
pub fn load_series(path: &Path) -> Result<Series, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let (x, y) = parse_series(&text).map_err(|source| LoadError::ParseFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let mut series = Series::new(path);
    for (xi, yi) in x.into_iter().zip(y) {
        series.push(xi, yi);
    }
    log::info!("Loaded {} points from {}", series.len(), path.display());
    Ok(series)
}

/// Load every path in order, stopping at the first failure.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<SeriesSet, LoadError> {
    let series = paths
        .iter()
        .map(|p| load_series(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SeriesSet::new(series))
}

/// Parse the text of a measurement file into aligned x / y columns.
pub fn parse_series(text: &str) -> Result<(Vec<f64>, Vec<f64>), ParseError> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut skipped = 0usize;

    // `\r\n` and a bare `\r` both end a line.
    let text = if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    };

    for (idx, line) in text.lines().enumerate() {
        if line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split('=').collect();
        let [key, value] = parts.as_slice() else {
            skipped += 1;
            continue;
        };
        x.push(parse_segment(key, idx + 1)?);
        y.push(parse_segment(value, idx + 1)?);
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} lines without exactly one '='");
    }
    Ok((x, y))
}

fn parse_segment(segment: &str, line: usize) -> Result<f64, ParseError> {
    let segment = segment.trim();
    segment.parse::<f64>().map_err(|source| ParseError {
        line,
        segment: segment.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("series-plot-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn comments_only_gives_empty_series() {
        let (x, y) = parse_series("# one\n# two\n#\n").unwrap();
        assert!(x.is_empty());
        assert!(y.is_empty());
    }

    #[test]
    fn header_blank_line_and_data() {
        let path = temp_file(
            "scenario.out",
            "# header comment\n0.0=1.0\n1.0=2.5\n\n2.0=3.0\n",
        );
        let series = load_series(&path).unwrap();
        assert_eq!(series.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(series.y(), &[1.0, 2.5, 3.0]);
        assert_eq!(series.name, "scenario");
    }

    #[test]
    fn whitespace_around_separator_is_ignored() {
        assert_eq!(parse_series("1.0 = 2.0\n").unwrap(), parse_series("1.0=2.0\n").unwrap());
        assert_eq!(parse_series("\t1.0 =2.0  \r\n").unwrap(), (vec![1.0], vec![2.0]));
    }

    #[test]
    fn lines_without_exactly_one_separator_are_skipped() {
        let (x, y) = parse_series("a=b=c\nnoequalsign\n3=4\n\n   \n==\n").unwrap();
        assert_eq!(x, vec![3.0]);
        assert_eq!(y, vec![4.0]);
    }

    #[test]
    fn order_is_preserved_across_skipped_lines() {
        let text = "5=50\n# c\n1=10\nbad\n3=30\nx=y=z\n2=20";
        let (x, y) = parse_series(text).unwrap();
        assert_eq!(x, vec![5.0, 1.0, 3.0, 2.0]);
        assert_eq!(y, vec![50.0, 10.0, 30.0, 20.0]);
        assert_eq!(x.len(), y.len());
    }

    #[test]
    fn indented_comment_is_not_a_comment() {
        // Only a leading '#' marks a comment; this line has two parts and
        // the key segment is not a number.
        let err = parse_series("  # note=1\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.segment, "# note");
    }

    #[test]
    fn carriage_return_line_endings() {
        let expected = (vec![1.0, 2.0], vec![10.0, 20.0]);
        assert_eq!(parse_series("# cr only\r1=10\r2=20\r").unwrap(), expected);
        assert_eq!(parse_series("# crlf\r\n1=10\r\n2=20\r\n").unwrap(), expected);
        assert_eq!(parse_series("1=10\r\n2=20\r").unwrap(), expected);
    }

    #[test]
    fn line_numbers_count_carriage_returns() {
        let err = parse_series("1=1\r\n2=2\rx=3\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.segment, "x");
    }

    #[test]
    fn unparsable_segment_fails_with_line_number() {
        let err = parse_series("0=1\nx=1.0\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.segment, "x");

        let err = parse_series("1.0=\n").unwrap_err();
        assert_eq!(err.segment, "");
    }

    #[test]
    fn unparsable_file_is_parse_failure() {
        let path = temp_file("bad.out", "0.0=1.0\nabc=1.0\n");
        match load_series(&path) {
            Err(LoadError::ParseFailure { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.line, 2);
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let path = std::env::temp_dir().join("series-plot-does-not-exist/none.out");
        match load_series(&path) {
            Err(LoadError::ResourceNotFound { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected ResourceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_all_keeps_order_and_stops_on_first_error() {
        let a = temp_file("all_a.out", "0=1\n1=2\n");
        let b = temp_file("all_b.out", "0=5\n");
        let set = load_all(&[&a, &b]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.series[0].name, "all_a");
        assert_eq!(set.series[1].len(), 1);

        let missing = a.with_file_name("all_missing.out");
        let err = load_all(&[a.clone(), missing.clone(), b]).unwrap_err();
        assert!(matches!(err, LoadError::ResourceNotFound { path, .. } if path == missing));
    }

    #[test]
    fn scientific_and_special_values_parse() {
        let (x, y) = parse_series("1e3=-2.5E-1\n+4=inf\n").unwrap();
        assert_eq!(x, vec![1000.0, 4.0]);
        assert_eq!(y[0], -0.25);
        assert!(y[1].is_infinite());
    }
}
