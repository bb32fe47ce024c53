use std::path::{Path, PathBuf};

use crate::color::{generate_palette, SeriesColor};
use crate::config::PlotConfig;
use crate::data::loader::{load_all, load_series};
use crate::data::model::{Series, SeriesSet};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Axis labels, title and the configured path list.
    pub config: PlotConfig,

    /// Loaded series, in drawing order.
    pub series: SeriesSet,

    /// Per-series visibility, parallel to `series`.
    pub visible: Vec<bool>,

    /// Per-series colour, parallel to `series`.
    pub colors: Vec<SeriesColor>,

    /// Normalise every series to [0, 1] before drawing.
    pub minmax_scaling: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PlotConfig, series: SeriesSet) -> Self {
        let mut state = Self {
            config,
            series: SeriesSet::default(),
            visible: Vec::new(),
            colors: Vec::new(),
            minmax_scaling: false,
            status_message: None,
        };
        state.set_series(series);
        state
    }

    /// Replace the loaded series.
    ///
    /// A series keeps its visibility when the slot at the same index was
    /// loaded from the same file; anything else starts visible.
    pub fn set_series(&mut self, series: SeriesSet) {
        let previous = &self.series.series;
        self.visible = series
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| match (previous.get(i), self.visible.get(i)) {
                (Some(old), Some(&shown)) if old.source == s.source => shown,
                _ => true,
            })
            .collect();
        self.colors = generate_palette(series.len());
        self.series = series;
    }

    /// Append one more series and show it.
    pub fn add_series(&mut self, series: Series) {
        let mut all = self.series.clone();
        all.series.push(series);
        self.set_series(all);
    }

    /// Load a measurement file picked by the user; errors go to the status line.
    pub fn open_path(&mut self, path: &Path) {
        match load_series(path) {
            Ok(series) => {
                self.add_series(series);
                self.status_message = None;
            }
            Err(e) => self.report_error(anyhow::Error::new(e)),
        }
    }

    /// Re-read every loaded file from disk.
    ///
    /// On failure the previously loaded series stay on screen.
    pub fn reload(&mut self) {
        let sources: Vec<PathBuf> = self.series.series.iter().map(|s| s.source.clone()).collect();
        match load_all(&sources) {
            Ok(series) => {
                log::info!("Reloaded {} series", series.len());
                self.set_series(series);
                self.status_message = None;
            }
            Err(e) => self.report_error(anyhow::Error::new(e)),
        }
    }

    fn report_error(&mut self, e: anyhow::Error) {
        log::error!("Failed to load measurement file: {e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }

    /// Flip visibility of one series.
    pub fn toggle(&mut self, idx: usize) {
        if let Some(shown) = self.visible.get_mut(idx) {
            *shown = !*shown;
        }
    }

    pub fn select_all(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    pub fn select_none(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = false);
    }

    /// Indices of series currently drawn.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, shown)| **shown)
            .map(|(i, _)| i)
            .collect()
    }

    /// Points of one series as drawn, after optional min-max scaling.
    pub fn plot_points(&self, idx: usize) -> Vec<[f64; 2]> {
        let Some(series) = self.series.series.get(idx) else {
            return Vec::new();
        };

        let scale = match (self.minmax_scaling, series.stats()) {
            (true, Some(stats)) => Some((stats.y_min, stats.y_max - stats.y_min)),
            _ => None,
        };

        series
            .points()
            .map(|(x, y)| match scale {
                Some((_, range)) if range.abs() < f64::EPSILON => [x, 0.0],
                Some((min, range)) => [x, (y - min) / range],
                None => [x, y],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn series(path: &str, points: &[(f64, f64)]) -> Series {
        let mut s = Series::new(Path::new(path));
        for &(x, y) in points {
            s.push(x, y);
        }
        s
    }

    fn state_with(series_list: Vec<Series>) -> AppState {
        AppState::new(PlotConfig::default(), SeriesSet::new(series_list))
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("series-plot-state-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn everything_visible_initially() {
        let state = state_with(vec![series("a", &[]), series("b", &[])]);
        assert_eq!(state.visible_indices(), vec![0, 1]);
        assert_eq!(state.colors.len(), 2);
    }

    #[test]
    fn toggle_and_select() {
        let mut state = state_with(vec![series("a", &[]), series("b", &[]), series("c", &[])]);
        state.toggle(1);
        assert_eq!(state.visible_indices(), vec![0, 2]);
        state.toggle(7);
        state.select_none();
        assert!(state.visible_indices().is_empty());
        state.select_all();
        assert_eq!(state.visible_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn added_series_is_visible_and_others_keep_state() {
        let mut state = state_with(vec![series("a", &[]), series("b", &[])]);
        state.toggle(0);
        state.add_series(series("c", &[(0.0, 1.0)]));
        assert_eq!(state.visible, vec![false, true, true]);
        assert_eq!(state.colors.len(), 3);
    }

    #[test]
    fn minmax_scaling_normalises_y() {
        let mut state = state_with(vec![
            series("a", &[(0.0, 10.0), (1.0, 20.0), (2.0, 15.0)]),
            series("flat", &[(0.0, 3.0), (1.0, 3.0)]),
        ]);
        assert_eq!(state.plot_points(0)[1], [1.0, 20.0]);

        state.minmax_scaling = true;
        assert_eq!(state.plot_points(0), vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.5]]);
        assert_eq!(state.plot_points(1), vec![[0.0, 0.0], [1.0, 0.0]]);
        assert!(state.plot_points(5).is_empty());
    }

    #[test]
    fn open_missing_file_sets_status_and_keeps_series() {
        let mut state = state_with(vec![series("a", &[(0.0, 1.0)])]);
        state.open_path(&temp_dir().join("missing.out"));
        assert_eq!(state.series.len(), 1);
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("missing.out"), "{msg}");
    }

    #[test]
    fn reload_rereads_files_and_keeps_visibility() {
        let dir = temp_dir();
        let a = dir.join("reload_a.out");
        let b = dir.join("reload_b.out");
        fs::write(&a, "0=1\n").unwrap();
        fs::write(&b, "0=2\n").unwrap();

        let mut state = AppState::new(PlotConfig::default(), load_all(&[&a, &b]).unwrap());
        state.toggle(1);

        fs::write(&a, "0=1\n1=5\n").unwrap();
        state.reload();
        assert!(state.status_message.is_none());
        assert_eq!(state.series.series[0].len(), 2);
        assert_eq!(state.visible, vec![true, false]);

        fs::write(&b, "0=oops\n").unwrap();
        state.reload();
        assert!(state.status_message.is_some());
        assert_eq!(state.series.series[1].y(), &[2.0]);
    }

    #[test]
    fn same_file_opened_twice_keeps_separate_visibility() {
        let dir = temp_dir();
        let a = dir.join("twice.out");
        fs::write(&a, "0=1\n").unwrap();

        let mut state = state_with(Vec::new());
        state.open_path(&a);
        state.open_path(&a);
        state.toggle(1);
        assert_eq!(state.visible, vec![true, false]);

        state.reload();
        assert!(state.status_message.is_none());
        assert_eq!(state.visible, vec![true, false]);
    }

    #[test]
    fn replaced_slot_starts_visible() {
        let mut state = state_with(vec![series("a", &[]), series("b", &[])]);
        state.select_none();
        state.set_series(SeriesSet::new(vec![series("a", &[]), series("c", &[])]));
        assert_eq!(state.visible, vec![false, true]);
    }
}
