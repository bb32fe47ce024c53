mod app;
mod color;
mod config;
mod data;
mod render;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use config::{PlotConfig, PlotOverrides, Preset};
use data::loader::load_all;
use data::model::SeriesSet;

#[derive(Parser, Debug)]
#[command(author, version, about = "Overlay key=value measurement series on one chart", long_about = None)]
struct Cli {
    /// Measurement files to overlay (replaces preset / config file paths)
    paths: Vec<PathBuf>,

    /// Built-in file list from the TCP experiment
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// X-axis label
    #[arg(long)]
    x_label: Option<String>,

    /// Y-axis label (default "cong_w")
    #[arg(long)]
    y_label: Option<String>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Write the chart to a .png or .svg file instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image / window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image / window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Print per-series statistics to stdout
    #[arg(long)]
    summary: bool,
}

impl Cli {
    fn overrides(&self) -> PlotOverrides {
        PlotOverrides {
            preset: self.preset,
            paths: (!self.paths.is_empty()).then(|| self.paths.clone()),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            title: self.title.clone(),
            output: self.output.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

fn print_summary(set: &SeriesSet) {
    for series in &set.series {
        match series.stats() {
            Some(stats) => println!("{}: {stats}", series.name),
            None => println!("{}: no data points", series.name),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let file = cli
        .config
        .as_deref()
        .map(PlotOverrides::load_from_file)
        .transpose()?;
    let config = PlotConfig::resolve(file, cli.overrides())?;

    if let Some(warning) = config.label_mismatch() {
        log::warn!("{warning}");
    }

    let series = load_all(&config.paths).context("loading measurement files")?;
    log::info!(
        "Loaded {} series with {} points in total",
        series.len(),
        series.total_points()
    );

    if cli.summary {
        print_summary(&series);
    }

    match config.output.clone() {
        Some(path) => render::render_to_file(&series, &config, &path),
        None => app::show(config, series),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_paths_become_overrides() {
        let cli = Cli::try_parse_from([
            "series-plot",
            "results/a.out",
            "results/b.out",
            "--y-label",
            "rto",
            "-o",
            "rto.svg",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(
            overrides.paths,
            Some(vec![PathBuf::from("results/a.out"), PathBuf::from("results/b.out")])
        );
        assert_eq!(overrides.y_label.as_deref(), Some("rto"));
        assert_eq!(overrides.output, Some(PathBuf::from("rto.svg")));
        assert!(!cli.summary);
    }

    #[test]
    fn preset_without_paths_keeps_preset_list() {
        let cli = Cli::try_parse_from(["series-plot", "--preset", "drops", "--summary"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.preset, Some(Preset::Drops));
        assert!(overrides.paths.is_none());
        assert!(cli.summary);

        let config = PlotConfig::resolve(None, overrides).unwrap();
        assert_eq!(config.paths, Preset::Drops.paths());
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(Cli::try_parse_from(["series-plot", "--preset", "latency"]).is_err());
    }
}
