use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Y-axis label of the experiment's congestion-window plots.
pub const DEFAULT_Y_LABEL: &str = "cong_w";
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 760;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no measurement files to plot (pass paths, --preset or a config file with \"paths\")")]
    NoPaths,
}

// ---------------------------------------------------------------------------
// Presets – the file lists of the TCP experiment plots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Connector traffic and client congestion windows.
    Congestion,
    /// Client retransmission timeouts.
    Rto,
    /// Connector drops and drops per second.
    Drops,
}

impl Preset {
    pub fn paths(self) -> Vec<PathBuf> {
        let files: &[&str] = match self {
            Preset::Congestion => &[
                "results/connector_traffic.out",
                "results/client_congestion_window_65.out",
                "results/client_congestion_window_66.out",
            ],
            Preset::Rto => &["results/client_rto_65.out", "results/client_rto_66.out"],
            Preset::Drops => &[
                "results/connector_drop.out",
                "results/connector_drops_per_sec.out",
            ],
        };
        files.iter().map(PathBuf::from).collect()
    }

    /// Whether [`DEFAULT_Y_LABEL`] actually describes this preset's data.
    pub fn default_label_fits(self) -> bool {
        matches!(self, Preset::Congestion)
    }
}

// ---------------------------------------------------------------------------
// Overrides – one configuration layer (config file or command line)
// ---------------------------------------------------------------------------

/// Optional settings from one source; `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotOverrides {
    pub preset: Option<Preset>,
    pub paths: Option<Vec<PathBuf>>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: Option<String>,
    pub output: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PlotOverrides {
    /// Read a JSON config file, e.g.
    ///
    /// ```json
    /// { "paths": ["results/client_rto_65.out"], "y_label": "rto" }
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config loaded from {}", path.display());
        Ok(overrides)
    }
}

// ---------------------------------------------------------------------------
// PlotConfig – fully resolved settings for one chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Measurement files overlaid on one chart, in drawing order.
    pub paths: Vec<PathBuf>,
    pub x_label: String,
    pub y_label: String,
    pub title: Option<String>,
    /// Write the chart here instead of opening a window.
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// Preset the current path list came from, if any.
    pub preset: Option<Preset>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            x_label: String::new(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            title: None,
            output: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            preset: None,
        }
    }
}

impl PlotConfig {
    /// Layer defaults, config file and command line (later wins).
    ///
    /// Within a layer the preset is applied before explicit paths, so a
    /// command-line preset replaces file paths unless command-line paths
    /// are given too.
    pub fn resolve(file: Option<PlotOverrides>, cli: PlotOverrides) -> Result<Self, ConfigError> {
        let mut config = PlotConfig::default();
        if let Some(file) = file {
            config.apply(file);
        }
        config.apply(cli);

        if config.paths.is_empty() {
            return Err(ConfigError::NoPaths);
        }
        Ok(config)
    }

    fn apply(&mut self, layer: PlotOverrides) {
        if let Some(preset) = layer.preset {
            self.paths = preset.paths();
            self.preset = Some(preset);
        }
        if let Some(paths) = layer.paths {
            self.paths = paths;
            self.preset = None;
        }
        if let Some(label) = layer.x_label {
            self.x_label = label;
        }
        if let Some(label) = layer.y_label {
            self.y_label = label;
        }
        if layer.title.is_some() {
            self.title = layer.title;
        }
        if layer.output.is_some() {
            self.output = layer.output;
        }
        if let Some(width) = layer.width {
            self.width = width;
        }
        if let Some(height) = layer.height {
            self.height = height;
        }
    }

    /// Warning text when the inherited `cong_w` label is kept for a preset
    /// whose files are not congestion windows.
    pub fn label_mismatch(&self) -> Option<String> {
        let preset = self.preset?;
        if preset.default_label_fits() || self.y_label != DEFAULT_Y_LABEL {
            return None;
        }
        Some(format!(
            "y-axis label '{DEFAULT_Y_LABEL}' does not describe the {preset:?} files; \
             it is kept for consistency with existing plots, pass --y-label to change it"
        ))
    }
}
