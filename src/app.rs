use anyhow::{anyhow, Result};
use eframe::egui;

use crate::config::PlotConfig;
use crate::data::model::SeriesSet;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SeriesPlotApp {
    pub state: AppState,
}

impl SeriesPlotApp {
    pub fn new(config: PlotConfig, series: SeriesSet) -> Self {
        Self {
            state: AppState::new(config, series),
        }
    }
}

impl eframe::App for SeriesPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series list ----
        egui::SidePanel::left("series_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::series_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn show(config: PlotConfig, series: SeriesSet) -> Result<()> {
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| "Series Plot".to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32, config.height as f32])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(SeriesPlotApp::new(config, series)))),
    )
    .map_err(|e| anyhow!("viewer window failed: {e}"))
}
