use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render every visible series as one line on shared axes.
pub fn series_plot(ui: &mut Ui, state: &AppState) {
    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a measurement file to plot it  (File → Open…)");
        });
        return;
    }

    let y_label = if state.minmax_scaling {
        format!("{} (min-max scaled)", state.config.y_label)
    } else {
        state.config.y_label.clone()
    };

    Plot::new("series_plot")
        .legend(Legend::default())
        .x_axis_label(state.config.x_label.as_str())
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for idx in state.visible_indices() {
                let series = &state.series.series[idx];
                let points = PlotPoints::new(state.plot_points(idx));

                let line = Line::new(points)
                    .name(&series.name)
                    .color(state.colors[idx].to_color32())
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
