use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series list
// ---------------------------------------------------------------------------

/// Render the left panel: one checkbox per series plus its summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    if state.series.is_empty() {
        ui.label("No measurement files loaded.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });
    ui.separator();

    let mut toggled = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, series) in state.series.series.iter().enumerate() {
                let text = RichText::new(&series.name).color(state.colors[idx].to_color32());

                let mut checked = state.visible[idx];
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(idx);
                }

                let summary = match series.stats() {
                    Some(stats) => stats.to_string(),
                    None => "no data points".to_string(),
                };
                ui.label(RichText::new(summary).small().weak())
                    .on_hover_text(series.source.display().to_string());
                ui.add_space(4.0);
            }
        });

    if let Some(idx) = toggled {
        state.toggle(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} series loaded, {} visible",
            state.series.len(),
            state.visible_indices().len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open measurement file")
        .add_filter("Measurement files", &["out", "txt"])
        .add_filter("All files", &["*"]);
    if let Some(dir) = state
        .series
        .series
        .last()
        .and_then(|s| s.source.parent())
        .filter(|d| !d.as_os_str().is_empty())
    {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.pick_file() {
        state.open_path(&path);
    }
}
