use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::color;
use crate::data::aggregate::SummaryStats;
use crate::data::loader;
use crate::data::model::WineType;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Controls");
    ui.separator();

    // Copy the bounds out so we can mutate state below.
    let (red_count, white_count, q_min, q_max) = match &state.dataset {
        Some(ds) => (ds.red_count, ds.white_count, ds.quality_min, ds.quality_max),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // ---- Wine type ----
    ui.strong("Wine Type");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_types();
        }
        if ui.small_button("None").clicked() {
            state.select_no_types();
        }
    });
    for wine_type in WineType::ALL {
        let count = match wine_type {
            WineType::Red => red_count,
            WineType::White => white_count,
        };
        let mut checked = state.criteria.types.contains(&wine_type);
        let text = RichText::new(format!("{} ({count})", wine_type.label()))
            .color(color::wine_color(wine_type));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_wine_type(wine_type);
        }
    }
    if state.criteria.types.is_empty() {
        ui.weak("Select at least one type to see data.");
    }

    ui.separator();

    // ---- Quality score range (inclusive on both ends) ----
    ui.strong("Quality Score");
    let mut lo = state.criteria.min_quality;
    let mut hi = state.criteria.max_quality;
    let lo_changed = ui
        .add(Slider::new(&mut lo, q_min..=q_max).text("min"))
        .changed();
    let hi_changed = ui
        .add(Slider::new(&mut hi, q_min..=q_max).text("max"))
        .changed();
    if lo_changed || hi_changed {
        state.set_quality_range(lo, hi);
    }

    ui.separator();

    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Locate data folder…").clicked() {
                locate_data_folder(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} samples loaded, {} matching",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.config.annotate_heatmap, "Annotate heatmap")
            .clicked()
        {
            state.config.annotate_heatmap = !state.config.annotate_heatmap;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Render the four headline metric cards over the visible samples.
pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let agg = &state.aggregates;
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Avg Quality", agg.quality.as_ref(), 2, "");
        metric_card(&mut cols[1], "Avg Alcohol", agg.alcohol.as_ref(), 1, "%");
        metric_card(&mut cols[2], "Avg pH", agg.ph.as_ref(), 2, "");
        metric_card(&mut cols[3], "Avg Density", agg.density.as_ref(), 4, "");
    });
}

/// One metric card: caption, large mean, small median underneath.
fn metric_card(
    ui: &mut Ui,
    caption: &str,
    stats: Option<&SummaryStats>,
    decimals: usize,
    suffix: &str,
) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(caption).small());
            match stats {
                Some(s) => {
                    ui.label(
                        RichText::new(format!("{:.decimals$}{suffix}", s.mean))
                            .size(24.0)
                            .strong(),
                    );
                    ui.label(
                        RichText::new(format!("median {:.decimals$}{suffix}", s.median))
                            .small()
                            .weak(),
                    );
                }
                None => {
                    ui.label(RichText::new("n/a").size(24.0).strong());
                    ui.label(RichText::new("no samples").small().weak());
                }
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Error screen
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when no dataset could be loaded.
pub fn error_screen(ui: &mut Ui, state: &mut AppState) {
    let (red_path, white_path) = loader::dataset_paths(&state.config.data_dir);

    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(80.0);
        ui.heading(RichText::new("Could not load the wine quality data").color(Color32::RED));
        ui.add_space(8.0);
        if let Some(msg) = &state.status_message {
            ui.label(msg);
        }

        ui.add_space(12.0);
        ui.label("The dashboard expects the two Vinho Verde CSV files:");
        ui.monospace(red_path.display().to_string());
        ui.monospace(white_path.display().to_string());

        ui.add_space(12.0);
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Locate data folder…").clicked() {
                locate_data_folder(state);
            }
            if ui.button("Retry").clicked() {
                state.reload();
            }
        });

        ui.add_space(16.0);
        ui.weak("No data yet? `cargo run --bin generate_sample` writes a synthetic copy of both files.");
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Ask for the folder holding the CSV files, then reload from it.
fn locate_data_folder(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Locate data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = dir {
        log::info!("Data folder changed to {}", dir.display());
        state.config.data_dir = dir;
        state.reload();
    }
}
