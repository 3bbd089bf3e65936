use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VinoscopeApp {
    pub state: AppState,
}

impl VinoscopeApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for VinoscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Without a dataset there is nothing to filter or plot.
        if self.state.dataset.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::error_screen(ui, &mut self.state);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Central dashboard layout
// ---------------------------------------------------------------------------

/// Metric cards, the ten charts in a two-column grid, and the raw-data
/// table behind a collapsing header. Everything here reads the filtered
/// view; all mutation happens in the panels.
fn dashboard(ui: &mut egui::Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let indices = &state.visible_indices;
    let agg = &state.aggregates;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut egui::Ui| {
            ui.label(format!(
                "Currently analyzing {} wine samples.",
                indices.len()
            ));
            ui.add_space(4.0);
            panels::metrics_row(ui, state);
            ui.add_space(8.0);
            ui.separator();

            // Two charts per row.
            ui.columns(2, |cols: &mut [egui::Ui]| {
                charts::quality_distribution(&mut cols[0], dataset, indices);
                charts::alcohol_by_quality(&mut cols[1], dataset, indices);
            });
            ui.columns(2, |cols: &mut [egui::Ui]| {
                charts::density_vs_acidity(&mut cols[0], dataset, indices);
                charts::volatile_acidity_spread(&mut cols[1], dataset, indices);
            });
            ui.columns(2, |cols: &mut [egui::Ui]| {
                charts::ph_density(&mut cols[0], dataset, indices);
                charts::sulphates_vs_chlorides(&mut cols[1], dataset, indices);
            });
            ui.columns(2, |cols: &mut [egui::Ui]| {
                charts::total_sulfur_histogram(&mut cols[0], dataset, indices);
                charts::residual_sugar_strip(&mut cols[1], dataset, indices);
            });
            ui.columns(2, |cols: &mut [egui::Ui]| {
                charts::sulfur_trend(&mut cols[0], &agg.sulfur_trend);
                charts::correlation_heatmap(
                    &mut cols[1],
                    &agg.correlation,
                    state.config.annotate_heatmap,
                );
            });

            ui.separator();
            egui::CollapsingHeader::new("View Raw Filtered Data")
                .default_open(false)
                .show(ui, |ui: &mut egui::Ui| {
                    table::raw_data_table(ui, dataset, indices);
                });
        });
}
