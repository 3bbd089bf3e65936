use eframe::egui::{RichText, TextStyle, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color;
use crate::data::model::{Column, WineDataset};

/// Virtualized table of the visible samples, one row per sample.
///
/// Only rows currently in view are laid out, so scrolling through all
/// ~6500 samples stays cheap.
pub fn raw_data_table(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    if indices.is_empty() {
        ui.weak("No samples match the current filters.");
        return;
    }

    let row_height = ui.text_style_height(&TextStyle::Body) + 4.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .columns(TableColumn::auto().at_least(56.0), Column::ALL.len())
        .column(TableColumn::remainder().at_least(48.0))
        .header(20.0, |mut header| {
            for column in Column::ALL {
                header.col(|ui: &mut Ui| {
                    ui.strong(column.short_label()).on_hover_text(column.label());
                });
            }
            header.col(|ui: &mut Ui| {
                ui.strong("type");
            });
        })
        .body(|body| {
            body.rows(row_height, indices.len(), |mut row| {
                let sample = &dataset.samples[indices[row.index()]];
                for column in Column::ALL {
                    let value = column.value(sample);
                    let decimals = column.decimals();
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{value:.decimals$}"));
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(sample.wine_type.label())
                            .color(color::wine_color(sample.wine_type)),
                    );
                });
            });
        });
}
