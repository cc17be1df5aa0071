use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::TableView;
use crate::present;

// ---------------------------------------------------------------------------
// Data grid for the filtered table view
// ---------------------------------------------------------------------------

/// Render the filtered probability table. Values are shown exactly as
/// loaded; missing cells show a dash. Callers handle the empty case.
pub fn data_table(ui: &mut Ui, view: &TableView) {
    let headings = present::column_headings(view);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(180.0))
        .columns(Column::remainder().at_least(70.0), view.columns.len())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Cause");
            });
            for heading in &headings {
                header.col(|ui| {
                    ui.strong(heading);
                });
            }
        })
        .body(|mut body| {
            for row in &view.rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.cause);
                    });
                    for col in 0..view.columns.len() {
                        table_row.col(|ui| {
                            ui.label(present::cell_text(row, col));
                        });
                    }
                });
            }
        });
}
