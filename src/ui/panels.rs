use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::filter::SexMode;
use crate::data::model::{AgeBracket, Sex};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one section for the table / line chart
/// filters, one for the ranking bar chart.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the cause list so we can mutate state inside the loop.
    let causes: Vec<String> = state.dataset.causes().map(str::to_string).collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Table & line chart filters ----
            let n_selected = state.selection.selected_causes.len();
            let header = format!("Table & line chart  ({n_selected}/{})", causes.len());

            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("table_filters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Causes of death");
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_causes();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_causes();
                        }
                    });

                    for cause in &causes {
                        let mut checked = state.selection.selected_causes.contains(cause);
                        let text = RichText::new(cause).color(state.colors.color_for(cause));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_cause(cause);
                        }
                    }

                    ui.add_space(4.0);
                    ui.label("Sex");
                    egui::ComboBox::from_id_salt("sex_mode")
                        .selected_text(state.selection.sex_mode.label())
                        .show_ui(ui, |ui: &mut Ui| {
                            for mode in SexMode::ALL {
                                ui.selectable_value(
                                    &mut state.selection.sex_mode,
                                    mode,
                                    mode.label(),
                                );
                            }
                        });
                });

            ui.separator();

            // ---- Ranking filters (independent of the table's sex mode) ----
            egui::CollapsingHeader::new(RichText::new("Ranking").strong())
                .id_salt("ranking_filters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Sex");
                    egui::ComboBox::from_id_salt("ranking_sex")
                        .selected_text(state.selection.ranking_sex.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            for sex in Sex::ALL {
                                ui.selectable_value(
                                    &mut state.selection.ranking_sex,
                                    sex,
                                    sex.to_string(),
                                );
                            }
                        });

                    ui.label("Age bracket");
                    egui::ComboBox::from_id_salt("ranking_age")
                        .selected_text(state.selection.ranking_age.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            for age in AgeBracket::ALL {
                                ui.selectable_value(
                                    &mut state.selection.ranking_age,
                                    age,
                                    age.to_string(),
                                );
                            }
                        });
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title plus dataset / selection counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Mortality Lens");
        ui.separator();
        ui.label(format!(
            "{} causes, {} value columns loaded",
            state.dataset.len(),
            state.dataset.columns.len()
        ));
        ui.separator();
        ui.label(format!(
            "{} selected",
            state.selection.selected_causes.len()
        ));
    });
}
