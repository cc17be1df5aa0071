use eframe::egui;

use crate::data::filter::{derive_ranking, derive_series, derive_table};
use crate::present;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MortalityApp {
    pub state: AppState,
}

impl MortalityApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MortalityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Recompute all three views from the canonical dataset and the
        // current selection, every frame, before anything renders.
        let table_view = derive_table(&self.state.dataset, &self.state.selection);
        let series_set = derive_series(&table_view, &self.state.selection);
        let ranking = derive_ranking(&self.state.dataset, &self.state.selection);

        // ---- Central panel: table, line chart, ranking ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Probability of death by cause, age and sex");
                ui.weak("Filter causes and sex in the sidebar.");
                ui.add_space(4.0);
                if table_view.is_empty() {
                    plot::placeholder(
                        ui,
                        "Select one or more causes in the sidebar to see the table.",
                    );
                } else {
                    table::data_table(ui, &table_view);
                }

                ui.separator();

                ui.heading("Probability by age");
                ui.weak("How each selected cause's probability changes with age.");
                ui.add_space(4.0);
                if series_set.is_empty() {
                    plot::placeholder(
                        ui,
                        "Select one or more causes in the sidebar to see the line chart.",
                    );
                } else {
                    let series = present::chart_series(&series_set, &self.state.colors);
                    plot::series_plot(ui, &series);
                }

                ui.separator();

                ui.heading(present::ranking_title(&ranking));
                ui.weak("Selected causes ranked by probability for one sex and age bracket.");
                ui.add_space(4.0);
                if ranking.is_empty() {
                    plot::placeholder(
                        ui,
                        "Select one or more causes in the sidebar to see the ranking.",
                    );
                } else {
                    let bars = present::ranking_bars(&ranking);
                    plot::ranking_plot(ui, &bars);
                }
            });
        });
    }
}
