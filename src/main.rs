mod app;
mod color;
mod data;
mod present;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::MortalityApp;
use eframe::egui;
use state::AppState;

/// Default source file: the e-Stat death-cause probability table.
const DEFAULT_DATA_PATH: &str = "00003.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The dataset is loaded exactly once, before the UI starts; a schema
    // or decode failure aborts startup with the full error chain.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let dataset = data::loader::load(Path::new(&path))
        .with_context(|| format!("loading death-cause table from {path}"))?;
    log::info!(
        "loaded {} causes with {} value columns from {path}",
        dataset.len(),
        dataset.columns.len()
    );
    if dataset.is_empty() {
        log::warn!("{path} has a valid header but no data rows");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset);
    eframe::run_native(
        "Mortality Lens – Cause-of-Death Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(MortalityApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
