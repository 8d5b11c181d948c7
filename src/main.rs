mod app;
mod color;
mod data;
mod format;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::SalaryScopeApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional dataset path on the command line, loaded before the window
    // opens. A broken startup dataset aborts the program; File → Open is
    // still available when no path is given.
    let dataset = match std::env::args().nth(1) {
        Some(path) => {
            let dataset = data::loader::load_file(Path::new(&path))
                .with_context(|| format!("loading dataset from '{path}'"))?;
            log::info!("Loaded {} salary records from '{path}'", dataset.len());
            Some(dataset)
        }
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Scope – Data Careers Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryScopeApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
