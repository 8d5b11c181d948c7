use eframe::egui;

use crate::data::model::SalaryDataset;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryScopeApp {
    pub state: AppState,
}

impl SalaryScopeApp {
    pub fn new(dataset: Option<SalaryDataset>) -> Self {
        let mut state = AppState::default();
        if let Some(ds) = dataset {
            state.set_dataset(ds);
        }
        Self { state }
    }
}

impl eframe::App for SalaryScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, detail table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let Some(dataset) = &state.dataset else {
                        ui.centered_and_justified(|ui| {
                            ui.heading("Open a dataset to get started  (File → Open…)");
                        });
                        return;
                    };

                    panels::dashboard_header(ui);
                    panels::kpi_row(ui, &state.view.kpis);
                    ui.separator();
                    charts::charts_grid(ui, &state.view, &state.country_role);
                    ui.separator();
                    table::detail_table(ui, dataset, &state.view);
                    panels::footer(ui);
                });
        });
    }
}
