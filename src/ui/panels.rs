use std::collections::BTreeSet;
use std::fmt::Display;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::pipeline::KpiSummary;
use crate::format;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Filters");
    ui.separator();

    // Clone the distinct-value sets so we can mutate the selection below.
    let (years, seniorities, contracts, company_sizes) = match &state.dataset {
        Some(ds) => (
            ds.years.clone(),
            ds.seniorities.clone(),
            ds.contracts.clone(),
            ds.company_sizes.clone(),
        ),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_section(ui, "Year", &years, &mut state.selection.years);
            changed |= filter_section(ui, "Seniority", &seniorities, &mut state.selection.seniorities);
            changed |= filter_section(ui, "Contract", &contracts, &mut state.selection.contracts);
            changed |= filter_section(
                ui,
                "Company size",
                &company_sizes,
                &mut state.selection.company_sizes,
            );
        });

    if changed {
        state.recompute();
    }
}

/// One collapsible multi-select section. Returns whether the selection
/// changed this frame.
fn filter_section<T: Ord + Clone + Display>(
    ui: &mut Ui,
    label: &str,
    all_values: &BTreeSet<T>,
    selected: &mut BTreeSet<T>,
) -> bool {
    let mut changed = false;

    let header_text = format!("{label}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.clone();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                    changed = true;
                }
            }
        });

    changed
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} matching filters",
                ds.len(),
                state.view.indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel building blocks
// ---------------------------------------------------------------------------

/// Page title and intro blurb.
pub fn dashboard_header(ui: &mut Ui) {
    ui.add_space(4.0);
    ui.heading("Data Careers Salary Dashboard");
    ui.label("Explore annual salaries across the data industry. Use the filters on the left to refine the view.");
    ui.add_space(8.0);
}

/// The four headline metrics over the filtered rows.
pub fn kpi_row(ui: &mut Ui, kpis: &KpiSummary) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Average salary", &format::usd(kpis.mean_salary));
        metric(&mut cols[1], "Highest salary", &format::usd(kpis.max_salary));
        metric(&mut cols[2], "Records", &format::thousands(kpis.record_count));
        let role = if kpis.top_role.is_empty() {
            "–"
        } else {
            kpis.top_role.as_str()
        };
        metric(&mut cols[3], "Most frequent role", role);
    });
    ui.add_space(4.0);
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

/// Static footer: attribution and source links.
pub fn footer(ui: &mut Ui) {
    ui.separator();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Data:");
        ui.hyperlink_to(
            "guilhermeonrails/data-jobs",
            "https://github.com/guilhermeonrails/data-jobs",
        );
        ui.label("· Salaries are annual, normalized to USD by the upstream cleaning stage.");
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} salary records covering {} years",
                    dataset.len(),
                    dataset.years.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
