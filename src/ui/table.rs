use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SalaryDataset;
use crate::data::pipeline::DashboardView;
use crate::format;

// ---------------------------------------------------------------------------
// Detail table (filtered rows)
// ---------------------------------------------------------------------------

/// One row per filtered record, in original dataset order.
pub fn detail_table(ui: &mut Ui, dataset: &SalaryDataset, view: &DashboardView) {
    ui.strong("Detailed data");
    ui.add_space(4.0);

    if view.indices.is_empty() {
        ui.label(RichText::new("No rows match the current filters.").italics().weak());
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto()) // year
        .column(Column::auto()) // seniority
        .column(Column::auto()) // contract
        .column(Column::auto()) // company size
        .column(Column::remainder()) // role
        .column(Column::auto()) // salary
        .column(Column::auto()) // work mode
        .column(Column::auto()) // country
        .min_scrolled_height(160.0)
        .max_scroll_height(360.0)
        .header(20.0, |mut header| {
            for title in [
                "Year",
                "Seniority",
                "Contract",
                "Company size",
                "Role",
                "Salary (USD)",
                "Work mode",
                "Country",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.indices.len(), |mut row| {
                let record = &dataset.records[view.indices[row.index()]];
                row.col(|ui| {
                    ui.label(record.year.to_string());
                });
                row.col(|ui| {
                    ui.label(record.seniority.as_str());
                });
                row.col(|ui| {
                    ui.label(record.contract.as_str());
                });
                row.col(|ui| {
                    ui.label(record.company_size.as_str());
                });
                row.col(|ui| {
                    ui.label(record.role.as_str());
                });
                row.col(|ui| {
                    ui.label(format::usd(record.salary_usd));
                });
                row.col(|ui| {
                    ui.label(record.remote.as_str());
                });
                row.col(|ui| {
                    ui.label(record.country.as_str());
                });
            });
        });
}
