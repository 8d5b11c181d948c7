use crate::data::filter::FilterSelection;
use crate::data::model::SalaryDataset;
use crate::data::pipeline::{self, DashboardView, COUNTRY_CHART_ROLE};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalaryDataset>,

    /// The four per-column filter selections.
    pub selection: FilterSelection,

    /// Everything derived from the current dataset + selection, recomputed
    /// from scratch whenever either changes.
    pub view: DashboardView,

    /// Role the per-country chart is restricted to.
    pub country_role: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            view: DashboardView::empty(),
            country_role: COUNTRY_CHART_ROLE.to_string(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset with every observed value selected.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.selection = FilterSelection::all_of(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Re-run the filter-and-aggregate pipeline after a selection change.
    pub fn recompute(&mut self) {
        self.view = match &self.dataset {
            Some(ds) => pipeline::compute(ds, &self.selection, &self.country_role),
            None => DashboardView::empty(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SalaryRecord;

    fn rec(year: i32, role: &str, salary_usd: f64) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: "senior".to_string(),
            contract: "integral".to_string(),
            company_size: "media".to_string(),
            role: role.to_string(),
            salary_usd,
            remote: "remoto".to_string(),
            country: "USA".to_string(),
        }
    }

    #[test]
    fn set_dataset_selects_everything_and_recomputes() {
        let mut state = AppState::default();
        state.set_dataset(SalaryDataset::from_records(vec![
            rec(2023, "Data Scientist", 100_000.0),
            rec(2024, "Data Analyst", 80_000.0),
        ]));

        assert_eq!(state.selection.years.len(), 2);
        assert_eq!(state.view.kpis.record_count, 2);
        assert_eq!(state.view.kpis.mean_salary, 90_000.0);
    }

    #[test]
    fn recompute_follows_selection_changes() {
        let mut state = AppState::default();
        state.set_dataset(SalaryDataset::from_records(vec![
            rec(2023, "Data Scientist", 100_000.0),
            rec(2024, "Data Analyst", 80_000.0),
        ]));

        state.selection.years.remove(&2024);
        state.recompute();
        assert_eq!(state.view.kpis.record_count, 1);
        assert_eq!(state.view.kpis.top_role, "Data Scientist");

        state.selection.years.clear();
        state.recompute();
        assert_eq!(state.view.kpis.record_count, 0);
        assert_eq!(state.view.kpis.top_role, "");
    }
}
