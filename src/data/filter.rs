use std::collections::BTreeSet;

use super::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// FilterSelection: which values are selected per filterable column
// ---------------------------------------------------------------------------

/// The four user-chosen value sets, each a subset of the dataset's distinct
/// values for that column.
///
/// An empty set means nothing is selected for that column, so nothing
/// matches. There is no "empty means all" shorthand; the UI starts from
/// [`FilterSelection::all_of`] instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contracts: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl FilterSelection {
    /// Every observed value selected – the UI default.
    pub fn all_of(dataset: &SalaryDataset) -> Self {
        FilterSelection {
            years: dataset.years.clone(),
            seniorities: dataset.seniorities.clone(),
            contracts: dataset.contracts.clone(),
            company_sizes: dataset.company_sizes.clone(),
        }
    }

    /// Conjunction of the four membership predicates: AND across columns,
    /// OR within each column's selected set.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contracts.contains(&record.contract)
            && self.company_sizes.contains(&record.company_size)
    }
}

/// Return indices of records that pass the selection, preserving the
/// dataset's original row order.
pub fn filtered_indices(dataset: &SalaryDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}
