use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single salary observation.
///
/// Serde names follow the source file's column headers, which the upstream
/// cleaning stage exports in Portuguese. Salaries are annual and already
/// normalized to USD before they reach this program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "usd")]
    pub salary_usd: f64,
    #[serde(rename = "remoto")]
    pub remote: String,
    #[serde(rename = "residencia_iso3")]
    pub country: String,
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values for the four
/// filterable columns. Built once at load time, read-only afterwards.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All records, in file order.
    pub records: Vec<SalaryRecord>,
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contracts: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl SalaryDataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut years = BTreeSet::new();
        let mut seniorities = BTreeSet::new();
        let mut contracts = BTreeSet::new();
        let mut company_sizes = BTreeSet::new();

        for r in &records {
            years.insert(r.year);
            seniorities.insert(r.seniority.clone());
            contracts.insert(r.contract.clone());
            company_sizes.insert(r.company_size.clone());
        }

        SalaryDataset {
            records,
            years,
            seniorities,
            contracts,
            company_sizes,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
