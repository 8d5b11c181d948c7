use std::collections::{BTreeMap, HashMap};

use super::filter::{filtered_indices, FilterSelection};
use super::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Derived dashboard data
// ---------------------------------------------------------------------------

/// Role the per-country chart is restricted to unless the caller passes a
/// different one.
pub const COUNTRY_CHART_ROLE: &str = "Data Scientist";

/// Number of equal-width buckets in the salary histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Number of roles shown in the top-roles chart.
pub const TOP_ROLES: usize = 10;

/// Headline statistics over the filtered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    /// Most frequent role; ties go to the value seen first in row order.
    /// Empty string when no rows match.
    pub top_role: String,
}

impl KpiSummary {
    fn empty() -> Self {
        KpiSummary {
            mean_salary: 0.0,
            max_salary: 0.0,
            record_count: 0,
            top_role: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleMean {
    pub role: String,
    pub mean_salary: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkModeCount {
    pub mode: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryMean {
    pub country: String,
    pub mean_salary: f64,
}

/// Everything the dashboard renders for one dataset + selection pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Indices of records passing the filter, in original row order.
    pub indices: Vec<usize>,
    pub kpis: KpiSummary,
    /// Up to [`TOP_ROLES`] roles, ascending by mean salary so a horizontal
    /// bar chart draws the largest bar on top.
    pub top_roles: Vec<RoleMean>,
    /// [`HISTOGRAM_BINS`] equal-width buckets spanning the view's salary
    /// range; collapses to one bucket when every salary is identical.
    pub histogram: Vec<HistogramBin>,
    /// Rows per work mode, in first-encounter order.
    pub work_modes: Vec<WorkModeCount>,
    /// Mean salary per country for the restricted role, sorted by ISO3 code.
    /// Can be empty even when the view is not.
    pub country_means: Vec<CountryMean>,
}

impl DashboardView {
    /// The well-defined result for zero matching rows.
    pub fn empty() -> Self {
        DashboardView {
            indices: Vec::new(),
            kpis: KpiSummary::empty(),
            top_roles: Vec::new(),
            histogram: Vec::new(),
            work_modes: Vec::new(),
            country_means: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// The filter-and-aggregate pipeline
// ---------------------------------------------------------------------------

/// Run the whole pipeline: filter, KPIs, and the four chart datasets.
///
/// Pure, synchronous, and recomputed from scratch on every call. An empty
/// filtered set is a regular value (zeroed KPIs, empty chart datasets),
/// never an error; the caller renders an explicit empty-state for it.
pub fn compute(
    dataset: &SalaryDataset,
    selection: &FilterSelection,
    country_role: &str,
) -> DashboardView {
    let indices = filtered_indices(dataset, selection);
    if indices.is_empty() {
        return DashboardView::empty();
    }

    let rows: Vec<&SalaryRecord> = indices.iter().map(|&i| &dataset.records[i]).collect();

    let total: f64 = rows.iter().map(|r| r.salary_usd).sum();
    let kpis = KpiSummary {
        mean_salary: total / rows.len() as f64,
        max_salary: rows
            .iter()
            .map(|r| r.salary_usd)
            .fold(f64::NEG_INFINITY, f64::max),
        record_count: rows.len(),
        top_role: most_frequent_role(&rows),
    };

    DashboardView {
        kpis,
        top_roles: top_roles_by_mean(&rows),
        histogram: salary_histogram(&rows),
        work_modes: work_mode_counts(&rows),
        country_means: country_means(&rows, country_role),
        indices,
    }
}

/// Most frequent role; ties go to the role whose first occurrence comes
/// earliest in row order.
fn most_frequent_role(rows: &[&SalaryRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for r in rows {
        let n = counts.entry(r.role.as_str()).or_insert(0);
        if *n == 0 {
            order.push(r.role.as_str());
        }
        *n += 1;
    }

    let mut best = "";
    let mut best_count = 0;
    for role in order {
        let n = counts[role];
        if n > best_count {
            best = role;
            best_count = n;
        }
    }
    best.to_string()
}

/// Mean salary per role, in first-encounter order.
fn role_means(rows: &[&SalaryRecord]) -> Vec<RoleMean> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    for r in rows {
        match index.get(r.role.as_str()) {
            Some(&i) => {
                groups[i].1 += r.salary_usd;
                groups[i].2 += 1;
            }
            None => {
                index.insert(r.role.as_str(), groups.len());
                groups.push((r.role.clone(), r.salary_usd, 1));
            }
        }
    }
    groups
        .into_iter()
        .map(|(role, sum, n)| RoleMean {
            role,
            mean_salary: sum / n as f64,
        })
        .collect()
}

/// The [`TOP_ROLES`] highest mean salaries, returned ascending.
fn top_roles_by_mean(rows: &[&SalaryRecord]) -> Vec<RoleMean> {
    let mut groups = role_means(rows);
    // Stable sort keeps first-encounter order between equal means.
    groups.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    groups.truncate(TOP_ROLES);
    groups.reverse();
    groups
}

/// Equal-width histogram over the view's salaries.
fn salary_histogram(rows: &[&SalaryRecord]) -> Vec<HistogramBin> {
    let min = rows
        .iter()
        .map(|r| r.salary_usd)
        .fold(f64::INFINITY, f64::min);
    let max = rows
        .iter()
        .map(|r| r.salary_usd)
        .fold(f64::NEG_INFINITY, f64::max);

    let span = max - min;
    if span <= 0.0 {
        // Every salary identical: a single degenerate bucket.
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: rows.len(),
        }];
    }

    let width = span / HISTOGRAM_BINS as f64;
    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for r in rows {
        // The maximum value lands exactly on the upper edge; clamp it into
        // the last bucket.
        let bin = (((r.salary_usd - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Row counts per work mode, in first-encounter order.
fn work_mode_counts(rows: &[&SalaryRecord]) -> Vec<WorkModeCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WorkModeCount> = Vec::new();
    for r in rows {
        match index.get(r.remote.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(r.remote.as_str(), counts.len());
                counts.push(WorkModeCount {
                    mode: r.remote.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}

/// Mean salary per country over the rows matching `country_role`.
fn country_means(rows: &[&SalaryRecord], country_role: &str) -> Vec<CountryMean> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in rows.iter().filter(|r| r.role == country_role) {
        let entry = groups.entry(r.country.as_str()).or_insert((0.0, 0));
        entry.0 += r.salary_usd;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(country, (sum, n))| CountryMean {
            country: country.to_string(),
            mean_salary: sum / n as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(
        year: i32,
        seniority: &str,
        contract: &str,
        company_size: &str,
        role: &str,
        salary_usd: f64,
        remote: &str,
        country: &str,
    ) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: seniority.to_string(),
            contract: contract.to_string(),
            company_size: company_size.to_string(),
            role: role.to_string(),
            salary_usd,
            remote: remote.to_string(),
            country: country.to_string(),
        }
    }

    /// The worked example from the dashboard's documentation.
    fn example_dataset() -> SalaryDataset {
        SalaryDataset::from_records(vec![
            rec(2023, "Senior", "CLT", "Large", "Data Scientist", 120_000.0, "Remote", "USA"),
            rec(2023, "Junior", "CLT", "Small", "Data Scientist", 60_000.0, "Remote", "USA"),
            rec(2022, "Senior", "PJ", "Large", "Data Engineer", 130_000.0, "Hybrid", "BRA"),
            rec(2023, "Senior", "CLT", "Large", "Data Scientist", 140_000.0, "Onsite", "BRA"),
            rec(2021, "Mid", "CLT", "Medium", "Analyst", 70_000.0, "Remote", "USA"),
        ])
    }

    #[test]
    fn example_scenario() {
        let ds = example_dataset();
        let mut selection = FilterSelection::all_of(&ds);
        selection.years = [2022, 2023].into_iter().collect();

        let view = compute(&ds, &selection, COUNTRY_CHART_ROLE);

        assert_eq!(view.kpis.record_count, 4);
        assert_eq!(view.kpis.mean_salary, 112_500.0);
        assert_eq!(view.kpis.max_salary, 140_000.0);
        assert_eq!(view.kpis.top_role, "Data Scientist");

        // Sorted by ISO3 code.
        assert_eq!(view.country_means.len(), 2);
        assert_eq!(view.country_means[0].country, "BRA");
        assert_eq!(view.country_means[0].mean_salary, 140_000.0);
        assert_eq!(view.country_means[1].country, "USA");
        assert_eq!(view.country_means[1].mean_salary, 90_000.0);
    }

    #[test]
    fn empty_selection_yields_the_empty_view() {
        let ds = example_dataset();
        let mut selection = FilterSelection::all_of(&ds);
        selection.company_sizes.clear();

        let view = compute(&ds, &selection, COUNTRY_CHART_ROLE);

        assert!(view.indices.is_empty());
        assert_eq!(view.kpis.mean_salary, 0.0);
        assert_eq!(view.kpis.max_salary, 0.0);
        assert_eq!(view.kpis.record_count, 0);
        assert_eq!(view.kpis.top_role, "");
        assert!(view.top_roles.is_empty());
        assert!(view.histogram.is_empty());
        assert!(view.work_modes.is_empty());
        assert!(view.country_means.is_empty());
    }

    #[test]
    fn compute_is_pure() {
        let ds = example_dataset();
        let selection = FilterSelection::all_of(&ds);
        let a = compute(&ds, &selection, COUNTRY_CHART_ROLE);
        let b = compute(&ds, &selection, COUNTRY_CHART_ROLE);
        assert_eq!(a, b);
    }

    #[test]
    fn top_roles_truncates_to_ten_ascending() {
        // Twelve roles with strictly increasing means 1000, 2000, ... 12000.
        let records: Vec<SalaryRecord> = (1..=12)
            .map(|i| {
                rec(
                    2024,
                    "senior",
                    "integral",
                    "media",
                    &format!("Role {i:02}"),
                    i as f64 * 1000.0,
                    "remoto",
                    "USA",
                )
            })
            .collect();
        let ds = SalaryDataset::from_records(records);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        assert_eq!(view.top_roles.len(), TOP_ROLES);
        // Ascending, and the two lowest means are cut.
        assert_eq!(view.top_roles[0].mean_salary, 3000.0);
        assert_eq!(view.top_roles[9].mean_salary, 12_000.0);
        assert!(view
            .top_roles
            .windows(2)
            .all(|w| w[0].mean_salary <= w[1].mean_salary));
    }

    #[test]
    fn top_roles_means_are_per_group_arithmetic_means() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Scientist", 100_000.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 140_000.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Analyst", 80_000.0, "remoto", "USA"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        assert_eq!(view.top_roles.len(), 2);
        assert_eq!(view.top_roles[0].role, "Data Analyst");
        assert_eq!(view.top_roles[0].mean_salary, 80_000.0);
        assert_eq!(view.top_roles[1].role, "Data Scientist");
        assert_eq!(view.top_roles[1].mean_salary, 120_000.0);
    }

    #[test]
    fn histogram_spans_min_to_max_with_thirty_buckets() {
        let records: Vec<SalaryRecord> = (0..100)
            .map(|i| {
                rec(
                    2024,
                    "senior",
                    "integral",
                    "media",
                    "Data Scientist",
                    50_000.0 + i as f64 * 1000.0,
                    "remoto",
                    "USA",
                )
            })
            .collect();
        let ds = SalaryDataset::from_records(records);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        assert_eq!(view.histogram.len(), HISTOGRAM_BINS);
        assert_eq!(view.histogram[0].lower, 50_000.0);
        let last = view.histogram.last().unwrap();
        assert!((last.upper - 149_000.0).abs() < 1e-6);
        let total: usize = view.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn histogram_collapses_when_all_salaries_are_equal() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Scientist", 90_000.0, "remoto", "USA"),
            rec(2024, "junior", "integral", "media", "Data Analyst", 90_000.0, "remoto", "USA"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        assert_eq!(view.histogram.len(), 1);
        assert_eq!(view.histogram[0].count, 2);
        assert_eq!(view.histogram[0].lower, 90_000.0);
        assert_eq!(view.histogram[0].upper, 90_000.0);
    }

    #[test]
    fn work_modes_keep_first_encounter_order() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Scientist", 1.0, "hibrido", "USA"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 1.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 1.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 1.0, "presencial", "USA"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        let modes: Vec<&str> = view.work_modes.iter().map(|m| m.mode.as_str()).collect();
        assert_eq!(modes, vec!["hibrido", "remoto", "presencial"]);
        assert_eq!(view.work_modes[1].count, 2);
    }

    #[test]
    fn country_chart_only_contains_countries_with_the_restricted_role() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Scientist", 100_000.0, "remoto", "USA"),
            // Germany has records, but none for the restricted role.
            rec(2024, "senior", "integral", "media", "Data Engineer", 110_000.0, "remoto", "DEU"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        assert_eq!(view.country_means.len(), 1);
        assert_eq!(view.country_means[0].country, "USA");
    }

    #[test]
    fn country_chart_can_be_empty_while_the_view_is_not() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Engineer", 110_000.0, "remoto", "DEU"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        assert_eq!(view.kpis.record_count, 1);
        assert!(view.country_means.is_empty());
    }

    #[test]
    fn most_frequent_role_tie_breaks_on_first_appearance() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Engineer", 1.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 1.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 1.0, "remoto", "USA"),
            rec(2024, "senior", "integral", "media", "Data Engineer", 1.0, "remoto", "USA"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), COUNTRY_CHART_ROLE);

        // Both roles occur twice; "Data Engineer" appears first.
        assert_eq!(view.kpis.top_role, "Data Engineer");
    }

    #[test]
    fn configurable_country_role_is_honoured() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "senior", "integral", "media", "Data Engineer", 110_000.0, "remoto", "DEU"),
            rec(2024, "senior", "integral", "media", "Data Scientist", 100_000.0, "remoto", "USA"),
        ]);
        let view = compute(&ds, &FilterSelection::all_of(&ds), "Data Engineer");

        assert_eq!(view.country_means.len(), 1);
        assert_eq!(view.country_means[0].country, "DEU");
        assert_eq!(view.country_means[0].mean_salary, 110_000.0);
    }
}
