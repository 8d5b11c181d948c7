//! Data layer: core types, loading, filtering, and aggregation.
//!
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SalaryDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ SalaryDataset  │  Vec<SalaryRecord>, distinct-value index
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ pipeline  │  filter + aggregate → DashboardView
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
