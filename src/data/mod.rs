//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  validate schema, parse rows → LaunchDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ LaunchDataset  │  Vec<LaunchRecord>, sites, payload bounds
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  query    │  SiteFilter + PayloadRange → OutcomeSummary / PayloadScatter
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod query;

pub use filter::{PayloadRange, SiteFilter, ALL_SITES};
pub use loader::load_file;
pub use model::{LaunchDataset, LaunchRecord, Outcome, PayloadBounds};
pub use query::{outcome_counts, payload_scatter, OutcomeSummary, PayloadScatter, ScatterPoint};
