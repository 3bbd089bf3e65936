//! Data layer: core types, loading, filtering, and aggregation.
//!
//! ```text
//!  winequality-red.csv   winequality-white.csv
//!            │                     │
//!            └──────────┬──────────┘
//!                       ▼
//!                 ┌──────────┐
//!                 │  loader   │  parse + tag provenance
//!                 └──────────┘
//!                       │
//!                       ▼
//!                 ┌─────────────┐
//!                 │ WineDataset │  immutable: red rows, then white rows
//!                 └─────────────┘
//!                       │
//!                       ▼
//!                 ┌──────────┐
//!                 │  filter   │  type set + quality range → indices
//!                 └──────────┘
//!                       │
//!                       ▼
//!                 ┌───────────┐
//!                 │ aggregate │  means, medians, grouped means, Pearson
//!                 └───────────┘
//! ```
//!
//! The dataset is loaded once at startup and never mutated; every stage
//! below it is a pure function of the dataset plus the current criteria.

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
