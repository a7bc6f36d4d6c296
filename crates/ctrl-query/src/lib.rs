//! # ctrl-query
//!
//! Read-only query engine over a frozen snapshot of audit records.
//!
//! Coordinates between:
//! - Dataset loading and load-time validation (`loader`)
//! - Stable, case-insensitive search with classification/category filters
//! - Aggregate statistics (classification, category, trigger frequency)
//! - Canonical-order navigation between records
//! - A [`Catalog`] of independent snapshots (one per market)
//!
//! Lookup misses are `None` and empty searches are empty vectors; the only
//! fallible step is loading.

pub mod aggregate;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;

pub use aggregate::{CategoryStats, ClassificationCounts, Summary, TriggerCount};
pub use catalog::Catalog;
pub use engine::{Navigation, QueryEngine};
pub use error::LoadError;
pub use filter::{Filter, SearchFilters};
pub use loader::DatasetLoader;
