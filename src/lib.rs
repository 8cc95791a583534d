//! Indigenous Breed Catalog and Comparison Engine
//!
//! Core logic behind the breed explorer UI: an immutable catalog of
//! cattle and buffalo breed records, numeric derivation from the
//! catalog's free-text range and tier fields, a bounded persisted
//! comparison selection, a filter/sort engine for the listing view, and
//! the comparison projector feeding the radar and milk charts.
//!
//! - `catalog`: record types, JSON loading, id/state/scheme lookup
//! - `metrics`: range extraction and tier scoring
//! - `classify`: conservation status buckets
//! - `selection`: the persisted compare basket (max 4 ids)
//! - `query`: filtering, sorting, rankings
//! - `compare`: the comparison view projection
//!
//! The optional `api` feature adds an Axum read API over the same
//! catalog.

pub mod catalog;
pub mod classify;
pub mod compare;
pub mod metrics;
pub mod query;
pub mod selection;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{BreedRecord, Catalog, CatalogError, Scheme, Species};
pub use classify::{classify_conservation, conservation_bucket, ConservationBucket};
pub use compare::{pairwise_insight, project, ComparisonView, MetricWinners, PairwiseInsight};
pub use metrics::{
    derived_value, extract_range_numeric, sustainability_score, tier_score, MetricKey,
    SustainabilityAxis, TIER_SCORES,
};
pub use query::{
    endangered_breeds, query, sustainability_ranking, BreedFilters, SortDirection, SortField,
};
pub use selection::{CompareSelection, MemoryStore, SelectionStore, MAX_COMPARE, STORAGE_KEY};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
