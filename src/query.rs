//! Breed Filtering, Sorting, and Ranking
//!
//! Produces the ordered, filtered views the listing UI renders. All
//! operations are pure reads over the catalog; unknown filter or sort
//! tokens fall back to pass-through defaults because this is
//! user-controlled UI state that must never fail a render.

use std::cmp::Ordering;

use crate::catalog::{BreedRecord, Catalog, Species};
use crate::classify::{conservation_bucket, ConservationBucket};
use crate::metrics::{derived_value, MetricKey};

/// Sort key for breed listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    MilkYield,
    CarbonScore,
    Price,
}

impl SortField {
    /// Lenient parse for UI input; unrecognized tokens are `None` and
    /// callers fall back to the default (`Name`).
    pub fn parse(value: &str) -> Option<SortField> {
        match value.to_lowercase().as_str() {
            "name" => Some(SortField::Name),
            "milkyield" | "milk_yield" | "milk" => Some(SortField::MilkYield),
            "carbonscore" | "carbon_score" | "carbon" => Some(SortField::CarbonScore),
            "price" | "cost" => Some(SortField::Price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<SortDirection> {
        match value.to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Filter and sort specification for [`query`]. The default value
/// matches everything and sorts by name ascending.
#[derive(Debug, Clone, Default)]
pub struct BreedFilters {
    /// Case-insensitive substring over name, state names, and best-for
    /// tags; raw substring over the Hindi name. Any match qualifies.
    pub search: Option<String>,
    /// `None` means both species.
    pub species: Option<Species>,
    /// Exact membership test against `nativeState`; `None` passes all.
    pub state: Option<String>,
    /// Conservation bucket; `None` passes all.
    pub conservation: Option<ConservationBucket>,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl BreedFilters {
    /// Whether `record` passes every filter predicate (predicates
    /// compose with AND). Public so callers can compose filter stages
    /// and get the same semantics as a single combined query.
    pub fn matches(&self, record: &BreedRecord) -> bool {
        if let Some(species) = self.species {
            if record.species != species {
                return false;
            }
        }

        if let Some(state) = &self.state {
            if !record.native_state.iter().any(|s| s == state) {
                return false;
            }
        }

        if let Some(bucket) = self.conservation {
            if conservation_bucket(record) != bucket {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !matches_search(record, search) {
                return false;
            }
        }

        true
    }
}

/// Any-field substring search. Latin-script fields fold case; the Hindi
/// name is matched raw (no case folding for Devanagari).
fn matches_search(record: &BreedRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();

    record.name.to_lowercase().contains(&needle)
        || record.name_hindi.contains(search)
        || record
            .native_state
            .iter()
            .any(|state| state.to_lowercase().contains(&needle))
        || record
            .best_for
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Filter and sort the catalog into a new ordered view. The sort is
/// stable: records with equal derived values keep their catalog-relative
/// order, which matters because distinct breeds can share a carbon
/// score.
pub fn query<'a>(catalog: &'a Catalog, filters: &BreedFilters) -> Vec<&'a BreedRecord> {
    let mut results: Vec<&BreedRecord> = catalog
        .breeds()
        .iter()
        .filter(|record| filters.matches(record))
        .collect();

    sort_records(&mut results, filters.sort, filters.direction);
    results
}

fn sort_records(records: &mut [&BreedRecord], field: SortField, direction: SortDirection) {
    let metric = match field {
        SortField::Name => {
            records.sort_by(|a, b| order(a.name.cmp(&b.name), direction));
            return;
        }
        SortField::MilkYield => MetricKey::MilkYield,
        SortField::CarbonScore => MetricKey::CarbonScore,
        SortField::Price => MetricKey::Price,
    };

    records.sort_by(|a, b| {
        let ord = derived_value(a, metric)
            .partial_cmp(&derived_value(b, metric))
            .unwrap_or(Ordering::Equal);
        order(ord, direction)
    });
}

fn order(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

// ============================================================================
// Rankings
// ============================================================================

/// Breeds ordered by carbon score, best first, with an optional species
/// filter and result limit.
pub fn sustainability_ranking<'a>(
    catalog: &'a Catalog,
    species: Option<Species>,
    limit: usize,
) -> Vec<&'a BreedRecord> {
    let filters = BreedFilters {
        species,
        sort: SortField::CarbonScore,
        direction: SortDirection::Descending,
        ..Default::default()
    };
    let mut ranked = query(catalog, &filters);
    ranked.truncate(limit);
    ranked
}

/// Breeds whose conservation bucket marks them at risk (critical,
/// endangered, or vulnerable), in catalog order.
pub fn endangered_breeds(catalog: &Catalog) -> Vec<&BreedRecord> {
    catalog
        .breeds()
        .iter()
        .filter(|record| conservation_bucket(record).at_risk())
        .collect()
}
