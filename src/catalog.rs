//! Breed Catalog Loading and Lookup
//!
//! Holds the full set of indigenous cattle and buffalo breed records, the
//! state-to-breeds index, and the government scheme list. The catalog is
//! loaded once from a JSON document and treated as immutable for the
//! process lifetime.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Animal species tag. Kept as a closed enum so a typo in a filter or a
/// record can never silently create a third species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cattle,
    Buffalo,
}

impl Species {
    pub fn label(&self) -> &'static str {
        match self {
            Species::Cattle => "cattle",
            Species::Buffalo => "buffalo",
        }
    }

    /// Lenient parse for UI/query-param input. Anything unrecognized is
    /// `None`, which filter code treats as "all species".
    pub fn parse(value: &str) -> Option<Species> {
        match value.to_lowercase().as_str() {
            "cattle" => Some(Species::Cattle),
            "buffalo" => Some(Species::Buffalo),
            _ => None,
        }
    }
}

// ============================================================================
// Record attribute groups
// ============================================================================
//
// Leaf values are human-authored strings ("6-12 liters", "Very High") and
// individual fields may be absent, so every field is optional. Numeric
// derivation from the range/tier strings lives in `crate::metrics`.

/// Physical traits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Characteristics {
    pub body_color: Option<String>,
    pub horn_shape: Option<String>,
    pub ear_type: Option<String>,
    pub body_size: Option<String>,
    pub body_type: Option<String>,
    pub hump_size: Option<String>,
    pub dewlap: Option<String>,
}

/// Milk production figures, as free-text ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Productivity {
    pub milk_yield_per_day: Option<String>,
    pub lactation_yield: Option<String>,
    pub fat_content: Option<String>,
    pub lactation_period: Option<String>,
    pub age_at_first_calving: Option<String>,
    pub calving_interval: Option<String>,
}

/// Climate and resource resilience. `carbon_score` is the one numeric
/// field in the source document; the rest are qualitative tiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sustainability {
    pub carbon_score: Option<f64>,
    pub carbon_footprint: Option<String>,
    pub heat_tolerance: Option<String>,
    pub disease_resistance: Option<String>,
    pub feed_efficiency: Option<String>,
    pub climate_adaptability: Option<String>,
}

/// Market figures, as free-text ranges and tiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EconomicValue {
    pub purchase_cost: Option<String>,
    pub maintenance_cost: Option<String>,
    pub market_demand: Option<String>,
}

/// Population trend and conservation status. The status string is bucketed
/// by `crate::classify::classify_conservation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Population {
    pub status: Option<String>,
    pub trend: Option<String>,
    pub conservation_status: Option<String>,
}

/// One catalog entry describing a cattle or buffalo breed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_hindi: String,
    #[serde(rename = "type")]
    pub species: Species,
    #[serde(default)]
    pub native_state: Vec<String>,
    #[serde(default)]
    pub native_region: Option<String>,
    #[serde(default)]
    pub characteristics: Characteristics,
    #[serde(default)]
    pub productivity: Productivity,
    #[serde(default)]
    pub sustainability: Sustainability,
    #[serde(default)]
    pub economic_value: EconomicValue,
    #[serde(default)]
    pub population: Population,
    #[serde(default)]
    pub best_for: Vec<String>,
    #[serde(default)]
    pub government_schemes: Vec<String>,
    #[serde(default)]
    pub fun_fact: Option<String>,
}

/// A government support scheme. Breed records reference schemes by name
/// (weak reference), not by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_hindi: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub website: String,
}

// ============================================================================
// Catalog document and validation
// ============================================================================

/// Violations of the catalog document's structural invariants.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("breed id '{0}' appears in both the cattle and buffalo maps")]
    DuplicateId(String),

    #[error("record under key '{key}' declares id '{id}'")]
    IdMismatch { key: String, id: String },

    #[error("state '{state}' references unknown breed id '{id}'")]
    UnknownStateBreed { state: String, id: String },

    #[error("failed to parse catalog document")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of the catalog document. BTreeMaps keep record order
/// deterministic (id-sorted within each species).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    cattle: BTreeMap<String, BreedRecord>,
    #[serde(default)]
    buffalo: BTreeMap<String, BreedRecord>,
    #[serde(default)]
    state_to_breeds: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    government_schemes: Vec<Scheme>,
}

/// Immutable breed catalog: all records, an O(1) id index, the
/// state-to-breeds index, and the scheme list.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<BreedRecord>,
    by_id: FxHashMap<String, usize>,
    state_index: FxHashMap<String, Vec<String>>,
    schemes: Vec<Scheme>,
}

impl Catalog {
    /// Load and validate the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let catalog = Self::from_json(&contents)
            .with_context(|| format!("Invalid catalog document: {:?}", path))?;

        tracing::info!(
            "Loaded breed catalog: {} breeds, {} states, {} schemes",
            catalog.records.len(),
            catalog.state_index.len(),
            catalog.schemes.len()
        );

        Ok(catalog)
    }

    /// Parse and validate a catalog document from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(text)?;

        let mut records = Vec::with_capacity(doc.cattle.len() + doc.buffalo.len());
        let mut by_id = FxHashMap::default();

        for (key, record) in doc.cattle.into_iter().chain(doc.buffalo) {
            if record.id != key {
                return Err(CatalogError::IdMismatch { key, id: record.id });
            }
            if by_id.insert(record.id.clone(), records.len()).is_some() {
                return Err(CatalogError::DuplicateId(record.id));
            }
            records.push(record);
        }

        // Every id the state index references must resolve.
        let mut state_index = FxHashMap::default();
        for (state, ids) in doc.state_to_breeds {
            if let Some(unknown) = ids.iter().find(|id| !by_id.contains_key(*id)) {
                return Err(CatalogError::UnknownStateBreed {
                    id: unknown.clone(),
                    state,
                });
            }
            state_index.insert(state, ids);
        }

        Ok(Catalog {
            records,
            by_id,
            state_index,
            schemes: doc.government_schemes,
        })
    }

    /// All breed records, cattle first, id-sorted within species.
    pub fn breeds(&self) -> &[BreedRecord] {
        &self.records
    }

    /// O(1) lookup by id across both species.
    pub fn breed(&self, id: &str) -> Option<&BreedRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Breeds native to `state`, in index order. A state missing from the
    /// index behaves exactly like one indexed with an empty list.
    pub fn breeds_in_state(&self, state: &str) -> Vec<&BreedRecord> {
        self.state_index
            .get(state)
            .map(|ids| ids.iter().filter_map(|id| self.breed(id)).collect())
            .unwrap_or_default()
    }

    /// Every indexed state with its breed ids, sorted by state name.
    pub fn states(&self) -> Vec<(&str, &[String])> {
        let mut states: Vec<(&str, &[String])> = self
            .state_index
            .iter()
            .map(|(state, ids)| (state.as_str(), ids.as_slice()))
            .collect();
        states.sort_by(|a, b| a.0.cmp(b.0));
        states
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Resolve a record's scheme name references against the scheme list.
    /// Names that match no scheme are skipped.
    pub fn schemes_for_breed(&self, record: &BreedRecord) -> Vec<&Scheme> {
        record
            .government_schemes
            .iter()
            .filter_map(|name| self.schemes.iter().find(|s| &s.name == name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(id: &str, species: &str) -> String {
        format!(
            r#"{{"id": "{id}", "name": "{id}", "type": "{species}", "nativeState": ["Gujarat"]}}"#
        )
    }

    #[test]
    fn test_load_minimal_document() {
        let json = format!(
            r#"{{"cattle": {{"gir": {}}}, "buffalo": {{"murrah": {}}}}}"#,
            record_json("gir", "cattle"),
            record_json("murrah", "buffalo")
        );

        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.breed("gir").unwrap().species, Species::Cattle);
        assert_eq!(catalog.breed("murrah").unwrap().species, Species::Buffalo);
        assert!(catalog.breed("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_across_species_rejected() {
        let json = format!(
            r#"{{"cattle": {{"gir": {}}}, "buffalo": {{"gir": {}}}}}"#,
            record_json("gir", "cattle"),
            record_json("gir", "buffalo")
        );

        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "gir"));
    }

    #[test]
    fn test_key_id_mismatch_rejected() {
        let json = format!(
            r#"{{"cattle": {{"sahiwal": {}}}}}"#,
            record_json("gir", "cattle")
        );

        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::IdMismatch { .. }));
    }

    #[test]
    fn test_state_index_must_resolve() {
        let json = format!(
            r#"{{"cattle": {{"gir": {}}}, "stateToBreeds": {{"Gujarat": ["gir", "ghost"]}}}}"#,
            record_json("gir", "cattle")
        );

        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownStateBreed { state, id } if state == "Gujarat" && id == "ghost"
        ));
    }

    #[test]
    fn test_missing_state_is_empty() {
        let json = format!(
            r#"{{"cattle": {{"gir": {}}}, "stateToBreeds": {{"Gujarat": ["gir"]}}}}"#,
            record_json("gir", "cattle")
        );

        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.breeds_in_state("Gujarat").len(), 1);
        assert!(catalog.breeds_in_state("Kerala").is_empty());
    }

    #[test]
    fn test_schemes_for_breed_skips_unresolvable_names() {
        let json = r#"{
            "cattle": {
                "gir": {
                    "id": "gir", "name": "Gir", "type": "cattle",
                    "governmentSchemes": ["Rashtriya Gokul Mission", "No Such Scheme"]
                }
            },
            "governmentSchemes": [
                {"id": "rgm", "name": "Rashtriya Gokul Mission"}
            ]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        let gir = catalog.breed("gir").unwrap();
        let schemes = catalog.schemes_for_breed(gir);
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].id, "rgm");
    }

    #[test]
    fn test_species_parse_is_lenient() {
        assert_eq!(Species::parse("Cattle"), Some(Species::Cattle));
        assert_eq!(Species::parse("BUFFALO"), Some(Species::Buffalo));
        assert_eq!(Species::parse("goat"), None);
        assert_eq!(Species::parse(""), None);
    }
}
