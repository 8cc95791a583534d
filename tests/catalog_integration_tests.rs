//! Catalog Integration Tests
//!
//! Exercises the full pipeline over the shipped breed document: load and
//! validate, filter and sort the listing, drive a selection, and project
//! the comparison view.

use std::path::Path;

use approx::assert_relative_eq;
use breed_compare_rust::{
    endangered_breeds, project, query, sustainability_ranking, BreedFilters, Catalog,
    CompareSelection, ConservationBucket, MemoryStore, MetricKey, SortDirection, SortField,
    Species,
};

fn load_catalog() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/breed_info.json");
    Catalog::load(&path).expect("shipped catalog document loads")
}

#[test]
fn test_shipped_document_loads_and_validates() {
    let catalog = load_catalog();

    assert_eq!(catalog.len(), 24);
    assert_eq!(
        catalog
            .breeds()
            .iter()
            .filter(|b| b.species == Species::Cattle)
            .count(),
        15
    );
    assert_eq!(
        catalog
            .breeds()
            .iter()
            .filter(|b| b.species == Species::Buffalo)
            .count(),
        9
    );

    // Every shipped record has at least one native state.
    assert!(catalog.breeds().iter().all(|b| !b.native_state.is_empty()));

    // Spot-check the id index across species.
    assert_eq!(catalog.breed("gir").unwrap().name, "Gir");
    assert_eq!(catalog.breed("murrah").unwrap().species, Species::Buffalo);
    assert!(catalog.breed("doesNotExist").is_none());
}

#[test]
fn test_state_index_over_shipped_document() {
    let catalog = load_catalog();

    let gujarat = catalog.breeds_in_state("Gujarat");
    let ids: Vec<&str> = gujarat.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(
        ids,
        ["gir", "tharparkar", "kankrej", "mehsana", "jaffarabadi", "surti"]
    );

    // Unindexed states behave like empty lists.
    assert!(catalog.breeds_in_state("Sikkim").is_empty());

    // The state listing is sorted by name.
    let states = catalog.states();
    assert_eq!(states.len(), 12);
    assert!(states.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[test]
fn test_listing_filters_over_shipped_document() {
    let catalog = load_catalog();

    let cattle = query(
        &catalog,
        &BreedFilters {
            species: Some(Species::Cattle),
            ..Default::default()
        },
    );
    assert_eq!(cattle.len(), 15);
    assert!(cattle.iter().any(|b| b.id == "gir"));
    assert!(cattle.iter().all(|b| b.id != "murrah"));

    // Search by state name reaches breeds through nativeState.
    let punjab = query(
        &catalog,
        &BreedFilters {
            search: Some("punjab".to_string()),
            ..Default::default()
        },
    );
    assert!(punjab.iter().any(|b| b.id == "sahiwal"));
    assert!(punjab.iter().any(|b| b.id == "murrah"));

    let critical = query(
        &catalog,
        &BreedFilters {
            conservation: Some(ConservationBucket::Critical),
            ..Default::default()
        },
    );
    assert!(critical.iter().all(|b| {
        b.population
            .conservation_status
            .as_deref()
            .unwrap()
            .to_lowercase()
            .contains("critical")
    }));
}

#[test]
fn test_ranking_over_shipped_document() {
    let catalog = load_catalog();

    let top = sustainability_ranking(&catalog, None, 3);
    let ids: Vec<&str> = top.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["punganur", "vechur", "tharparkar"]);

    let buffalo_only = sustainability_ranking(&catalog, Some(Species::Buffalo), 100);
    assert_eq!(buffalo_only.len(), 9);
    assert!(buffalo_only
        .windows(2)
        .all(|w| w[0].sustainability.carbon_score >= w[1].sustainability.carbon_score));
}

#[test]
fn test_endangered_listing_over_shipped_document() {
    let catalog = load_catalog();

    let at_risk = endangered_breeds(&catalog);
    assert_eq!(at_risk.len(), 15);
    assert!(at_risk.iter().any(|b| b.id == "vechur"));
    assert!(at_risk.iter().all(|b| b.id != "gir"));
}

#[test]
fn test_selection_to_projection_flow() {
    let catalog = load_catalog();

    // Pick the two breeds from the listing the way the UI does.
    let mut selection = CompareSelection::load(MemoryStore::default());
    assert!(selection.toggle("gir"));
    assert!(selection.toggle("murrah"));

    let view = project(&catalog, selection.ids());
    assert_eq!(view.breeds.len(), 2);

    // Gir wins on carbon (85 vs 65), Murrah on milk (13 vs 9 l/day).
    assert_eq!(view.winners.for_metric(MetricKey::CarbonScore), ["gir"]);
    assert_eq!(view.winners.for_metric(MetricKey::MilkYield), ["murrah"]);

    assert_eq!(view.milk_series.len(), 2);
    assert_eq!(view.milk_series[0].name, "Gir");
    assert_relative_eq!(view.milk_series[0].milk_yield, 9.0);
    assert_eq!(view.milk_series[1].name, "Murrah");
    assert_relative_eq!(view.milk_series[1].milk_yield, 13.0);

    assert_eq!(view.radar_series.len(), 4);

    // A stale id that no longer resolves is dropped, not an error.
    selection.add("withdrawnBreed");
    let view = project(&catalog, selection.ids());
    assert_eq!(view.breeds.len(), 2);
}

#[test]
fn test_sorted_listing_is_a_new_view() {
    let catalog = load_catalog();

    let by_price = query(
        &catalog,
        &BreedFilters {
            sort: SortField::Price,
            direction: SortDirection::Ascending,
            ..Default::default()
        },
    );
    assert_eq!(by_price.len(), catalog.len());

    // Sorting produced an ordered view without touching catalog order.
    assert_eq!(catalog.breeds()[0].id, "amritmahal");
}

#[test]
fn test_scheme_resolution_over_shipped_document() {
    let catalog = load_catalog();
    assert_eq!(catalog.schemes().len(), 4);

    let gir = catalog.breed("gir").unwrap();
    let schemes = catalog.schemes_for_breed(gir);
    let ids: Vec<&str> = schemes.iter().map(|s| s.id.as_str()).collect();
    // Gir references two schemes; both resolve by name.
    assert_eq!(ids, ["rgm", "npbb"]);
}
