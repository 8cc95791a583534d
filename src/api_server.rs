// Axum read API over the breed catalog.
//
// Mirrors the endpoints the explorer frontend consumes: breed listing
// with filters and sort, breed detail, state and scheme listings, the
// comparison projection, and the sustainability ranking. The catalog is
// loaded once at startup and shared immutably; every handler is a pure
// read.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{BreedRecord, Catalog, Species};
use crate::classify::{conservation_bucket, ConservationBucket};
use crate::compare::{pairwise_insight, project};
use crate::metrics::{derived_value, MetricKey};
use crate::query::{query, sustainability_ranking, BreedFilters, SortDirection, SortField};
use crate::selection::MAX_COMPARE;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        AppState {
            catalog: Arc::new(catalog),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Breed endpoints
        .route("/api/breeds", get(list_breeds))
        .route("/api/breeds/state/:state_name", get(breeds_by_state))
        .route("/api/breeds/:id", get(get_breed))
        // Catalog metadata
        .route("/api/states", get(list_states))
        .route("/api/schemes", get(list_schemes))
        // Comparison and ranking
        .route("/api/compare", get(compare_breeds))
        .route("/api/ranking", get(ranking))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Query parameters for the breed listing. All optional and leniently
/// parsed: unrecognized values behave like the filter being absent.
#[derive(Debug, Default, Deserialize)]
struct BreedListParams {
    search: Option<String>,
    animal_type: Option<String>,
    state: Option<String>,
    conservation: Option<String>,
    sort: Option<String>,
    direction: Option<String>,
}

impl BreedListParams {
    fn into_filters(self) -> BreedFilters {
        BreedFilters {
            search: self.search,
            species: self.animal_type.as_deref().and_then(Species::parse),
            state: self.state,
            conservation: self
                .conservation
                .as_deref()
                .and_then(ConservationBucket::parse),
            sort: self
                .sort
                .as_deref()
                .and_then(SortField::parse)
                .unwrap_or_default(),
            direction: self
                .direction
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default(),
        }
    }
}

async fn list_breeds(
    State(state): State<AppState>,
    Query(params): Query<BreedListParams>,
) -> impl IntoResponse {
    let filters = params.into_filters();
    let results = query(&state.catalog, &filters);

    Json(serde_json::json!({
        "total": results.len(),
        "breeds": results.iter().map(|b| breed_summary(b)).collect::<Vec<_>>(),
    }))
}

async fn get_breed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let breed = state
        .catalog
        .breed(&id)
        .ok_or_else(|| AppError::NotFound(format!("Breed '{}' not found", id)))?;

    Ok(Json(serde_json::json!({
        "id": breed.id,
        "animalType": breed.species.label(),
        "data": breed,
        "schemes": state.catalog.schemes_for_breed(breed),
    })))
}

async fn breeds_by_state(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let states = state.catalog.states();
    let needle = state_name.to_lowercase();

    // Exact match first, then partial.
    let matched = states
        .iter()
        .map(|(name, _)| *name)
        .find(|name| name.to_lowercase() == needle)
        .or_else(|| {
            states
                .iter()
                .map(|(name, _)| *name)
                .find(|name| name.to_lowercase().contains(&needle))
        })
        .ok_or_else(|| {
            let available: Vec<&str> = states.iter().map(|(name, _)| *name).collect();
            AppError::NotFound(format!(
                "State '{}' not found. Available states: {:?}",
                state_name, available
            ))
        })?;

    let breeds = state.catalog.breeds_in_state(matched);

    Ok(Json(serde_json::json!({
        "state": matched,
        "total": breeds.len(),
        "breeds": breeds.iter().map(|b| breed_summary(b)).collect::<Vec<_>>(),
    })))
}

async fn list_states(State(state): State<AppState>) -> impl IntoResponse {
    let states: Vec<serde_json::Value> = state
        .catalog
        .states()
        .iter()
        .map(|(name, ids)| {
            serde_json::json!({
                "state": name,
                "breedCount": ids.len(),
                "breedIds": ids,
            })
        })
        .collect();

    Json(serde_json::json!({
        "total": states.len(),
        "states": states,
    }))
}

async fn list_schemes(State(state): State<AppState>) -> impl IntoResponse {
    let schemes = state.catalog.schemes();
    Json(serde_json::json!({
        "total": schemes.len(),
        "schemes": schemes,
    }))
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    /// Comma-separated breed ids, e.g. `gir,murrah`.
    ids: String,
}

async fn compare_breeds(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ids: Vec<String> = params
        .ids
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if ids.len() < 2 {
        return Err(AppError::BadRequest(
            "At least 2 breeds required for comparison".to_string(),
        ));
    }
    if ids.len() > MAX_COMPARE {
        return Err(AppError::BadRequest(format!(
            "Maximum {} breeds allowed for comparison",
            MAX_COMPARE
        )));
    }

    let view = project(&state.catalog, &ids);

    // The two-breed insight only applies when exactly two resolved.
    let insight = match view.breeds.as_slice() {
        [first, second] => Some(pairwise_insight(first, second)),
        _ => None,
    };

    let mut body = serde_json::to_value(&view).map_err(internal)?;
    body["requested"] = serde_json::json!(ids.len());
    body["resolved"] = serde_json::json!(view.breeds.len());
    if let Some(insight) = insight {
        body["insight"] = serde_json::to_value(insight).map_err(internal)?;
    }

    Ok(Json(body))
}

#[derive(Debug, Default, Deserialize)]
struct RankingParams {
    animal_type: Option<String>,
    limit: Option<usize>,
}

async fn ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> impl IntoResponse {
    let species = params.animal_type.as_deref().and_then(Species::parse);
    let limit = params.limit.unwrap_or(10);
    let ranked = sustainability_ranking(&state.catalog, species, limit);

    let rows: Vec<serde_json::Value> = ranked
        .iter()
        .map(|b| {
            serde_json::json!({
                "id": b.id,
                "name": b.name,
                "type": b.species.label(),
                "carbonScore": derived_value(b, MetricKey::CarbonScore),
                "carbonFootprint": b.sustainability.carbon_footprint,
                "feedEfficiency": b.sustainability.feed_efficiency,
            })
        })
        .collect();

    Json(serde_json::json!({
        "ranking": rows,
        "total": rows.len(),
    }))
}

/// Listing projection: the fields the explorer cards render.
fn breed_summary(breed: &BreedRecord) -> serde_json::Value {
    serde_json::json!({
        "id": breed.id,
        "name": breed.name,
        "nameHindi": breed.name_hindi,
        "type": breed.species.label(),
        "nativeStates": breed.native_state,
        "milkYield": breed.productivity.milk_yield_per_day,
        "conservationStatus": breed.population.conservation_status,
        "conservationBucket": conservation_bucket(breed).label(),
        "carbonScore": derived_value(breed, MetricKey::CarbonScore),
    })
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

fn internal(err: impl std::fmt::Display) -> AppError {
    AppError::Internal(err.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
