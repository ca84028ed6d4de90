//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::dto::{
    reference_time, HealthResponse, HouseListQuery, HouseListResponse, HouseSummary,
    ReferenceQuery, RoutePreviewRequest, RoutePreviewResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{House, RouteFilters};
use crate::services::{
    filter_houses, retain_favorites, retain_within_radius, MapViewConfig, RoutePlanner,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DEFAULT_ROUTE_NAME: &str = "My Halloween route";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.repository.health_check().await {
        Ok(true) => "ok".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Houses
// =============================================================================

/// GET /v1/houses
///
/// Directory listing narrowed by the query's filters, with open state
/// evaluated at `at` (or now).
pub async fn list_houses(
    State(state): State<AppState>,
    Query(query): Query<HouseListQuery>,
) -> HandlerResult<HouseListResponse> {
    let filters = query.filters().map_err(AppError::BadRequest)?;
    let origin = query.origin().map_err(AppError::BadRequest)?;
    let reference =
        reference_time(query.at.as_deref(), state.venue_offset).map_err(AppError::BadRequest)?;

    let houses = state.repository.list_houses().await?;
    let mut matched = filter_houses(&houses, &filters, reference);

    if filters.only_favorites {
        retain_favorites(&mut matched, &query.favorite_ids());
    }
    if let Some(radius_km) = filters.radius_km {
        let origin = origin.ok_or_else(|| {
            AppError::BadRequest("radiusKm requires lat and lng".to_string())
        })?;
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(AppError::BadRequest(format!(
                "radiusKm must be a non-negative number, got {}",
                radius_km
            )));
        }
        retain_within_radius(&mut matched, origin, radius_km);
    }

    let houses: Vec<HouseSummary> = matched
        .into_iter()
        .map(|house| HouseSummary::at(house, reference))
        .collect();
    let total = houses.len();

    Ok(Json(HouseListResponse {
        houses,
        total,
        reference,
    }))
}

/// GET /v1/houses/{id}
pub async fn get_house(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReferenceQuery>,
) -> HandlerResult<HouseSummary> {
    let reference =
        reference_time(query.at.as_deref(), state.venue_offset).map_err(AppError::BadRequest)?;
    let house = state.repository.get_house(&id).await?;
    Ok(Json(HouseSummary::at(house, reference)))
}

// =============================================================================
// Routes
// =============================================================================

/// POST /v1/routes/preview
///
/// Resolve the requested ids into an ordered plan. Unknown ids are reported
/// in `skipped` and left out of the plan.
pub async fn preview_route(
    State(state): State<AppState>,
    Json(request): Json<RoutePreviewRequest>,
) -> HandlerResult<RoutePreviewResponse> {
    let reference = reference_time(None, state.venue_offset).map_err(AppError::BadRequest)?;
    let houses = state.repository.list_houses().await?;

    let mut planner = RoutePlanner::from_ids(request.house_ids);
    let skipped: Vec<String> = planner
        .house_ids()
        .iter()
        .filter(|id| !houses.iter().any(|house| &house.id == *id))
        .cloned()
        .collect();
    for id in &skipped {
        planner.remove_stop(id);
    }

    let stops: Vec<HouseSummary> = planner
        .resolve(&houses)
        .into_iter()
        .cloned()
        .map(|house| HouseSummary::at(house, reference))
        .collect();

    let name = request
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_ROUTE_NAME.to_string());
    let plan = planner.into_plan(name, RouteFilters::default());

    Ok(Json(RoutePreviewResponse {
        plan,
        stops,
        skipped,
    }))
}

// =============================================================================
// Map
// =============================================================================

/// GET /v1/map/config
///
/// Widget token (or why there is none) and a viewport fitted to the active
/// houses.
pub async fn map_config(State(state): State<AppState>) -> HandlerResult<MapViewConfig> {
    let houses: Vec<House> = state
        .repository
        .list_houses()
        .await?
        .into_iter()
        .filter(House::is_active)
        .collect();
    Ok(Json(MapViewConfig::build(state.map_settings(), &houses)))
}

/// GET /api/map-usage
/// GET /v1/map/availability
///
/// Cached quota decision. Always 200; the decision itself says whether the
/// live map may be shown.
pub async fn map_availability(State(state): State<AppState>) -> impl IntoResponse {
    let decision = state.availability.get().await;
    let cache_control = format!("private, max-age={}", decision.max_age.as_secs());
    (
        [(header::CACHE_CONTROL, cache_control)],
        Json(decision.availability),
    )
}
