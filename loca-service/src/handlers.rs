//! HTTP request handlers for the trip service.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Response,
    Json,
};
use loca::{BoundingBoxQuery, LocaError, TripId, AREA_PARAMS};
use serde::Serialize;
use std::sync::Arc;

use crate::encoder::respond;
use crate::AppState;

/// Raw query-string pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Read the bounding box parameters from the query string.
fn area_from_query(
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> loca::Result<BoundingBoxQuery> {
    match query {
        Ok(Query(pairs)) => BoundingBoxQuery::from_pairs(&pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Query string rejected");
            Err(LocaError::InvalidParameter {
                name: AREA_PARAMS[0].to_string(),
                required: AREA_PARAMS,
            })
        }
    }
}

/// List all trips, most recent first.
#[utoipa::path(
    get,
    path = "/trips",
    tag = "trips",
    responses(
        (status = 200, description = "All trips, most recent first", body = loca::Trips),
        (status = 500, description = "Database query error", body = String, content_type = "text/plain")
    )
)]
pub async fn list_trips(State(state): State<Arc<AppState>>) -> Response {
    let result = state.store.trips().await;
    if let Ok(trips) = &result {
        tracing::info!(trips = trips.trips.len(), "Trips listed");
    }
    respond(result)
}

/// Get a single trip.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}",
    tag = "trips",
    params(("trip_id" = i32, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "The trip", body = loca::Trip),
        (status = 400, description = "Trip identifier is not an integer", body = String, content_type = "text/plain"),
        (status = 404, description = "No such trip", body = String, content_type = "text/plain"),
        (status = 500, description = "Database query error", body = String, content_type = "text/plain")
    )
)]
pub async fn trip_info(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Response {
    respond(load_trip(&state, &trip_id).await)
}

async fn load_trip(state: &AppState, trip_id: &str) -> loca::Result<loca::Trip> {
    let trip_id: TripId = trip_id.parse()?;
    tracing::debug!(trip_id = %trip_id, "Trip query");

    state.store.trip(trip_id).await?.ok_or(LocaError::NotFound)
}

/// Get the points of a trip inside an area.
///
/// # Query Parameters
///
/// - `lat0`, `lat1`: Latitude bounds (exclusive)
/// - `lon0`, `lon1`: Longitude bounds (exclusive)
/// - `mPerPix`: Map resolution in meters per pixel
///
/// # Returns
///
/// - `200 OK` with `{"trip_id": N, "trip_points": [...]}`
/// - `400 Bad Request` if a parameter is missing or the trip id is not an integer
/// - `500 Internal Server Error` if the query fails
#[utoipa::path(
    get,
    path = "/trip/{trip_id}/points",
    tag = "trips",
    params(
        ("trip_id" = i32, Path, description = "Trip identifier"),
        ("lat0" = f64, Query, description = "First latitude bound"),
        ("lat1" = f64, Query, description = "Second latitude bound"),
        ("lon0" = f64, Query, description = "First longitude bound"),
        ("lon1" = f64, Query, description = "Second longitude bound"),
        ("mPerPix" = f64, Query, description = "Map resolution in meters per pixel")
    ),
    responses(
        (status = 200, description = "Trip points inside the area", body = loca::TripPoints),
        (status = 400, description = "Missing or invalid parameters", body = String, content_type = "text/plain"),
        (status = 500, description = "Database query error", body = String, content_type = "text/plain")
    )
)]
#[axum::debug_handler]
pub async fn trip_points(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Response {
    respond(load_trip_points(&state, &trip_id, query).await)
}

async fn load_trip_points(
    state: &AppState,
    trip_id: &str,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> loca::Result<loca::TripPoints> {
    let area = area_from_query(query)?;
    let trip_id: TripId = trip_id.parse()?;

    tracing::debug!(
        trip_id = %trip_id,
        lat0 = area.lat0,
        lat1 = area.lat1,
        lon0 = area.lon0,
        lon1 = area.lon1,
        m_per_pix = area.m_per_pix,
        "Trip points query"
    );

    let points = state.store.trip_points(trip_id, &area).await?;
    tracing::info!(
        trip_id = %trip_id,
        points = points.trip_points.len(),
        "Trip points found"
    );
    Ok(points)
}

/// Get depth soundings of all trips inside an area.
#[utoipa::path(
    get,
    path = "/depth_data",
    tag = "depths",
    params(
        ("lat0" = f64, Query, description = "First latitude bound"),
        ("lat1" = f64, Query, description = "Second latitude bound"),
        ("lon0" = f64, Query, description = "First longitude bound"),
        ("lon1" = f64, Query, description = "Second longitude bound"),
        ("mPerPix" = f64, Query, description = "Map resolution in meters per pixel")
    ),
    responses(
        (status = 200, description = "Depth soundings inside the area", body = loca::Depths),
        (status = 400, description = "Missing or invalid parameters", body = String, content_type = "text/plain"),
        (status = 500, description = "Database query error", body = String, content_type = "text/plain")
    )
)]
pub async fn depth_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Response {
    respond(load_depths(&state, query).await)
}

async fn load_depths(
    state: &AppState,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> loca::Result<loca::Depths> {
    let area = area_from_query(query)?;

    tracing::debug!(
        lat0 = area.lat0,
        lat1 = area.lat1,
        lon0 = area.lon0,
        lon1 = area.lon1,
        m_per_pix = area.m_per_pix,
        "Depth query"
    );

    let depths = state.store.depths(&area).await?;
    tracing::info!(depths = depths.depths.len(), "Depths found");
    Ok(depths)
}

/// Health check endpoint.
///
/// Returns service status and version.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
