//! Integration tests for the HTTP API.

use async_trait::async_trait;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::NaiveDate;
use loca::{
    BoundingBoxQuery, Depth, Depths, LocaError, Trip, TripId, TripPoint, TripPoints, TripSource,
    Trips,
};
use loca_service::{router, AppState, ServiceConfig};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const AREA_MESSAGE: &str = "Query parameters lat0, lat1, lon0, lon1, mPerPix are mandatory";

/// In-memory trip source that applies the same filters as the SQL templates.
#[derive(Default)]
struct MemoryStore {
    trips: Vec<Trip>,
    points: Vec<(i32, TripPoint)>,
    depths: Vec<Depth>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MemoryStore {
    fn record_call(&self) -> loca::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(LocaError::RowShape {
                record: "Trip",
                expected: &["t_id"],
                found: vec!["connection refused at 10.0.0.7".to_string()],
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TripSource for MemoryStore {
    async fn trips(&self) -> loca::Result<Trips> {
        self.record_call()?;
        let mut trips = self.trips.clone();
        trips.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        Ok(Trips { trips })
    }

    async fn trip(&self, trip_id: TripId) -> loca::Result<Option<Trip>> {
        self.record_call()?;
        Ok(self
            .trips
            .iter()
            .find(|trip| trip.id == trip_id.value())
            .cloned())
    }

    async fn trip_points(
        &self,
        trip_id: TripId,
        area: &BoundingBoxQuery,
    ) -> loca::Result<TripPoints> {
        self.record_call()?;
        let trip_points = self
            .points
            .iter()
            .filter(|(t_id, point)| {
                *t_id == trip_id.value() && area.contains(point.lat, point.lon)
            })
            .map(|(_, point)| point.clone())
            .collect();
        Ok(TripPoints {
            trip_id: trip_id.value(),
            trip_points,
        })
    }

    async fn depths(&self, area: &BoundingBoxQuery) -> loca::Result<Depths> {
        self.record_call()?;
        let depths = self
            .depths
            .iter()
            .filter(|depth| area.contains(depth.lat, depth.lon))
            .cloned()
            .collect();
        Ok(Depths { depths })
    }
}

fn trip(id: i32, name: &str, date: (i32, u32, u32)) -> Trip {
    Trip {
        id,
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        vessel_name: "Aava".to_string(),
        owner_email: "skipper@example.com".to_string(),
    }
}

fn point(id: i32, lat: f64, lon: f64) -> TripPoint {
    TripPoint {
        id,
        time_utc: NaiveDate::from_ymd_opt(2016, 6, 25)
            .unwrap()
            .and_hms_opt(8, 0, id as u32)
            .unwrap(),
        lat,
        lon,
        pos_bad: false,
        water_speed_id: 100 + id,
        water_speed: 5.1,
        ground_speed_id: 200 + id,
        ground_speed: 5.4,
        course: 180.0,
        gs_bad: false,
    }
}

fn depth(id: i32, position_id: i32, lat: f64, lon: f64) -> Depth {
    Depth {
        id,
        position_id,
        trip_id: 1,
        time_utc: NaiveDate::from_ymd_opt(2016, 6, 25)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
        lat,
        lon,
        depth: 12.5,
        bad: false,
    }
}

fn sample_store() -> MemoryStore {
    MemoryStore {
        trips: vec![
            trip(1, "Archipelago run", (2016, 6, 25)),
            trip(2, "Evening sail", (2016, 7, 2)),
            trip(3, "Delivery trip", (2015, 8, 10)),
        ],
        points: vec![
            (1, point(1, 15.0, 0.0)),
            (1, point(2, 12.0, -3.0)),
            (1, point(3, 25.0, 0.0)),
            (2, point(4, 11.0, 1.0)),
        ],
        depths: vec![
            depth(301, 1, 15.0, 0.0),
            depth(302, 2, 12.0, -3.0),
            depth(303, 3, 25.0, 0.0),
            depth(304, 4, 15.0, 5.0),
        ],
        ..MemoryStore::default()
    }
}

/// Create a test server over the given store, returning its call counter.
fn create_test_server(store: MemoryStore) -> (TestServer, Arc<AtomicUsize>) {
    create_test_server_with_config(store, &ServiceConfig::default())
}

fn create_test_server_with_config(
    store: MemoryStore,
    config: &ServiceConfig,
) -> (TestServer, Arc<AtomicUsize>) {
    let calls = store.calls.clone();
    let state = Arc::new(AppState::new(store));
    let app = router(state, config);

    (TestServer::new(app).unwrap(), calls)
}

#[tokio::test]
async fn test_trips_endpoint_empty() {
    let (server, _) = create_test_server(MemoryStore::default());

    let response = server.get("/api/1/trips").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, serde_json::json!({"trips": []}));
}

#[tokio::test]
async fn test_trips_endpoint_newest_first() {
    let (server, _) = create_test_server(sample_store());

    let response = server.get("/api/1/trips").await;

    response.assert_status_ok();
    let json: Value = response.json();
    let trips = json["trips"].as_array().unwrap();
    let ids: Vec<i64> = trips.iter().map(|t| t["t_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(trips[0]["trip_date"], "2016-07-02");
    assert_eq!(trips[0]["user_email"], "skipper@example.com");

    // Same data, same answer
    let again: Value = server.get("/api/1/trips").await.json();
    assert_eq!(again, json);
}

#[tokio::test]
async fn test_depth_data_infinite_bounds() {
    let (server, calls) = create_test_server(sample_store());

    let response = server
        .get("/api/1/depth_data?lat0=-inf&lat1=inf&lon0=-Infinity&lon1=Infinity&mPerPix=2")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["depths"].as_array().unwrap().len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_trip_endpoint_found() {
    let (server, _) = create_test_server(sample_store());

    let response = server.get("/api/1/trip/3").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["t_id"], 3);
    assert_eq!(json["trip_name"], "Delivery trip");
    assert_eq!(json["vessel_name"], "Aava");
}

#[tokio::test]
async fn test_trip_endpoint_not_found() {
    let (server, calls) = create_test_server(sample_store());

    let response = server.get("/api/1/trip/42").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Not found");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_trip_endpoint_invalid_id() {
    let (server, calls) = create_test_server(sample_store());

    let response = server.get("/api/1/trip/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_trip_points_endpoint() {
    let (server, _) = create_test_server(sample_store());

    let response = server
        .get("/api/1/trip/1/points?lat0=10&lat1=20&lon0=-5&lon1=5&mPerPix=2")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["trip_id"], 1);

    let points = json["trip_points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["p_id"], 1);
    assert_eq!(points[0]["t_utc"], "20160625080001");
    assert_eq!(points[0]["ws_id"], 101);
    assert_eq!(points[0]["gs_bad"], false);
}

#[tokio::test]
async fn test_trip_points_endpoint_no_match() {
    let (server, _) = create_test_server(sample_store());

    let response = server
        .get("/api/1/trip/42/points?lat0=10&lat1=20&lon0=-5&lon1=5&mPerPix=2")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, serde_json::json!({"trip_id": 42, "trip_points": []}));
}

#[tokio::test]
async fn test_trip_points_endpoint_missing_params() {
    let (server, calls) = create_test_server(sample_store());

    // Missing mPerPix
    let response = server
        .get("/api/1/trip/42/points?lat0=10&lat1=20&lon0=-5&lon1=5")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), AREA_MESSAGE);

    // No parameters
    let response = server.get("/api/1/trip/42/points").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_trip_points_endpoint_invalid_id() {
    let (server, calls) = create_test_server(sample_store());

    let response = server
        .get("/api/1/trip/1.5/points?lat0=10&lat1=20&lon0=-5&lon1=5&mPerPix=2")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Trip identifier must be an integer");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_depth_endpoint_in_area() {
    let (server, _) = create_test_server(sample_store());

    let response = server
        .get("/api/1/depth_data?lat0=10&lat1=20&lon0=-5&lon1=5&mPerPix=2")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    let depths = json["depths"].as_array().unwrap();
    assert_eq!(depths.len(), 2);

    for depth in depths {
        let lat = depth["lat"].as_f64().unwrap();
        let lon = depth["lon"].as_f64().unwrap();
        assert!(lat > 10.0 && lat < 20.0);
        assert!(lon > -5.0 && lon < 5.0);
        assert!(depth["d_bad"].is_boolean());
    }
    assert_eq!(depths[0]["d_id"], 301);
    assert_eq!(depths[0]["p_id"], 1);
}

#[tokio::test]
async fn test_depth_endpoint_reversed_bounds() {
    let (server, calls) = create_test_server(sample_store());

    let response = server
        .get("/api/1/depth_data?lat0=20&lat1=10&lon0=5&lon1=-5&mPerPix=2")
        .await;

    // Reversed bounds are not an error, they just match nothing
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, serde_json::json!({"depths": []}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_depth_endpoint_invalid_params() {
    let (server, calls) = create_test_server(sample_store());

    let response = server
        .get("/api/1/depth_data?lat0=ten&lat1=20&lon0=-5&lon1=5&mPerPix=2")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), AREA_MESSAGE);

    let response = server.get("/api/1/depth_data").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_store_failure_is_opaque() {
    let store = MemoryStore {
        fail: true,
        ..sample_store()
    };
    let (server, _) = create_test_server(store);

    for path in [
        "/api/1/trips",
        "/api/1/trip/1",
        "/api/1/trip/1/points?lat0=10&lat1=20&lon0=-5&lon1=5&mPerPix=2",
        "/api/1/depth_data?lat0=10&lat1=20&lon0=-5&lon1=5&mPerPix=2",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Database query error");
    }
}

#[tokio::test]
async fn test_cors_header_on_every_response() {
    let (server, _) = create_test_server(sample_store());
    let origin = HeaderValue::from_static("https://charts.example.com");

    for (path, status) in [
        ("/api/1/trips", StatusCode::OK),
        ("/api/1/trip/42", StatusCode::NOT_FOUND),
        ("/api/1/depth_data", StatusCode::BAD_REQUEST),
    ] {
        let response = server
            .get(path)
            .add_header(header::ORIGIN, origin.clone())
            .await;
        response.assert_status(status);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}

#[tokio::test]
async fn test_custom_prefix() {
    let config = ServiceConfig {
        api_prefix: loca_service::normalize_prefix("locaapi"),
        ..ServiceConfig::default()
    };
    let (server, _) = create_test_server_with_config(sample_store(), &config);

    server.get("/locaapi/trips").await.assert_status_ok();
    server
        .get("/api/1/trips")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_files() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("index.html"), "<h1>loca</h1>").unwrap();

    let config = ServiceConfig {
        static_dir: Some(temp_dir.path().to_path_buf()),
        ..ServiceConfig::default()
    };
    let (server, _) = create_test_server_with_config(sample_store(), &config);

    let response = server.get("/index.html").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "<h1>loca</h1>");

    // API routes still win over the static directory
    server.get("/api/1/trips").await.assert_status_ok();
}

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _) = create_test_server(MemoryStore::default());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn test_openapi_endpoint() {
    let (server, _) = create_test_server(MemoryStore::default());

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json["paths"]["/depth_data"].is_object());
    assert_eq!(json["servers"][0]["url"], "/api/1");
}
