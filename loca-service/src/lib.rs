//! Loca Service Library
//!
//! HTTP handlers, response encoding and routing for the trip service.
//! This library is used by both the loca-service binary and integration tests.

pub mod encoder;
pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use loca::TripSource;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::openapi::server::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Port the service listens on unless `LOCA_PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 8002;
/// Path prefix of the API routes unless `LOCA_API_PREFIX` says otherwise.
pub const DEFAULT_API_PREFIX: &str = "/api/1/";

/// Application state shared across handlers.
pub struct AppState {
    /// Source of trips, trip points and depths.
    pub store: Arc<dyn TripSource>,
}

impl AppState {
    pub fn new<S: TripSource + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Service settings outside the store connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// HTTP server port.
    pub port: u16,
    /// Prefix of every API route, beginning and ending with `/`.
    pub api_prefix: String,
    /// Directory served at `/` for paths no route matches.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            static_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Load settings from `LOCA_PORT`, `LOCA_API_PREFIX` and `LOCA_STATIC_DIR`.
    pub fn from_env() -> Self {
        let port = std::env::var("LOCA_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_prefix = std::env::var("LOCA_API_PREFIX")
            .map(|prefix| normalize_prefix(&prefix))
            .unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string());

        let static_dir = std::env::var_os("LOCA_STATIC_DIR").map(PathBuf::from);

        Self {
            port,
            api_prefix,
            static_dir,
        }
    }
}

/// Make a route prefix begin and end with a single `/`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// OpenAPI documentation for the trip API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Loca Trip Service",
        description = "Read-only API for sailing trips, trip track points and depth soundings.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::list_trips,
        handlers::trip_info,
        handlers::trip_points,
        handlers::depth_data,
    ),
    components(
        schemas(
            loca::Trip,
            loca::Trips,
            loca::TripPoint,
            loca::TripPoints,
            loca::Depth,
            loca::Depths,
        )
    ),
    tags(
        (name = "trips", description = "Trip and track point endpoints"),
        (name = "depths", description = "Depth sounding endpoints")
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the API prefix as its server URL.
pub fn openapi(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let base = api_prefix.trim_end_matches('/');
    doc.servers = Some(vec![Server::new(if base.is_empty() { "/" } else { base })]);
    doc
}

/// Build the application router.
pub fn router(state: Arc<AppState>, config: &ServiceConfig) -> Router {
    let prefix = config.api_prefix.as_str();

    let mut app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi(prefix)))
        .route(&format!("{prefix}trips"), get(handlers::list_trips))
        .route(&format!("{prefix}trip/:trip_id"), get(handlers::trip_info))
        .route(
            &format!("{prefix}trip/:trip_id/points"),
            get(handlers::trip_points),
        )
        .route(&format!("{prefix}depth_data"), get(handlers::depth_data))
        .route("/health", get(handlers::health_check));

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use encoder::{error_response, json_reply};
pub use handlers::HealthResponse;
