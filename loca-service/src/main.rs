//! Loca Service - HTTP service for sailing trip and depth queries.
//!
//! Serves trips, trip track points and depth soundings from PostgreSQL as
//! JSON, filtered by a bounding box and a map resolution.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_URL` | PostgreSQL connection URL | None |
//! | `PGHOST`, `PGUSER`, `PGDATABASE`, ... | libpq connection parameters, used without `DATABASE_URL` | libpq defaults |
//! | `LOCA_MAX_CONNECTIONS` | Connection pool size | 10 |
//! | `LOCA_PORT` | HTTP server port | 8002 |
//! | `LOCA_API_PREFIX` | Path prefix of the API routes | `/api/1/` |
//! | `LOCA_STATIC_DIR` | Directory of static files served at `/` | None |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET {prefix}trips` - All trips, most recent first
//! - `GET {prefix}trip/:trip_id` - A single trip
//! - `GET {prefix}trip/:trip_id/points?lat0=&lat1=&lon0=&lon1=&mPerPix=` - Trip points in an area
//! - `GET {prefix}depth_data?lat0=&lat1=&lon0=&lon1=&mPerPix=` - Depth soundings in an area
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use loca::StoreBuilder;
use loca_service::{AppState, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loca_service=info,loca=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();

    tracing::info!(
        port = config.port,
        api_prefix = %config.api_prefix,
        static_dir = ?config.static_dir,
        "Starting loca service"
    );

    let store = StoreBuilder::from_env()?.connect().await?;
    let state = Arc::new(AppState::new(store));

    let app = loca_service::router(state, &config);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
