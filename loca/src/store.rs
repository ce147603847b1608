//! Trip and depth queries against the backing store.
//!
//! [`TripSource`] is the seam between the HTTP layer and storage. The
//! PostgreSQL implementation, [`PgTripStore`], is handed its connection pool
//! explicitly and issues exactly one read-only statement per call.
//!
//! # Example
//!
//! ```ignore
//! use loca::{BoundingBoxQuery, StoreBuilder, TripSource};
//!
//! let store = StoreBuilder::from_env()?.connect().await?;
//!
//! let trips = store.trips().await?;
//! let area = BoundingBoxQuery::new(60.0, 60.5, 21.0, 22.0, 25.0);
//! let depths = store.depths(&area).await?;
//! println!("{} trips, {} soundings", trips.trips.len(), depths.depths.len());
//! ```

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use crate::error::Result;
use crate::models::{Depths, Trip, TripPoints, Trips};
use crate::params::{BoundingBoxQuery, TripId};
use crate::queries;
use crate::rows::{collect_records, first_record};

/// Read-only access to trips, trip points and depth soundings.
#[async_trait]
pub trait TripSource: Send + Sync {
    /// All trips, most recent first.
    async fn trips(&self) -> Result<Trips>;

    /// A single trip, or `None` when no trip has this identifier.
    async fn trip(&self, trip_id: TripId) -> Result<Option<Trip>>;

    /// Points of one trip inside `area` at the display tier for its resolution,
    /// ordered by position id.
    async fn trip_points(&self, trip_id: TripId, area: &BoundingBoxQuery) -> Result<TripPoints>;

    /// Depth soundings of all trips inside `area`, ordered by position id.
    async fn depths(&self, area: &BoundingBoxQuery) -> Result<Depths>;
}

/// [`TripSource`] backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgTripStore {
    pool: PgPool,
}

impl PgTripStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TripSource for PgTripStore {
    async fn trips(&self) -> Result<Trips> {
        let query = sqlx::query::<Postgres>(queries::SELECT_TRIPS);
        let trips = collect_records(query, &self.pool).await?;
        Ok(Trips { trips })
    }

    async fn trip(&self, trip_id: TripId) -> Result<Option<Trip>> {
        let query = sqlx::query::<Postgres>(queries::SELECT_TRIP).bind(trip_id.value());
        first_record(query, &self.pool).await
    }

    async fn trip_points(&self, trip_id: TripId, area: &BoundingBoxQuery) -> Result<TripPoints> {
        let query = sqlx::query::<Postgres>(queries::SELECT_TRIP_POINTS)
            .bind(trip_id.value())
            .bind(area.m_per_pix)
            .bind(area.lat0)
            .bind(area.lat1)
            .bind(area.lon0)
            .bind(area.lon1);
        let trip_points = collect_records(query, &self.pool).await?;

        Ok(TripPoints {
            trip_id: trip_id.value(),
            trip_points,
        })
    }

    async fn depths(&self, area: &BoundingBoxQuery) -> Result<Depths> {
        let query = sqlx::query::<Postgres>(queries::SELECT_DEPTHS)
            .bind(area.lat0)
            .bind(area.lat1)
            .bind(area.lon0)
            .bind(area.lon1)
            .bind(area.m_per_pix);
        let depths = collect_records(query, &self.pool).await?;

        Ok(Depths { depths })
    }
}
