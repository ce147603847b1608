//! # loca - sailing trip and depth queries
//!
//! Read-only access to recorded sailing trips, their track points and the
//! depth soundings taken along the way, stored in PostgreSQL.
//!
//! ## Overview
//!
//! - [`params`] turns raw query-string pairs into a validated
//!   [`BoundingBoxQuery`] or [`TripId`]
//! - [`store`] binds those values into fixed SQL templates and runs them
//!   through a [`TripSource`]
//! - [`rows`] decodes result rows into the records of [`models`], checking
//!   each query's output columns first
//!
//! Map clients ask for an area and a resolution in meters per pixel. The
//! store maps the resolution to a display range tier with its
//! `get_display_range` function, so zoomed-out views receive a decimated
//! set of points.
//!
//! ## Quick Start
//!
//! ```ignore
//! use loca::{BoundingBoxQuery, StoreBuilder, TripSource};
//!
//! let store = StoreBuilder::from_env()?.connect().await?;
//! let area = BoundingBoxQuery::new(60.0, 60.5, 21.0, 22.0, 25.0);
//!
//! for trip in store.trips().await?.trips {
//!     let points = store.trip_points(loca::TripId::new(trip.id), &area).await?;
//!     println!("{}: {} points", trip.name, points.trip_points.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod queries;
pub mod rows;
pub mod store;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use config::{StoreBuilder, DEFAULT_MAX_CONNECTIONS};
pub use error::{LocaError, Result};
pub use models::{Depth, Depths, Trip, TripPoint, TripPoints, Trips};
pub use params::{BoundingBoxQuery, TripId, AREA_PARAMS};
pub use store::{PgTripStore, TripSource};
