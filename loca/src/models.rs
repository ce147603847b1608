//! Records and response envelopes.
//!
//! Each record maps result columns to fields by name and serializes with the
//! short snake_case keys map clients expect (`t_id`, `p_id`, `d_bad`, ...).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use sqlx::FromRow;

use crate::rows::Record;

/// Serialize a UTC timestamp as `YYYYMMDDHHMMSS`.
fn compact_utc<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%Y%m%d%H%M%S"))
}

/// A sailing trip joined with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Trip {
    #[sqlx(rename = "t_id")]
    #[serde(rename = "t_id")]
    pub id: i32,
    #[serde(rename = "trip_name")]
    #[sqlx(rename = "trip_name")]
    pub name: String,
    /// Calendar date of the trip, serialized as `YYYY-MM-DD`.
    #[serde(rename = "trip_date")]
    #[sqlx(rename = "trip_date")]
    pub date: NaiveDate,
    pub vessel_name: String,
    #[serde(rename = "user_email")]
    #[sqlx(rename = "user_email")]
    pub owner_email: String,
}

impl Record for Trip {
    const NAME: &'static str = "Trip";
    const COLUMNS: &'static [&'static str] =
        &["t_id", "trip_name", "trip_date", "vessel_name", "user_email"];
}

/// A recorded position on a trip with its speed measurements.
///
/// The owning trip is not part of the record; it is carried by the
/// [`TripPoints`] envelope.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TripPoint {
    #[sqlx(rename = "p_id")]
    #[serde(rename = "p_id")]
    pub id: i32,
    #[sqlx(rename = "t_utc")]
    #[serde(rename = "t_utc", serialize_with = "compact_utc")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "20160625121500"))]
    pub time_utc: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    /// Position flagged as erroneous.
    pub pos_bad: bool,
    #[sqlx(rename = "ws_id")]
    #[serde(rename = "ws_id")]
    pub water_speed_id: i32,
    /// Speed through water in knots.
    #[sqlx(rename = "ws")]
    #[serde(rename = "ws")]
    pub water_speed: f64,
    #[sqlx(rename = "gs_id")]
    #[serde(rename = "gs_id")]
    pub ground_speed_id: i32,
    /// Speed over ground in knots.
    #[sqlx(rename = "gs")]
    #[serde(rename = "gs")]
    pub ground_speed: f64,
    /// Course over ground in degrees.
    pub course: f64,
    /// Ground speed and course flagged as erroneous.
    pub gs_bad: bool,
}

impl Record for TripPoint {
    const NAME: &'static str = "TripPoint";
    const COLUMNS: &'static [&'static str] = &[
        "p_id", "t_utc", "lat", "lon", "pos_bad", "ws_id", "ws", "gs_id", "gs", "course", "gs_bad",
    ];
}

/// A depth sounding at a recorded position.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Depth {
    #[sqlx(rename = "d_id")]
    #[serde(rename = "d_id")]
    pub id: i32,
    #[sqlx(rename = "p_id")]
    #[serde(rename = "p_id")]
    pub position_id: i32,
    #[sqlx(rename = "t_id")]
    #[serde(rename = "t_id")]
    pub trip_id: i32,
    #[sqlx(rename = "t_utc")]
    #[serde(rename = "t_utc", serialize_with = "compact_utc")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "20160625121500"))]
    pub time_utc: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    /// Depth below transducer in meters.
    pub depth: f64,
    /// Sounding flagged as erroneous.
    #[sqlx(rename = "d_bad")]
    #[serde(rename = "d_bad")]
    pub bad: bool,
}

impl Record for Depth {
    const NAME: &'static str = "Depth";
    const COLUMNS: &'static [&'static str] =
        &["d_id", "p_id", "t_id", "t_utc", "lat", "lon", "depth", "d_bad"];
}

/// `{"trips": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Trips {
    pub trips: Vec<Trip>,
}

/// `{"trip_id": N, "trip_points": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TripPoints {
    pub trip_id: i32,
    pub trip_points: Vec<TripPoint>,
}

/// `{"depths": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Depths {
    pub depths: Vec<Depth>,
}
