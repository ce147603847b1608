//! GeoJSON export of trip tracks and depth soundings.
//!
//! Enable the `geojson` feature to use this module. Coordinates are written in
//! GeoJSON order: `[longitude, latitude]`.
//!
//! # Example
//!
//! ```ignore
//! use loca::geojson::{depths_to_feature_collection, trip_points_to_feature};
//!
//! let track = trip_points_to_feature(&store.trip_points(trip_id, &area).await?);
//! let soundings = depths_to_feature_collection(&store.depths(&area).await?);
//! println!("{}", serde_json::to_string(&soundings)?);
//! ```

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::Value;

use crate::models::{Depth, Depths, TripPoints};

/// Convert trip points into a single `LineString` feature.
///
/// The feature carries the trip identifier and the point count as
/// properties. Points flagged as erroneous positions are left out of the
/// line.
pub fn trip_points_to_feature(points: &TripPoints) -> Feature {
    let coords: Vec<Vec<f64>> = points
        .trip_points
        .iter()
        .filter(|point| !point.pos_bad)
        .map(|point| vec![point.lon, point.lat])
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("trip_id".to_string(), Value::from(points.trip_id));
    properties.insert("points".to_string(), Value::from(coords.len()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::LineString(coords))),
        id: Some(Id::Number(points.trip_id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn depth_to_feature(depth: &Depth) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("depth".to_string(), Value::from(depth.depth));
    properties.insert("d_bad".to_string(), Value::from(depth.bad));
    properties.insert("p_id".to_string(), Value::from(depth.position_id));
    properties.insert("t_id".to_string(), Value::from(depth.trip_id));
    properties.insert(
        "t_utc".to_string(),
        Value::from(depth.time_utc.format("%Y%m%d%H%M%S").to_string()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::Point(vec![depth.lon, depth.lat]))),
        id: Some(Id::Number(depth.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Convert depth soundings into a collection of `Point` features.
pub fn depths_to_feature_collection(depths: &Depths) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: depths.depths.iter().map(depth_to_feature).collect(),
        foreign_members: None,
    }
}
