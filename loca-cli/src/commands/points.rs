use anyhow::{Context, Result};
use loca::geojson::trip_points_to_feature;
use loca::{BoundingBoxQuery, TripId, TripSource};

use super::{print_json, StoreArgs};

pub async fn run(
    store: &StoreArgs,
    trip_id: &str,
    area: BoundingBoxQuery,
    geojson: bool,
) -> Result<()> {
    let trip_id: TripId = trip_id
        .parse()
        .with_context(|| format!("Invalid trip identifier: {trip_id}"))?;

    let store = store.connect().await?;
    let points = store
        .trip_points(trip_id, &area)
        .await
        .context("Failed to load trip points")?;

    if geojson {
        let feature: geojson::Feature = trip_points_to_feature(&points);
        print_json(&feature)
    } else {
        print_json(&points)
    }
}
