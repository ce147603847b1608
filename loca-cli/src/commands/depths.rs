use anyhow::{Context, Result};
use loca::geojson::depths_to_feature_collection;
use loca::{BoundingBoxQuery, TripSource};

use super::{print_json, StoreArgs};

pub async fn run(store: &StoreArgs, area: BoundingBoxQuery, geojson: bool) -> Result<()> {
    let store = store.connect().await?;
    let depths = store
        .depths(&area)
        .await
        .context("Failed to load depth soundings")?;

    if geojson {
        let collection = depths_to_feature_collection(&depths);
        print_json(&collection)
    } else {
        print_json(&depths)
    }
}
