use anyhow::{Context, Result};
use loca::{TripId, TripSource};

use super::{print_json, StoreArgs};

pub async fn run(store: &StoreArgs, trip_id: &str) -> Result<()> {
    let trip_id: TripId = trip_id
        .parse()
        .with_context(|| format!("Invalid trip identifier: {trip_id}"))?;

    let store = store.connect().await?;
    match store.trip(trip_id).await.context("Failed to load trip")? {
        Some(trip) => print_json(&trip),
        None => anyhow::bail!("Trip {} not found", trip_id),
    }
}
