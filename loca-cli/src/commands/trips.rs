use anyhow::{Context, Result};
use loca::{Trip, TripSource};

use super::{print_json, StoreArgs};

fn format_row(trip: &Trip) -> String {
    format!(
        "{:>6}  {:<10}  {:<24}  {:<16}  {}",
        trip.id,
        trip.date.to_string(),
        trip.name,
        trip.vessel_name,
        trip.owner_email
    )
}

pub async fn run(store: &StoreArgs, json: bool) -> Result<()> {
    let store = store.connect().await?;
    let trips = store.trips().await.context("Failed to list trips")?;

    if json {
        return print_json(&trips);
    }

    if trips.trips.is_empty() {
        println!("No trips found");
        return Ok(());
    }

    println!(
        "{:>6}  {:<10}  {:<24}  {:<16}  {}",
        "ID", "DATE", "NAME", "VESSEL", "OWNER"
    );
    println!("{}", "-".repeat(80));
    for trip in &trips.trips {
        println!("{}", format_row(trip));
    }
    println!("\nTotal: {} trips", trips.trips.len());

    Ok(())
}
