use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{AreaArgs, StoreArgs};

/// Sailing trip and depth sounding query tool
#[derive(Parser)]
#[command(name = "loca")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all trips, most recent first
    Trips {
        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show a single trip
    Trip {
        /// Trip identifier
        trip_id: String,
    },

    /// Print the points of a trip inside an area
    Points {
        /// Trip identifier
        trip_id: String,

        #[command(flatten)]
        area: AreaArgs,

        /// Output the track as a GeoJSON LineString feature
        #[arg(short, long)]
        geojson: bool,
    },

    /// Print depth soundings inside an area
    Depths {
        #[command(flatten)]
        area: AreaArgs,

        /// Output soundings as a GeoJSON FeatureCollection
        #[arg(short, long)]
        geojson: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trips { json } => commands::trips::run(&cli.store, json).await,
        Commands::Trip { trip_id } => commands::trip::run(&cli.store, &trip_id).await,
        Commands::Points {
            trip_id,
            area,
            geojson,
        } => commands::points::run(&cli.store, &trip_id, area.into(), geojson).await,
        Commands::Depths { area, geojson } => {
            commands::depths::run(&cli.store, area.into(), geojson).await
        }
    }
}
