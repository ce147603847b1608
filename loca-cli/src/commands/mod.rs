pub mod depths;
pub mod points;
pub mod trip;
pub mod trips;

use anyhow::{Context, Result};
use clap::Args;
use loca::{BoundingBoxQuery, PgTripStore, StoreBuilder, DEFAULT_MAX_CONNECTIONS};
use serde::Serialize;

/// Store connection options shared by every command.
#[derive(Args)]
pub struct StoreArgs {
    /// PostgreSQL connection URL; the libpq PG* variables are used when unset
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "LOCA_MAX_CONNECTIONS",
        default_value_t = DEFAULT_MAX_CONNECTIONS,
        global = true
    )]
    pub max_connections: u32,
}

impl StoreArgs {
    pub async fn connect(&self) -> Result<PgTripStore> {
        let builder = match &self.database_url {
            Some(url) => StoreBuilder::from_url(url)?,
            None => StoreBuilder::from_env()?,
        };

        builder
            .max_connections(self.max_connections)
            .connect()
            .await
            .context("Failed to connect to the database")
    }
}

/// Area and resolution of a map view.
#[derive(Args)]
pub struct AreaArgs {
    /// First latitude bound
    #[arg(long, allow_hyphen_values = true)]
    pub lat0: f64,

    /// Second latitude bound
    #[arg(long, allow_hyphen_values = true)]
    pub lat1: f64,

    /// First longitude bound
    #[arg(long, allow_hyphen_values = true)]
    pub lon0: f64,

    /// Second longitude bound
    #[arg(long, allow_hyphen_values = true)]
    pub lon1: f64,

    /// Map resolution in meters per pixel
    #[arg(long)]
    pub m_per_pix: f64,
}

impl From<AreaArgs> for BoundingBoxQuery {
    fn from(args: AreaArgs) -> Self {
        BoundingBoxQuery::new(args.lat0, args.lat1, args.lon0, args.lon1, args.m_per_pix)
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
