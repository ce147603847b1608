//! Store configuration.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::error::{LocaError, Result};
use crate::store::PgTripStore;

/// Default upper bound on concurrent store connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Builder for a [`PgTripStore`] and its connection pool.
///
/// # Example
///
/// ```ignore
/// use loca::StoreBuilder;
///
/// let store = StoreBuilder::from_url("postgres://loca@localhost/loca")?
///     .max_connections(4)
///     .connect()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    connect_options: PgConnectOptions,
    max_connections: u32,
}

impl StoreBuilder {
    /// Create a builder from explicit connection options.
    pub fn new(connect_options: PgConnectOptions) -> Self {
        Self {
            connect_options,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Create a builder from a `postgres://` connection URL.
    pub fn from_url(url: &str) -> Result<Self> {
        let connect_options = url.parse::<PgConnectOptions>().map_err(|e| LocaError::Config {
            message: format!("invalid database URL: {e}"),
        })?;
        Ok(Self::new(connect_options))
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DATABASE_URL` | Connection URL, takes precedence over the libpq variables | None |
    /// | `PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`, `PGSSLMODE` | libpq connection parameters | libpq defaults |
    /// | `LOCA_MAX_CONNECTIONS` | Pool size | 10 |
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not a valid URL or
    /// `LOCA_MAX_CONNECTIONS` is not a positive integer.
    pub fn from_env() -> Result<Self> {
        let builder = match std::env::var("DATABASE_URL") {
            Ok(url) => Self::from_url(&url)?,
            // PgConnectOptions::new reads the libpq variables itself
            Err(_) => Self::new(PgConnectOptions::new()),
        };

        let max_connections =
            parse_max_connections(std::env::var("LOCA_MAX_CONNECTIONS").ok().as_deref())?;

        Ok(builder.max_connections(max_connections))
    }

    /// Set the maximum number of pooled connections.
    ///
    /// Requests beyond this bound wait for a connection to be released.
    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// The connection options the pool will use.
    pub fn connect_options(&self) -> &PgConnectOptions {
        &self.connect_options
    }

    /// Open the pool and build the store.
    ///
    /// # Errors
    ///
    /// Returns [`LocaError::Storage`] if the first connection cannot be made.
    pub async fn connect(self) -> Result<PgTripStore> {
        if self.max_connections == 0 {
            return Err(LocaError::Config {
                message: "pool needs at least one connection".to_string(),
            });
        }

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(self.connect_options)
            .await?;

        tracing::info!(max_connections = self.max_connections, "Connected to database");
        Ok(PgTripStore::new(pool))
    }
}

fn parse_max_connections(value: Option<&str>) -> Result<u32> {
    match value {
        None => Ok(DEFAULT_MAX_CONNECTIONS),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(LocaError::Config {
                message: format!("LOCA_MAX_CONNECTIONS must be a positive integer, got {raw:?}"),
            }),
        },
    }
}
