//! Row mapping from query results to records.

use futures::TryStreamExt;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, FromRow, PgPool, Postgres, Row};

use crate::error::{LocaError, Result};

/// A record decoded from one result row.
///
/// `COLUMNS` is the output shape the record's query must produce, by name
/// and in order.
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Name used in logs and shape errors.
    const NAME: &'static str;
    /// Column names the query must return.
    const COLUMNS: &'static [&'static str];
}

/// Check result column names against the shape `R` declares.
pub fn check_columns<R: Record>(found: &[&str]) -> Result<()> {
    if found == R::COLUMNS {
        Ok(())
    } else {
        Err(LocaError::RowShape {
            record: R::NAME,
            expected: R::COLUMNS,
            found: found.iter().map(|name| name.to_string()).collect(),
        })
    }
}

fn check_shape<R: Record>(row: &PgRow) -> Result<()> {
    let names: Vec<&str> = row.columns().iter().map(|column| column.name()).collect();
    check_columns::<R>(&names)
}

/// Run `query` and decode every row into `R`, in result order.
///
/// Zero rows yield an empty vector. The first row that fails to decode aborts
/// the scan and the rows decoded so far are dropped.
pub async fn collect_records<'q, R: Record>(
    query: Query<'q, Postgres, PgArguments>,
    pool: &PgPool,
) -> Result<Vec<R>> {
    let mut rows = query.fetch(pool);
    let mut records = Vec::new();

    while let Some(row) = rows.try_next().await? {
        if records.is_empty() {
            check_shape::<R>(&row)?;
        }
        records.push(R::from_row(&row)?);
    }

    tracing::debug!(record = R::NAME, rows = records.len(), "Rows decoded");
    Ok(records)
}

/// Run `query` and decode its first row, if any.
///
/// Lookups are expected to match at most one row. Extra rows are ignored
/// but logged, since they mean the uniqueness the query relies on is broken.
pub async fn first_record<'q, R: Record>(
    query: Query<'q, Postgres, PgArguments>,
    pool: &PgPool,
) -> Result<Option<R>> {
    let mut rows = query.fetch(pool);

    let Some(row) = rows.try_next().await? else {
        return Ok(None);
    };
    check_shape::<R>(&row)?;
    let record = R::from_row(&row)?;

    if rows.try_next().await?.is_some() {
        tracing::warn!(
            record = R::NAME,
            "Lookup matched more than one row, using the first"
        );
    }

    Ok(Some(record))
}
