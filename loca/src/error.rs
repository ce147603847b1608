//! Error types for the loca library.

use thiserror::Error;

/// Errors that can occur while answering a trip or depth query.
#[derive(Error, Debug)]
pub enum LocaError {
    /// A required numeric query parameter is missing or is not a float.
    #[error("Query parameters {} are mandatory", .required.join(", "))]
    InvalidParameter {
        /// The first parameter that failed to parse.
        name: String,
        /// The full set of parameters the request must carry.
        required: &'static [&'static str],
    },

    /// The trip identifier does not parse as a 32-bit integer.
    #[error("Trip identifier must be an integer")]
    InvalidTripId { value: String },

    /// A singular resource lookup matched no rows.
    #[error("Not found")]
    NotFound,

    /// Any failure reported by the backing store, including decode errors.
    #[error("Database query failed: {0}")]
    Storage(#[from] sqlx::Error),

    /// The query returned columns that do not match the record being decoded.
    #[error("Query for {record} returned columns {found:?}, expected {expected:?}")]
    RowShape {
        record: &'static str,
        expected: &'static [&'static str],
        found: Vec<String>,
    },

    /// A response document could not be serialized.
    #[error("JSON encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Startup configuration is invalid.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LocaError {
    /// Whether the error was caused by the request rather than the server.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LocaError::InvalidParameter { .. } | LocaError::InvalidTripId { .. }
        )
    }
}

/// Result type alias using [`LocaError`].
pub type Result<T> = std::result::Result<T, LocaError>;
