//! Response encoding.
//!
//! Successful results are written as JSON documents. Errors become short
//! plain-text bodies: store and encoding failures are logged in full here and
//! reported to the client with a fixed message only.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use loca::LocaError;
use serde::Serialize;

/// Body sent when a store query fails.
pub const STORAGE_ERROR_MESSAGE: &str = "Database query error";
/// Body sent when a response document cannot be serialized.
pub const ENCODING_ERROR_MESSAGE: &str = "Failed to encode response";
/// Body sent when a singular resource does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Serialize `value` into a JSON response.
pub fn json_reply<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => error_response(LocaError::Encoding(e)),
    }
}

/// Turn a query result into a response.
pub fn respond<T: Serialize>(result: loca::Result<T>) -> Response {
    match result {
        Ok(value) => json_reply(&value),
        Err(e) => error_response(e),
    }
}

/// Create the response for a failed request.
pub fn error_response(e: LocaError) -> Response {
    let (status, message) = match &e {
        LocaError::InvalidParameter { .. } | LocaError::InvalidTripId { .. } => {
            tracing::debug!(error = ?e, "Rejected request parameters");
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        LocaError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
        LocaError::Storage(_) | LocaError::RowShape { .. } => {
            tracing::warn!(error = %e, "Database query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                STORAGE_ERROR_MESSAGE.to_string(),
            )
        }
        LocaError::Encoding(_) => {
            tracing::error!(error = %e, "Failed marshalling response to JSON");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ENCODING_ERROR_MESSAGE.to_string(),
            )
        }
        LocaError::Config { .. } => {
            tracing::error!(error = %e, "Request failed on configuration");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::INTERNAL_SERVER_ERROR.to_string(),
            )
        }
    };

    (status, message).into_response()
}
