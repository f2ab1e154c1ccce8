//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the HomeServe API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! No failure originating in the persistence layer is allowed to crash a
//! handler; everything degrades to a status code and a JSON message while
//! the caller's local state stays intact.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use homeserve_core::errors::MarketError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `MarketError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub MarketError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            MarketError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketError::Validation(_) => StatusCode::BAD_REQUEST,
            MarketError::Authentication(_) => StatusCode::UNAUTHORIZED,
            MarketError::Authorization(_) => StatusCode::FORBIDDEN,
            MarketError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from MarketError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, MarketError>` in handler functions that return `Result<T, AppError>`.
impl From<MarketError> for AppError {
    fn from(err: MarketError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return `Result<T, AppError>`.
/// It wraps the eyre error in a MarketError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(MarketError::Database(err))
    }
}

/// Maps a MarketError to an HTTP response
pub fn map_error(err: MarketError) -> Response {
    AppError(err).into_response()
}
