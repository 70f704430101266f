//! Error types for the HTTP boundary
//!
//! Collaborator errors convert into [`AppError`], which renders a JSON body.
//! Cache faults never reach this layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::distance::DistanceError;
use crate::history::RepositoryError;
use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type returned by handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid request data
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more addresses could not be geocoded
    #[error("Failed to calculate distance")]
    Geocoding(Vec<String>),

    /// Persistence failed; details are logged, not returned
    #[error("Database operation failed")]
    Repository(#[source] RepositoryError),
}

impl From<DistanceError> for AppError {
    fn from(err: DistanceError) -> Self {
        match err {
            DistanceError::Geocoding(errors) => {
                AppError::Geocoding(errors.iter().map(ToString::to_string).collect())
            }
            DistanceError::Repository(e) => AppError::Repository(e),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
            AppError::Geocoding(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details(message, errors),
            ),
            AppError::Repository(e) => {
                error!(error = %e, "repository failure");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
