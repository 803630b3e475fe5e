//! HTTP error responses.
//!
//! Every failure leaves the API as a JSON body of the form
//! `{"statusCode": 404, "error": "Not Found", "message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Error, constants::INVALID_CREDENTIALS_MESSAGE};

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Credentials were rejected. The message never says why.
    #[error("{msg}", msg = INVALID_CREDENTIALS_MESSAGE)]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    /// Details are logged, not returned.
    #[error("An internal server error occurred")]
    Internal,
}

impl ApiError {
    /// Creates the not-found error for a user lookup key.
    #[must_use]
    pub fn user_not_found(id: &str) -> Self {
        Self::NotFound(format!("No user with ID '{id}'"))
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_authentication_error() {
            Self::Unauthorized
        } else if err.is_validation_error() {
            Self::BadRequest(err.to_string())
        } else if err.is_conflict() {
            Self::Conflict(err.to_string())
        } else {
            tracing::error!(module = err.module(), "Request failed: {err}");
            Self::Internal
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    /// Reason phrase of the status code
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
