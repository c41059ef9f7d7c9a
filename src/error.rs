//! Error types and their mapping to HTTP responses.
//!
//! Every variant carries the sanitized message the caller sees; full details
//! are logged where the error is raised.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Upstream rejected the call for lack of credits (402).
    #[error("{0}")]
    Credit(String),

    /// Upstream answered with a non-2xx status other than 402.
    #[error("{0}")]
    BadGateway(String),

    /// Upstream answered 2xx without usable content.
    #[error("{0}")]
    InvalidResponse(String),

    /// Upstream did not answer in time.
    #[error("{0}")]
    Timeout(String),

    /// Connection-level failure talking to upstream.
    #[error("{0}")]
    Network(String),

    /// Anything not classified above.
    #[error("{0}")]
    Internal(String),

    #[error("Error reloading environment variables: {0}")]
    Reload(#[from] SettingsError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Credit(_) => StatusCode::PAYMENT_REQUIRED,
            RelayError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            RelayError::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Reload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Failures loading the API key / webhook settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} environment variable is not set.")]
    Missing(&'static str),

    #[error("failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
