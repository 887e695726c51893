//! Common error types and handling for Orgdesk
//!
//! Every variant carries the plain, caller-facing message. Failures are
//! answered as ordinary `200 OK` values whose body only contains that message;
//! the variant decides how the failure is classified and logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Orgdesk application
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status equivalent of this failure, used to classify it in logs
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Authorization(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Configuration(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Authorization(_) => "AUTHORIZATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Unprocessable(_) => "UNPROCESSABLE",
            Error::RateLimit(_) => "RATE_LIMIT_EXCEEDED",
            Error::Upstream(_) => "UPSTREAM_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The plain message surfaced to the caller, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Error::Validation(m)
            | Error::Configuration(m)
            | Error::Authentication(m)
            | Error::Authorization(m)
            | Error::NotFound(m)
            | Error::Unprocessable(m)
            | Error::RateLimit(m)
            | Error::Upstream(m)
            | Error::Internal(m) => m,
        }
    }

    /// Log at a level matching the severity of the error
    pub fn log(&self) {
        if self.status_code().is_server_error() {
            tracing::error!(code = self.error_code(), status = self.status_code().as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.error_code(), status = self.status_code().as_u16(), error = %self, "Request rejected");
        }
    }
}

/// Renders `{ "error": "<message>" }` as a `200 OK` value.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({ "error": self.message() }));

        (StatusCode::OK, body).into_response()
    }
}

/// Pick the first human-readable message out of a `validator` error set.
///
/// Field errors are visited in field-name order so the result is stable.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
