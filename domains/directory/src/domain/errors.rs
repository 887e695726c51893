//! Normalization of directory client faults into caller-facing errors
//!
//! This is the only place a `DirectoryError` is inspected. Whatever comes out
//! carries a plain message; raw client errors are logged, never returned.

use orgdesk_common::Error;
use orgdesk_github::DirectoryError;

/// Message used when GitHub could not be reached at all
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach GitHub";

/// Message used when GitHub answered with something we could not read
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from GitHub";

/// Map any directory client fault into the common error type.
///
/// API errors keep the message GitHub supplied and take their variant from
/// the HTTP status; transport and decoding faults get a generic message.
pub fn normalize(err: &DirectoryError) -> Error {
    tracing::warn!(error = %err, "Directory client call failed");

    match err {
        DirectoryError::Configuration(message) => Error::Configuration(message.clone()),
        DirectoryError::InvalidInput(message) => Error::Validation(message.clone()),
        DirectoryError::Request(_) => Error::Upstream(UNREACHABLE_MESSAGE.to_string()),
        DirectoryError::Response(_) => Error::Upstream(UNEXPECTED_RESPONSE_MESSAGE.to_string()),
        DirectoryError::Api { status, message } => {
            let message = message.clone();
            match *status {
                400 => Error::Validation(message),
                401 => Error::Authentication(message),
                // GitHub reports primary rate limits as 403
                403 if message.to_lowercase().contains("rate limit") => Error::RateLimit(message),
                403 => Error::Authorization(message),
                404 => Error::NotFound(message),
                422 => Error::Unprocessable(message),
                429 => Error::RateLimit(message),
                _ => Error::Upstream(message),
            }
        }
    }
}
