//! Custom axum extractors for Orgdesk

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor that never rejects.
///
/// An absent, unreadable, or malformed body yields `T::default()`, so the
/// handler decides what a missing field means and can answer in its own
/// response shape. The `Content-Type` header is not required.
#[derive(Debug, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Failed to read request body");
                return Ok(LenientJson(T::default()));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LenientJson(T::default()));
        }

        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Ok(LenientJson(value)),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed JSON body");
                Ok(LenientJson(T::default()))
            }
        }
    }
}
