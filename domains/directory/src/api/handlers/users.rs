//! User lookup handler

use axum::{extract::State, Json};
use orgdesk_common::{first_validation_message, Error, LenientJson, Result};
use serde::Deserialize;
use validator::Validate;

use super::{trimmed_username, MISSING_USERNAME};
use crate::api::middleware::DirectoryState;
use crate::domain::entities::UserSummary;
use crate::domain::resolution::resolve_user;

/// Request for looking up a user
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LookupUserRequest {
    #[serde(default, deserialize_with = "trimmed_username")]
    #[validate(required(message = "Missing username"))]
    pub username: Option<String>,
}

impl LookupUserRequest {
    /// Validate and take the username
    pub fn into_username(self) -> Result<String> {
        self.validate()
            .map_err(|e| Error::Validation(first_validation_message(&e)))?;
        self.username
            .ok_or_else(|| Error::Validation(MISSING_USERNAME.to_string()))
    }
}

/// Resolve a username to `{ avatar, id }`
pub async fn get_by_username(
    State(state): State<DirectoryState>,
    LenientJson(req): LenientJson<LookupUserRequest>,
) -> Result<Json<UserSummary>> {
    let username = req.into_username()?;

    let summary = resolve_user(state.client.as_ref(), &username).await?;

    tracing::info!(username = %username, id = summary.id, "User lookup succeeded");
    Ok(Json(summary))
}
