//! Organization invitation handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use orgdesk_common::{first_validation_message, Error, LenientJson, Result};
use orgdesk_github::{InvitationRequest, InvitationRole};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::{trimmed_username, MISSING_USERNAME};
use crate::api::middleware::DirectoryState;
use crate::domain::entities::InvitationResult;
use crate::domain::errors::normalize;
use crate::domain::resolution::resolve_user;
use crate::domain::state::{InvitationEvent, InvitationFlow};

/// Request for inviting a user into the organization
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[serde(default, deserialize_with = "trimmed_username")]
    #[validate(required(message = "Missing username"))]
    pub username: Option<String>,

    /// `admin`, `direct_member` (default), or `billing_manager`.
    /// Kept as raw JSON so a non-string role is reported as an invalid role.
    #[serde(default)]
    pub role: Option<Value>,
}

impl CreateInvitationRequest {
    /// Validate the request. The username is checked before the role.
    pub fn into_parts(self) -> Result<(String, InvitationRole)> {
        self.validate()
            .map_err(|e| Error::Validation(first_validation_message(&e)))?;
        let username = self
            .username
            .ok_or_else(|| Error::Validation(MISSING_USERNAME.to_string()))?;

        let role = match self.role {
            None | Some(Value::Null) => InvitationRole::default(),
            Some(Value::String(role)) if role.trim().is_empty() => InvitationRole::default(),
            Some(Value::String(role)) => role.trim().parse().map_err(Error::Validation)?,
            Some(other) => other.to_string().parse().map_err(Error::Validation)?,
        };

        Ok((username, role))
    }
}

/// Invite a user into the configured organization.
///
/// Always answers `200 OK` with `{ success, invitedAt }` or
/// `{ success: false, error }`.
pub async fn create_invitation(
    State(state): State<DirectoryState>,
    LenientJson(req): LenientJson<CreateInvitationRequest>,
) -> Json<InvitationResult> {
    let mut flow = InvitationFlow::new();

    match invite(&state, req, &mut flow).await {
        Ok(invited_at) => Json(InvitationResult::sent(invited_at)),
        Err(err) => {
            err.log();
            tracing::debug!(state = %flow.state(), "Invitation not sent");
            Json(InvitationResult::failed(err.message()))
        }
    }
}

async fn invite(
    state: &DirectoryState,
    req: CreateInvitationRequest,
    flow: &mut InvitationFlow,
) -> Result<DateTime<Utc>> {
    flow.apply(InvitationEvent::Receive)?;

    let (username, role) = match req.into_parts() {
        Ok(parts) => {
            flow.apply(InvitationEvent::Accept)?;
            parts
        }
        Err(err) => {
            flow.apply(InvitationEvent::Reject)?;
            return Err(err);
        }
    };

    let user = match resolve_user(state.client.as_ref(), &username).await {
        Ok(user) => {
            flow.apply(InvitationEvent::Resolve)?;
            user
        }
        Err(err) => {
            flow.apply(InvitationEvent::FailResolution)?;
            return Err(err);
        }
    };

    let request = match state.organization() {
        Ok(org) => InvitationRequest {
            org: org.to_string(),
            invitee_id: user.id,
            role,
        },
        Err(err) => {
            flow.apply(InvitationEvent::FailInvite)?;
            return Err(err);
        }
    };

    match state.client.create_org_invitation(request).await {
        Ok(invitation) => {
            flow.apply(InvitationEvent::Invite)?;
            tracing::info!(username = %username, invitee_id = user.id, role = %role, "Invitation sent");
            Ok(invitation.created_at)
        }
        Err(e) => {
            flow.apply(InvitationEvent::FailInvite)?;
            Err(normalize(&e))
        }
    }
}
