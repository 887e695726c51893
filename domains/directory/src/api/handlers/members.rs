//! Member listing handler

use axum::{extract::State, Json};
use orgdesk_common::Result;
use orgdesk_github::Member;

use crate::api::middleware::DirectoryState;
use crate::domain::errors::normalize;

/// List every member of the configured organization, in directory order
pub async fn list_members(State(state): State<DirectoryState>) -> Result<Json<Vec<Member>>> {
    let org = state.organization()?;

    let members = state
        .client
        .list_org_members(org)
        .await
        .map_err(|e| normalize(&e))?;

    tracing::info!(org = %org, count = members.len(), "Listed organization members");
    Ok(Json(members))
}
