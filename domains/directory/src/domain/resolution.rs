//! Username resolution shared by the lookup and invitation endpoints

use orgdesk_common::Result;
use orgdesk_github::DirectoryClient;

use super::entities::UserSummary;
use super::errors::normalize;

/// Resolve `username` to its numeric id and avatar.
///
/// Performs exactly one directory call. Failures are already normalized.
pub async fn resolve_user(client: &dyn DirectoryClient, username: &str) -> Result<UserSummary> {
    let user = client
        .get_user(username)
        .await
        .map_err(|e| normalize(&e))?;

    let summary = UserSummary::try_from(user)?;
    tracing::debug!(username = %username, id = summary.id, "Resolved user");
    Ok(summary)
}
