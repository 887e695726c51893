//! Response entities for the directory endpoints
//!
//! Both are built per request and never stored.

use chrono::{DateTime, Utc};
use orgdesk_common::Error;
use orgdesk_github::GitHubUser;
use serde::{Deserialize, Serialize};

/// A resolved user: numeric id plus avatar URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub avatar: String,
    pub id: u64,
}

impl TryFrom<GitHubUser> for UserSummary {
    type Error = Error;

    /// Rejects records without a positive id or an avatar, so a summary
    /// always identifies a real account.
    fn try_from(user: GitHubUser) -> Result<Self, Self::Error> {
        if user.id == 0 || user.avatar_url.trim().is_empty() {
            tracing::warn!(login = %user.login, id = user.id, "GitHub returned an incomplete user record");
            return Err(Error::Upstream(
                "Unexpected response from GitHub".to_string(),
            ));
        }

        Ok(Self {
            avatar: user.avatar_url,
            id: user.id,
        })
    }
}

/// Outcome of an invitation request.
///
/// Serializes as `{ success: true, invitedAt }` or `{ success: false, error }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvitationResult {
    pub fn sent(invited_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            invited_at: Some(invited_at),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            invited_at: None,
            error: Some(error.into()),
        }
    }
}
