//! Orgdesk Directory Client
//!
//! Provides the directory operations the HTTP handlers proxy:
//! - Look up a GitHub user by username
//! - List every member of an organization, across all pages
//! - Create an organization invitation for a user id
//!
//! Two backends are available: the GitHub REST API and a programmable mock
//! for local development and tests.

pub mod client;
pub mod mock;
pub mod pagination;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use orgdesk_common::Config;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::GitHubClient;
pub use mock::{MockDirectoryBehavior, MockDirectoryClient, RecordedCall};
pub use pagination::{parse_link_header, LinkPagination};

/// GitHub caps `per_page` at 100
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("Directory configuration error: {0}")]
    Configuration(String),

    #[error("Invalid directory request: {0}")]
    InvalidInput(String),

    #[error("Directory request error: {0}")]
    Request(String),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Directory response error: {0}")]
    Response(String),
}

impl DirectoryError {
    /// Shorthand for the error GitHub returns for unknown users and orgs
    pub fn not_found() -> Self {
        Self::Api {
            status: 404,
            message: "Not Found".to_string(),
        }
    }
}

/// A GitHub user as returned by `GET /users/{username}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
}

/// Organization member record, passed through untouched
pub type Member = serde_json::Value;

/// Role granted by an organization invitation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationRole {
    Admin,
    #[default]
    DirectMember,
    BillingManager,
}

impl std::fmt::Display for InvitationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::DirectMember => write!(f, "direct_member"),
            Self::BillingManager => write!(f, "billing_manager"),
        }
    }
}

impl FromStr for InvitationRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "direct_member" => Ok(Self::DirectMember),
            "billing_manager" => Ok(Self::BillingManager),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// Request to invite a user into an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationRequest {
    pub org: String,
    pub invitee_id: u64,
    pub role: InvitationRole,
}

/// Invitation as returned by `POST /orgs/{org}/invitations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationInvitation {
    pub id: u64,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Directory client configuration
#[derive(Clone)]
pub struct DirectoryConfig {
    /// Backend provider (github, mock)
    pub provider: String,
    /// Bearer token; `None` sends unauthenticated requests
    pub token: Option<String>,
    /// REST API base URL
    pub base_url: String,
    /// Page size used when listing members
    pub per_page: u32,
    pub user_agent: String,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("provider", &self.provider)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("per_page", &self.per_page)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl DirectoryConfig {
    /// Derive the directory configuration from the application config
    pub fn from_config(config: &Config) -> Self {
        Self {
            provider: config.directory_provider.clone(),
            token: config.github_token.clone(),
            base_url: config.github_api_url.clone(),
            per_page: MAX_PAGE_SIZE,
            user_agent: format!("orgdesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Directory operations backed by a remote identity-and-membership service
#[async_trait::async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Look up a user by username
    async fn get_user(&self, username: &str) -> Result<GitHubUser, DirectoryError>;

    /// List every member of `org`, following pagination to the last page
    async fn list_org_members(&self, org: &str) -> Result<Vec<Member>, DirectoryError>;

    /// Invite the user identified by `request.invitee_id` into `request.org`
    async fn create_org_invitation(
        &self,
        request: InvitationRequest,
    ) -> Result<OrganizationInvitation, DirectoryError>;
}

/// Factory for creating DirectoryClient implementations
pub struct DirectoryClientFactory;

impl DirectoryClientFactory {
    pub fn create(config: DirectoryConfig) -> Result<Box<dyn DirectoryClient>, DirectoryError> {
        match config.provider.as_str() {
            "github" => {
                tracing::info!(base_url = %config.base_url, "Creating GitHub directory client");
                Ok(Box::new(GitHubClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock directory client");
                Ok(Box::new(MockDirectoryClient::new()))
            }
            provider => Err(DirectoryError::Configuration(format!(
                "Unknown directory provider: {}. Supported providers: github, mock",
                provider
            ))),
        }
    }
}
