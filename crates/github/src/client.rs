//! GitHub REST API Implementation
//!
//! Calls `api.github.com` (or a configured GitHub Enterprise base URL)
//! using reqwest. Error bodies are reduced to a single message here so
//! nothing above this layer has to understand GitHub's error format.

use std::collections::HashSet;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::pagination::parse_link_header;
use crate::{
    DirectoryClient, DirectoryConfig, DirectoryError, GitHubUser, InvitationRequest,
    InvitationRole, Member, OrganizationInvitation, MAX_PAGE_SIZE,
};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// `POST /orgs/{org}/invitations` request body
#[derive(Debug, Serialize)]
struct CreateInvitationBody {
    invitee_id: u64,
    role: InvitationRole,
}

/// GitHub REST directory client
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    per_page: u32,
}

impl GitHubClient {
    /// Create a new GitHub client from configuration
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DirectoryError::Configuration(format!(
                "Invalid GitHub API URL '{}': {}",
                config.base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::Configuration(format!(
                "GitHub API URL cannot be a base: {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                DirectoryError::Configuration(format!("Invalid user agent: {}", e))
            })?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                DirectoryError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url,
            token: config.token,
            per_page: config.per_page.clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// Build an endpoint URL from path segments; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DirectoryError::Configuration("GitHub API URL cannot be a base".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Whether `link` points at the configured API host
    fn is_api_link(&self, link: &str) -> bool {
        Url::parse(link)
            .map(|url| url.origin() == self.base_url.origin())
            .unwrap_or(false)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, DirectoryError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        let message = extract_error_message(status.as_u16(), &body);

        tracing::debug!(status = status.as_u16(), message = %message, "GitHub API returned an error");

        Err(DirectoryError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DirectoryError> {
        response
            .json()
            .await
            .map_err(|e| DirectoryError::Response(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait::async_trait]
impl DirectoryClient for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser, DirectoryError> {
        if username.is_empty() {
            return Err(DirectoryError::InvalidInput(
                "Missing username".to_string(),
            ));
        }

        let url = self.endpoint(&["users", username])?;
        tracing::debug!(username = %username, "Looking up GitHub user");

        let response = self.send(self.http.get(url)).await?;
        Self::decode(response).await
    }

    async fn list_org_members(&self, org: &str) -> Result<Vec<Member>, DirectoryError> {
        let mut url = self.endpoint(&["orgs", org, "members"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());

        let mut members = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(url.to_string());
        let mut page = 0usize;

        while let Some(current) = next.take() {
            if !visited.insert(current.clone()) {
                tracing::warn!(org = %org, url = %current, "Pagination loop detected, stopping");
                break;
            }
            page += 1;

            let response = self.send(self.http.get(&current)).await?;
            next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .map(parse_link_header)
                .and_then(|links| links.next);

            if let Some(link) = next.as_deref() {
                if !self.is_api_link(link) {
                    tracing::warn!(org = %org, url = %link, "Pagination link leaves the GitHub API host");
                    return Err(DirectoryError::Response(format!(
                        "Pagination link outside the API host: {}",
                        link
                    )));
                }
            }

            let batch: Vec<Member> = Self::decode(response).await?;
            tracing::debug!(org = %org, page, count = batch.len(), "Fetched member page");
            members.extend(batch);
        }

        tracing::info!(org = %org, pages = page, total = members.len(), "Listed organization members");
        Ok(members)
    }

    async fn create_org_invitation(
        &self,
        request: InvitationRequest,
    ) -> Result<OrganizationInvitation, DirectoryError> {
        let url = self.endpoint(&["orgs", &request.org, "invitations"])?;
        let body = CreateInvitationBody {
            invitee_id: request.invitee_id,
            role: request.role,
        };

        tracing::debug!(org = %request.org, invitee_id = request.invitee_id, role = %request.role, "Creating organization invitation");

        let response = self.send(self.http.post(url).json(&body)).await?;
        Self::decode(response).await
    }
}

/// Reduce a GitHub error body to one message.
///
/// Preference order: the first entry of `errors[]` (an object with `message`
/// or a bare string), then the top-level `message`, then a generic fallback.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let fallback = || format!("GitHub API returned {}", status);

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    let detail = value
        .get("errors")
        .and_then(|errors| errors.as_array())
        .and_then(|errors| {
            errors.iter().find_map(|e| {
                e.get("message")
                    .and_then(|m| m.as_str())
                    .or_else(|| e.as_str())
            })
        });

    detail
        .or_else(|| value.get("message").and_then(|m| m.as_str()))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(fallback)
}
