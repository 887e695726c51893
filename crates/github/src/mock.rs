//! Mock Directory Client Implementation
//!
//! Programmable in-memory directory for local development and tests:
//! - `MockDirectoryClient`: serves users, paged members, and invitations
//! - `MockDirectoryBehavior`: controls the data and injected failures
//! - `RecordedCall`: every call the client received, in order

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};

use crate::{
    DirectoryClient, DirectoryError, GitHubUser, InvitationRequest, Member,
    OrganizationInvitation,
};

/// A call received by the mock, for test assertions
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetUser(String),
    ListMembers(String),
    CreateInvitation(InvitationRequest),
}

fn octocat() -> GitHubUser {
    GitHubUser {
        id: 583231,
        login: "octocat".to_string(),
        avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
    }
}

fn default_users() -> HashMap<String, GitHubUser> {
    let user = octocat();
    HashMap::from([(user.login.to_lowercase(), user)])
}

fn default_member_pages() -> Vec<Vec<Member>> {
    vec![vec![serde_json::json!({
        "login": "octocat",
        "id": 583231,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "type": "User",
        "site_admin": false
    })]]
}

/// Programmable behavior for the mock directory client
#[derive(Debug, Clone)]
pub struct MockDirectoryBehavior {
    /// Known users keyed by lowercased login
    pub users: Arc<RwLock<HashMap<String, GitHubUser>>>,
    /// Member pages, served in order and concatenated
    pub member_pages: Arc<RwLock<Vec<Vec<Member>>>>,
    pub lookup_failure: Arc<RwLock<Option<DirectoryError>>>,
    pub members_failure: Arc<RwLock<Option<DirectoryError>>>,
    pub invitation_failure: Arc<RwLock<Option<DirectoryError>>>,
    /// Fixed invitation timestamp; `None` uses the current time
    pub invited_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl Default for MockDirectoryBehavior {
    fn default() -> Self {
        Self {
            users: Arc::new(RwLock::new(default_users())),
            member_pages: Arc::new(RwLock::new(default_member_pages())),
            lookup_failure: Arc::new(RwLock::new(None)),
            members_failure: Arc::new(RwLock::new(None)),
            invitation_failure: Arc::new(RwLock::new(None)),
            invited_at: Arc::new(RwLock::new(None)),
        }
    }
}

impl MockDirectoryBehavior {
    /// Register a user that lookups will resolve
    pub fn add_user(&self, user: GitHubUser) {
        self.users
            .write()
            .unwrap()
            .insert(user.login.to_lowercase(), user);
    }

    /// Replace the member pages
    pub fn set_member_pages(&self, pages: Vec<Vec<Member>>) {
        *self.member_pages.write().unwrap() = pages;
    }

    /// Make every user lookup fail with `error`
    pub fn fail_lookups(&self, error: DirectoryError) {
        *self.lookup_failure.write().unwrap() = Some(error);
    }

    /// Make member listing fail with `error`
    pub fn fail_members(&self, error: DirectoryError) {
        *self.members_failure.write().unwrap() = Some(error);
    }

    /// Make invitation creation fail with `error`
    pub fn fail_invitations(&self, error: DirectoryError) {
        *self.invitation_failure.write().unwrap() = Some(error);
    }

    /// Pin the `created_at` of created invitations
    pub fn set_invited_at(&self, at: DateTime<Utc>) {
        *self.invited_at.write().unwrap() = Some(at);
    }
}

/// Mock directory client with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockDirectoryClient {
    behavior: Arc<MockDirectoryBehavior>,
    history: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared behavior for external configuration
    pub fn behavior(&self) -> &Arc<MockDirectoryBehavior> {
        &self.behavior
    }

    /// Get recorded calls
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.history.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.history.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl DirectoryClient for MockDirectoryClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser, DirectoryError> {
        self.record(RecordedCall::GetUser(username.to_string()));

        if let Some(err) = self.behavior.lookup_failure.read().unwrap().clone() {
            return Err(err);
        }

        self.behavior
            .users
            .read()
            .unwrap()
            .get(&username.to_lowercase())
            .cloned()
            .ok_or_else(DirectoryError::not_found)
    }

    async fn list_org_members(&self, org: &str) -> Result<Vec<Member>, DirectoryError> {
        self.record(RecordedCall::ListMembers(org.to_string()));

        if let Some(err) = self.behavior.members_failure.read().unwrap().clone() {
            return Err(err);
        }

        let pages = self.behavior.member_pages.read().unwrap().clone();
        tracing::info!(org = %org, pages = pages.len(), "Mock directory: listing members");
        Ok(pages.into_iter().flatten().collect())
    }

    async fn create_org_invitation(
        &self,
        request: InvitationRequest,
    ) -> Result<OrganizationInvitation, DirectoryError> {
        self.record(RecordedCall::CreateInvitation(request.clone()));

        if let Some(err) = self.behavior.invitation_failure.read().unwrap().clone() {
            return Err(err);
        }

        let login = self
            .behavior
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.id == request.invitee_id)
            .map(|u| u.login.clone());
        let created_at = self.behavior.invited_at.read().unwrap().unwrap_or_else(Utc::now);

        tracing::info!(org = %request.org, invitee_id = request.invitee_id, "Mock directory: invitation created");

        Ok(OrganizationInvitation {
            id: request.invitee_id,
            login,
            role: Some(request.role.to_string()),
            created_at,
        })
    }
}
