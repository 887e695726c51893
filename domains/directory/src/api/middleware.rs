//! Directory domain state

use std::sync::Arc;

use orgdesk_common::{Config, Error, Result};
use orgdesk_github::DirectoryClient;

/// Message GitHub answers for an unknown organization
const ORGANIZATION_NOT_FOUND: &str = "Not Found";

/// Read-only settings shared by every request
#[derive(Debug, Clone, Default)]
pub struct DirectorySettings {
    /// Organization to list and invite into
    pub organization: Option<String>,
}

impl DirectorySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            organization: config.github_org.clone(),
        }
    }
}

/// Application state for the Directory domain
#[derive(Clone)]
pub struct DirectoryState {
    pub client: Arc<dyn DirectoryClient>,
    pub settings: Arc<DirectorySettings>,
}

impl DirectoryState {
    pub fn new(client: Arc<dyn DirectoryClient>, settings: DirectorySettings) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
        }
    }

    /// The configured organization.
    ///
    /// Absence is reported per request as the lookup failure GitHub gives for
    /// an unknown organization.
    pub fn organization(&self) -> Result<&str> {
        self.settings.organization.as_deref().ok_or_else(|| {
            tracing::warn!("GitHub organization is not configured; set GITHUB_ORG");
            Error::NotFound(ORGANIZATION_NOT_FOUND.to_string())
        })
    }
}
