//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.
//!
//! The GitHub token and organization are deliberately optional here: a
//! missing value shows up as a failed lookup when a request is served,
//! not as a startup error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default GitHub REST API base URL
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API token used for every outbound call
    pub github_token: Option<String>,

    /// Organization whose members are listed and invited
    pub github_org: Option<String>,

    /// GitHub REST API base URL (overridable for GitHub Enterprise or tests)
    pub github_api_url: String,

    /// Directory backend: `github` or `mock`
    pub directory_provider: String,

    /// Comma-separated list of allowed CORS origins
    pub cors_allowed_origins: Option<String>,

    /// Port for the local development server
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("github_org", &self.github_org)
            .field("github_api_url", &self.github_api_url)
            .field("directory_provider", &self.directory_provider)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let github_token = non_blank_var("GITHUB_TOKEN");
        let github_org = non_blank_var("GITHUB_ORG").or_else(|| non_blank_var("ORGANIZATION"));

        if github_token.is_none() {
            tracing::warn!("GITHUB_TOKEN is not set; GitHub calls will be unauthenticated");
        }
        if github_org.is_none() {
            tracing::warn!("GITHUB_ORG is not set; organization endpoints will fail");
        }

        let config = Self {
            github_token,
            github_org,
            github_api_url: non_blank_var("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            directory_provider: non_blank_var("DIRECTORY_PROVIDER")
                .unwrap_or_else(|| "github".to_string()),
            cors_allowed_origins: non_blank_var("CORS_ALLOWED_ORIGINS"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

/// Read an environment variable, treating empty or whitespace-only values as unset
fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
