//! Orgdesk application composition root
//!
//! Composes the directory routes with shared infrastructure routes and layers.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use orgdesk_common::Config;
use orgdesk_directory::{DirectorySettings, DirectoryState};
use orgdesk_github::{DirectoryClient, DirectoryClientFactory, DirectoryConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

/// Largest accepted request body; every endpoint takes at most a username and role
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router from configuration
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let client = DirectoryClientFactory::create(DirectoryConfig::from_config(config))
        .map_err(|e| anyhow::anyhow!("Directory client initialization failed: {}", e))?;

    Ok(create_app_with_client(
        Arc::from(client),
        DirectorySettings::from_config(config),
    ))
}

/// Create the router around an existing directory client
pub fn create_app_with_client(
    client: Arc<dyn DirectoryClient>,
    settings: DirectorySettings,
) -> Router {
    let directory_state = DirectoryState::new(client, settings);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Orgdesk API v0.0.1-SNAPSHOT" }),
        )
        .merge(orgdesk_directory::routes().with_state(directory_state))
}

/// Build a CORS layer from a comma-separated origin list.
///
/// `*` allows any origin; unparsable entries are skipped with a warning.
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.split(',').any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed)
}

/// Reject oversized request bodies
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
