//! Orgdesk API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use orgdesk_app::{body_limit_layer, build_cors_layer, create_app};
use orgdesk_common::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Orgdesk API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let app = create_app(&config)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let cors_origins = config.cors_allowed_origins.clone().unwrap_or_default();

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&cors_origins))
        .layer(body_limit_layer());

    info!("Orgdesk API Lambda ready to serve requests");

    run(app).await
}
