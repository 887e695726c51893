//! Shared utilities, configuration, and error handling for Orgdesk
//!
//! This crate provides common functionality used across the Orgdesk application:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors that never reject a body outright

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{first_validation_message, Error, Result};
pub use extractors::LenientJson;
