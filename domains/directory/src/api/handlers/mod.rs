pub mod invitations;
pub mod members;
pub mod users;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Message returned whenever a request lacks a usable `username`
pub const MISSING_USERNAME: &str = "Missing username";

/// Deserialize an optional username.
///
/// Blank strings and non-string values are treated as absent, so a bad
/// `username` never discards the rest of the body.
pub(crate) fn trimmed_username<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    })
}
