//! HTTP layer for the directory domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::{DirectorySettings, DirectoryState};
pub use routes::routes;
