//! Route definitions for Directory domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{invitations, members, users};
use super::middleware::DirectoryState;

/// Create all Directory domain API routes
pub fn routes() -> Router<DirectoryState> {
    Router::new()
        .route("/api/getByUsername", post(users::get_by_username))
        .route(
            "/api/listMembers",
            get(members::list_members).post(members::list_members),
        )
        .route("/api/createInvitation", post(invitations::create_invitation))
}
