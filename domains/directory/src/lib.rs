//! Directory domain: user lookup, member listing, organization invitations

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{InvitationResult, UserSummary};
pub use domain::errors::normalize;
pub use domain::resolution::resolve_user;
pub use domain::state::{
    InvitationEvent, InvitationFlow, InvitationState, InvitationStateMachine, StateError,
};

// Re-export API types
pub use api::routes;
pub use api::{DirectorySettings, DirectoryState};
