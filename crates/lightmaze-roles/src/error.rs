//! Error types for the role layer.

use lightmaze_protocol::{ClientId, Role};

/// Errors that can occur while claiming or releasing roles.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    /// The role is held by another client. Surfaced to the requester as a
    /// `role-taken` notice naming the contested role.
    #[error("role {0} is already claimed")]
    RoleAlreadyClaimed(Role),

    /// The client already holds a different role and must release it
    /// before claiming another.
    #[error("client {client} already holds role {held}")]
    RoleAlreadyHeld { client: ClientId, held: Role },

    /// The client tried to release a role it does not hold.
    #[error("client {client} does not hold role {role}")]
    NotHolder { client: ClientId, role: Role },
}
