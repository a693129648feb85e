//! Unified error type for the lightmaze server.

use lightmaze_game::GameError;
use lightmaze_protocol::ProtocolError;
use lightmaze_roles::RoleError;

/// Errors from the connection layer (bind, accept, socket I/O).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding or accepting a TCP connection failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// The WebSocket upgrade handshake failed.
    #[error("websocket handshake failed: {0}")]
    HandshakeFailed(String),

    /// Reading a frame from an established connection failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Top-level error that wraps all layer-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls, so
/// `?` converts layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A connection-level error (bind, accept, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A wire-level error (encode, decode, invalid frame).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A role-claim error (taken, not holder).
    #[error(transparent)]
    Role(#[from] RoleError),

    /// A game-rule error (unknown role, not permitted, bad stage index).
    #[error(transparent)]
    Game(#[from] GameError),
}
