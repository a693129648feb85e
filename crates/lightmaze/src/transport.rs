//! WebSocket listener (tokio-tungstenite).
//!
//! Thin layer: accept TCP, upgrade to WebSocket, hand out a stream tagged
//! with a fresh [`ClientId`]. Frame pumping lives in the connection
//! handler.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use lightmaze_protocol::ClientId;
use tokio::net::TcpListener;

use crate::TransportError;

/// Counter for generating unique client IDs.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) type WsStream =
    tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

/// Listens for incoming WebSocket connections.
pub(crate) struct WsListener {
    listener: TcpListener,
}

impl WsListener {
    /// Binds to the given address.
    pub(crate) async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket listener bound");
        Ok(Self { listener })
    }

    /// The local address the listener is bound to. Useful when binding to
    /// port 0 in tests.
    pub(crate) fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for the next connection and completes the WebSocket upgrade.
    pub(crate) async fn accept(
        &self,
    ) -> Result<(ClientId, WsStream), TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| TransportError::HandshakeFailed(e.to_string()))?;

        let client =
            ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%client, %addr, "accepted WebSocket connection");

        Ok((client, ws))
    }
}
