//! `LightmazeServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → roles/game (through
//! the session actor).

use lightmaze_game::{GameConfig, StageSet};
use lightmaze_protocol::JsonCodec;

use crate::actor::{SessionHandle, spawn_session};
use crate::error::ServerError;
use crate::handler::handle_connection;
use crate::transport::WsListener;

/// Command channel size for the session actor. Intents past this bound
/// apply backpressure on the submitting connection tasks.
const SESSION_CHANNEL_SIZE: usize = 64;

/// Builder for configuring and starting a lightmaze server.
///
/// Defaults: loopback on port 8080, the builtin stage set, passive
/// hazards, and a two-up jump.
pub struct LightmazeServerBuilder {
    bind_addr: String,
    stages: StageSet,
    config: GameConfig,
}

impl LightmazeServerBuilder {
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            stages: StageSet::builtin(),
            config: GameConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Replaces the builtin stage content.
    pub fn stages(mut self, stages: StageSet) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the game rule configuration (hazard policy, jump offset).
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the listener and spawns the session actor.
    pub async fn build(self) -> Result<LightmazeServer, ServerError> {
        let listener = WsListener::bind(&self.bind_addr).await?;
        let session =
            spawn_session(self.stages, self.config, SESSION_CHANNEL_SIZE);
        Ok(LightmazeServer { listener, session })
    }
}

impl Default for LightmazeServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running lightmaze server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct LightmazeServer {
    listener: WsListener,
    session: SessionHandle,
}

impl LightmazeServer {
    /// Creates a new builder.
    pub fn builder() -> LightmazeServerBuilder {
        LightmazeServerBuilder::new()
    }

    /// The local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop: one handler task per connection. Runs until
    /// the process is terminated.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("lightmaze server running");

        loop {
            match self.listener.accept().await {
                Ok((client, ws)) => {
                    let session = self.session.clone();
                    tokio::spawn(async move {
                        if let Err(error) =
                            handle_connection(client, ws, session, JsonCodec)
                                .await
                        {
                            tracing::debug!(
                                %client,
                                %error,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(error) => {
                    tracing::error!(%error, "accept failed");
                }
            }
        }
    }
}
