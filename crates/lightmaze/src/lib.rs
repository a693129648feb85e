//! # lightmaze
//!
//! Authoritative server for a cooperative maze game. Several clients, each
//! bound to an exclusive role, jointly steer one player token through a
//! sequence of mazes: the guide sees the walls but cannot move, each mover
//! owns exactly one direction but sees no walls, and an optional admin can
//! jump the session between stages.
//!
//! The server holds the single session behind an actor task; connections
//! speak the JSON event protocol from `lightmaze-protocol` over WebSocket.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use lightmaze::LightmazeServerBuilder;
//!
//! # async fn run() -> Result<(), lightmaze::ServerError> {
//! let server = LightmazeServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod actor;
mod error;
mod handler;
mod server;
mod transport;

pub use error::{ServerError, TransportError};
pub use server::{LightmazeServer, LightmazeServerBuilder};
