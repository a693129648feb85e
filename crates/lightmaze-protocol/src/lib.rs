//! Wire protocol for lightmaze.
//!
//! This crate defines the "language" that maze clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`Role`], [`Cell`], etc.) —
//!   the structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! Event tags and payload field names follow the browser client's vocabulary
//! (`join-as`, `game-state`, `playerPosition`), so a frame logged on either
//! side reads the same.
//!
//! The protocol layer sits below role claims and game state. It knows nothing
//! about connections or sessions, only how messages are shaped.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Cell, ClientEvent, ClientId, Direction, Position, Role, ServerEvent,
};
