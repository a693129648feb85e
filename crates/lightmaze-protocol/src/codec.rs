//! Codec trait and implementations for serializing/deserializing events.
//!
//! The rest of the server never calls `serde_json` directly; it goes through
//! the [`Codec`] trait. Swapping in a binary codec later means implementing
//! this trait, nothing else changes.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes wire types to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is shared across connection
/// handler tasks for the life of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON via `serde_json`.
///
/// JSON keeps frames inspectable in browser DevTools, which matters more
/// here than frame size: a full maze snapshot is a few hundred bytes.
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use lightmaze_protocol::{Codec, ClientEvent, Direction, JsonCodec};
///
/// let codec = JsonCodec;
/// let event = ClientEvent::Move { direction: Direction::Up };
///
/// let bytes = codec.encode(&event).unwrap();
/// let decoded: ClientEvent = codec.decode(&bytes).unwrap();
/// assert_eq!(event, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
