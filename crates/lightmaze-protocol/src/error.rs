//! Error types for the protocol layer.

/// Errors that can occur while shaping or parsing wire data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed. Common causes: malformed JSON, missing
    /// required fields, or a truncated frame.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A maze cell code outside the known set (`0..=3`).
    #[error("invalid cell code: {0}")]
    InvalidCell(u8),

    /// The frame decoded but violates protocol rules.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
