//! Protocol error taxonomy.
//!
//! Inbound failures are classified three ways so callers can react
//! differently: a malformed frame is a hard error, an unknown type is an
//! ignorable no-op, and a bad payload for a known type is a hard error
//! naming the type.

use thiserror::Error;

/// Errors produced when decoding an inbound frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The frame is not a JSON object carrying a string `type` field.
    #[error("malformed frame: {reason}")]
    Malformed {
        /// Parser diagnostic.
        reason: String,
    },

    /// The declared `type` is not in the known catalog.
    #[error("unknown message type `{message_type}`")]
    UnknownType {
        /// The unrecognized wire tag.
        message_type: String,
    },

    /// The `type` is known but `data` does not match its schema.
    #[error("invalid payload for `{message_type}`: {reason}")]
    InvalidPayload {
        /// The wire tag whose payload failed to decode.
        message_type: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl DecodeError {
    /// Whether this failure is an ignorable no-op rather than a hard error.
    ///
    /// Unknown message types leave all state unchanged by contract; the
    /// other two variants indicate a frame that claimed to be something it
    /// is not.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }
}

/// Error produced when encoding an outbound frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to encode frame: {reason}")]
pub struct EncodeError {
    /// Serializer diagnostic.
    pub reason: String,
}
