//! Client errors.

use matchbook_proto::DecodeError;
use thiserror::Error;

/// Errors surfaced by the client state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// A request was made while the socket was not open.
    ///
    /// Requests are rejected, not queued; the caller decides whether to
    /// retry after reconnecting.
    #[error("not connected to the lobby")]
    NotConnected,

    /// An inbound frame failed to decode.
    ///
    /// Unknown message types never reach this error; they are handled as
    /// an in-band no-op.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
