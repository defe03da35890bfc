//! Wire protocol for the Matchbook lobby.
//!
//! Every frame on the socket is a UTF-8 JSON envelope:
//! `{ "type": <tag>, "data"?: <payload>, "seq"?: <n> }`. The tag/payload
//! pair is modeled as a tagged union per direction ([`ClientRequest`]
//! outbound, [`ServerMessage`] inbound) so the catalog is exhaustive at
//! compile time rather than a string-keyed dispatch table.
//!
//! # Components
//!
//! - [`Envelope`]: the frame wrapper and its codec
//! - [`ClientRequest`] / [`ServerMessage`]: the message catalogs
//! - [`DecodeError`]: the three-way inbound failure taxonomy
//!   (malformed / unknown type / invalid payload)
//!
//! # Invariants
//!
//! Each variant maps to exactly one wire tag (enforced by match
//! exhaustiveness). Round-trip encoding must produce identical values.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod envelope;
mod errors;
mod message;
mod model;

pub use envelope::Envelope;
pub use errors::{DecodeError, EncodeError};
pub use message::{ClientRequest, ErrorPayload, MessageCatalog, ServerMessage};
pub use model::{MatchId, MatchSummary, UserId, UserProfile};
