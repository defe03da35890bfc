//! Message catalogs for both directions of the wire.
//!
//! Requests and responses are adjacently tagged (`type`/`data`), matching
//! the observed lobby protocol. Adding a variant forces updates in
//! `message_type()` and the [`MessageCatalog`] tag list, so a new message
//! is a compile-time consideration rather than a silent runtime no-op.

use serde::{Deserialize, Serialize};

use crate::model::{MatchId, MatchSummary, UserProfile};

/// Compile-time list of the wire `type` tags a message family understands.
///
/// Envelope decoding uses this to distinguish an unknown message type from
/// a known type carrying a bad payload.
pub trait MessageCatalog {
    /// The wire tags of every variant, in declaration order.
    const TYPES: &'static [&'static str];
}

/// Requests the client sends to the lobby server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientRequest {
    /// Ask for the current list of open matches. Carries no payload.
    ListMatches,
    /// Create a new match owned by the requesting user. Carries no payload.
    CreateMatch,
    /// Join an open match as its second player.
    JoinMatch(MatchId),
}

impl ClientRequest {
    /// Wire tag corresponding to this request.
    pub const fn message_type(&self) -> &'static str {
        match self {
            Self::ListMatches => "ListMatches",
            Self::CreateMatch => "CreateMatch",
            Self::JoinMatch(_) => "JoinMatch",
        }
    }
}

impl MessageCatalog for ClientRequest {
    const TYPES: &'static [&'static str] = &["ListMatches", "CreateMatch", "JoinMatch"];
}

/// Messages the lobby server pushes to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Identity the server assigned to this connection.
    LoginResponse(UserProfile),
    /// Wholesale replacement of the open-match list.
    ListMatchesResponse(Vec<MatchSummary>),
    /// A request was rejected by the server.
    Error(ErrorPayload),
}

impl ServerMessage {
    /// Wire tag corresponding to this message.
    pub const fn message_type(&self) -> &'static str {
        match self {
            Self::LoginResponse(_) => "LoginResponse",
            Self::ListMatchesResponse(_) => "ListMatchesResponse",
            Self::Error(_) => "Error",
        }
    }
}

impl MessageCatalog for ServerMessage {
    const TYPES: &'static [&'static str] = &["LoginResponse", "ListMatchesResponse", "Error"];
}

/// Payload of a server `Error` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error code identifying the type of error.
    pub code: u16,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorPayload {
    /// Request was rejected by the server.
    pub const REQUEST_REJECTED: u16 = 0x0001;
    /// Match does not exist or is already full.
    pub const MATCH_NOT_FOUND: u16 = 0x0002;
    /// The connection has no known user.
    pub const USER_NOT_FOUND: u16 = 0x0003;

    /// Create a request rejection error.
    pub fn request_rejected(reason: impl Into<String>) -> Self {
        Self { code: Self::REQUEST_REJECTED, message: reason.into() }
    }

    /// Create a match not found error.
    pub fn match_not_found(match_id: &MatchId) -> Self {
        Self { code: Self::MATCH_NOT_FOUND, message: format!("match not found: {match_id}") }
    }

    /// Create an unknown user error.
    pub fn user_not_found() -> Self {
        Self { code: Self::USER_NOT_FOUND, message: "no such user".to_owned() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_tags_match_catalog() {
        let requests = [
            ClientRequest::ListMatches,
            ClientRequest::CreateMatch,
            ClientRequest::JoinMatch(MatchId::from("m1")),
        ];
        for request in requests {
            assert!(ClientRequest::TYPES.contains(&request.message_type()));
        }
    }

    #[test]
    fn server_tags_match_catalog() {
        let messages = [
            ServerMessage::LoginResponse(UserProfile::new("u1", "Alice")),
            ServerMessage::ListMatchesResponse(Vec::new()),
            ServerMessage::Error(ErrorPayload::user_not_found()),
        ];
        for message in messages {
            assert!(ServerMessage::TYPES.contains(&message.message_type()));
        }
    }

    #[test]
    fn serialized_tag_matches_message_type() {
        let request = ClientRequest::JoinMatch(MatchId::from("m1"));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], request.message_type());
        assert_eq!(value["data"], "m1");
    }
}
