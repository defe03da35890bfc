//! Lobby data types shared by both directions of the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque match identifier.
///
/// Ids are assigned by the server and never interpreted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    /// Create a match id from its wire representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id from its wire representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A lobby user: the connection identity or a match participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user id.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl UserProfile {
    /// Create a profile from an id and display name.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// One match as listed by the lobby.
///
/// The list is replaced wholesale on every `ListMatchesResponse`; summaries
/// are never merged or deduplicated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Match id, used to open the detail view and to join.
    pub id: MatchId,
    /// The user who created the match.
    pub player1: UserProfile,
    /// The second player. Present means the match is full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2: Option<UserProfile>,
}

impl MatchSummary {
    /// Create an open match summary (no second player yet).
    pub fn new(id: impl Into<MatchId>, player1: UserProfile) -> Self {
        Self { id: id.into(), player1, player2: None }
    }

    /// Whether the match still has a free seat.
    pub fn is_open(&self) -> bool {
        self.player2.is_none()
    }
}
