//! Observable application state types.

use matchbook_proto::MatchId;

/// The two logical views of the client.
///
/// This is the whole routing surface: the lobby at the root, and one
/// detail page per match id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The lobby: connection header, user line, open-match list.
    Lobby,
    /// Detail page for a single match.
    MatchDetail {
        /// Match the page refers to.
        match_id: MatchId,
    },
}
