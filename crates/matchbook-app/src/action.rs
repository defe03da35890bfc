//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents
//! instructions produced by the [`crate::App`] state machine for the
//! runtime to execute.

use matchbook_proto::MatchId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Refresh the open-match list.
    RefreshMatches,

    /// Create a new match.
    CreateMatch,

    /// Join an open match.
    JoinMatch {
        /// Match to join.
        match_id: MatchId,
    },
}
