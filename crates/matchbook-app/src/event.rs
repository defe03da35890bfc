//! Application input events.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize) and system ticks.
//! - Protocol notifications translated from the underlying client.

use matchbook_proto::{MatchSummary, UserProfile};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection in progress.
    Connecting,

    /// Connected to the lobby.
    Connected,

    /// Connection lost. The session does not recover.
    Disconnected,

    /// The server identified this connection.
    SessionEstablished(UserProfile),

    /// The open-match list was replaced wholesale.
    MatchListReplaced(Vec<MatchSummary>),

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
