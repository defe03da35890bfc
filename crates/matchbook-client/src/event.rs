//! Client events and actions.

use matchbook_proto::{ClientRequest, Envelope, ErrorPayload, MatchId, MatchSummary, UserProfile};

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Receiving frames from the socket
/// - Reporting socket lifecycle transitions
/// - Forwarding application intents (list, create, join)
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The socket finished opening.
    SocketOpened,

    /// The socket closed. The session does not recover; there is no
    /// reconnect.
    SocketClosed,

    /// Raw text frame received from the server.
    FrameReceived(String),

    /// Application wants the open-match list refreshed.
    RequestMatchList,

    /// Application wants a new match created.
    CreateMatch,

    /// Application wants to join an open match.
    JoinMatch {
        /// Match to join.
        match_id: MatchId,
    },
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Send an envelope to the server.
    Send(Envelope<ClientRequest>),

    /// The server identified this connection. Replaces any previous
    /// identity.
    SessionEstablished(UserProfile),

    /// The open-match list was replaced wholesale.
    MatchListReplaced(Vec<MatchSummary>),

    /// The server rejected a request.
    ServerRejected(ErrorPayload),

    /// Diagnostic for the caller's log.
    Log {
        /// Log message.
        message: String,
    },
}
