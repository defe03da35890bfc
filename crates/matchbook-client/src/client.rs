//! Connection/dispatch state machine.
//!
//! The `Client` is the single owner of [`ConnectionState`] and of every
//! protocol decision: gating requests on the connection, the eager
//! match-list request when the socket opens, request/response correlation,
//! and dispatch of inbound frames to typed handlers.

use matchbook_proto::{ClientRequest, Envelope, MatchId, MatchSummary, ServerMessage};

use crate::{
    error::ClientError,
    event::{ClientAction, ClientEvent},
};

/// Lifecycle of the single lobby socket.
///
/// Owned exclusively by the [`Client`]; the UI reads it through events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected to the lobby.
    #[default]
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Socket open; requests may be sent.
    Connected,
}

/// Client state machine for the lobby protocol.
///
/// Pure state machine: it consumes [`ClientEvent`] inputs and produces
/// [`ClientAction`] instructions for the caller to execute. No I/O
/// dependencies, fully testable without a socket.
#[derive(Debug, Clone, Default)]
pub struct Client {
    /// Connection state.
    state: ConnectionState,
    /// Source for correlation numbers, monotonically increasing.
    next_seq: u64,
    /// Correlation number of the most recently issued `ListMatches`.
    /// Only the response echoing this number may replace the list.
    latest_list_seq: Option<u64>,
}

impl Client {
    /// Create a new client in disconnected state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Whether requests may currently be sent.
    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected)
    }

    /// Mark a connection attempt as started.
    pub fn connecting(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::SocketOpened => Ok(self.handle_socket_opened()),
            ClientEvent::SocketClosed => Ok(self.handle_socket_closed()),
            ClientEvent::FrameReceived(raw) => self.handle_frame(&raw),
            ClientEvent::RequestMatchList => self.handle_request_match_list(),
            ClientEvent::CreateMatch => self.handle_create_match(),
            ClientEvent::JoinMatch { match_id } => self.handle_join_match(match_id),
        }
    }

    /// Handle socket open: transition, then eagerly request the match list.
    ///
    /// The transition happens before the request is emitted, so the send is
    /// issued from the Connected state.
    fn handle_socket_opened(&mut self) -> Vec<ClientAction> {
        self.state = ConnectionState::Connected;

        let seq = self.issue_list_seq();
        vec![ClientAction::Send(Envelope::with_seq(ClientRequest::ListMatches, seq))]
    }

    /// Handle socket close: no reconnect, in-flight correlation is void.
    fn handle_socket_closed(&mut self) -> Vec<ClientAction> {
        self.state = ConnectionState::Disconnected;
        self.latest_list_seq = None;

        vec![ClientAction::Log { message: "lobby connection closed".to_owned() }]
    }

    fn handle_request_match_list(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        self.ensure_connected()?;

        let seq = self.issue_list_seq();
        Ok(vec![ClientAction::Send(Envelope::with_seq(ClientRequest::ListMatches, seq))])
    }

    fn handle_create_match(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        self.ensure_connected()?;

        // Fire-and-forget: the server answers CreateMatch with nothing, the
        // new match shows up on the next list.
        Ok(vec![ClientAction::Send(Envelope::new(ClientRequest::CreateMatch))])
    }

    fn handle_join_match(&mut self, match_id: MatchId) -> Result<Vec<ClientAction>, ClientError> {
        self.ensure_connected()?;

        Ok(vec![ClientAction::Send(Envelope::new(ClientRequest::JoinMatch(match_id)))])
    }

    /// Dispatch an inbound frame.
    ///
    /// Unknown message types leave all state unchanged and surface as a
    /// log line. Malformed frames and bad payloads for known types are
    /// typed errors.
    fn handle_frame(&mut self, raw: &str) -> Result<Vec<ClientAction>, ClientError> {
        let envelope = match Envelope::<ServerMessage>::decode(raw) {
            Ok(envelope) => envelope,
            Err(err) if err.is_ignorable() => {
                return Ok(vec![ClientAction::Log { message: format!("ignoring frame: {err}") }]);
            },
            Err(err) => return Err(ClientError::Decode(err)),
        };

        match envelope.message {
            ServerMessage::LoginResponse(user) => {
                Ok(vec![ClientAction::SessionEstablished(user)])
            },
            ServerMessage::ListMatchesResponse(matches) => {
                Ok(self.handle_list_response(envelope.seq, matches))
            },
            ServerMessage::Error(error) => Ok(vec![ClientAction::ServerRejected(error)]),
        }
    }

    /// Apply a match-list response, discarding stale correlated responses.
    ///
    /// A response without `seq` comes from a server that does not
    /// correlate; it is accepted verbatim (last arrival wins, the observed
    /// behavior).
    fn handle_list_response(
        &mut self,
        seq: Option<u64>,
        matches: Vec<MatchSummary>,
    ) -> Vec<ClientAction> {
        if let Some(got) = seq
            && self.latest_list_seq != Some(got)
        {
            return vec![ClientAction::Log {
                message: format!(
                    "discarding stale match list (response seq {got}, latest request {:?})",
                    self.latest_list_seq
                ),
            }];
        }

        vec![ClientAction::MatchListReplaced(matches)]
    }

    fn ensure_connected(&self) -> Result<(), ClientError> {
        if self.is_connected() { Ok(()) } else { Err(ClientError::NotConnected) }
    }

    /// Issue a fresh correlation number for a `ListMatches` request.
    fn issue_list_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.latest_list_seq = Some(self.next_seq);
        self.next_seq
    }
}
