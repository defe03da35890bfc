//! Protocol-to-Application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`matchbook_client::Client`] and
//! adapts it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`AppAction`]s into client events.
//! - Accumulates outgoing envelopes to be sent by the runtime in the next
//!   I/O cycle.
//! - Interprets client actions and converts them back into [`AppEvent`]s
//!   to update the UI.

use matchbook_client::{Client, ClientAction, ClientEvent, ConnectionState};
use matchbook_proto::{ClientRequest, Envelope};

use crate::{AppAction, AppEvent};

/// Bridge between App and client protocol logic.
#[derive(Debug, Default)]
pub struct Bridge {
    client: Client,
    outgoing: Vec<Envelope<ClientRequest>>,
}

impl Bridge {
    /// Create a new Bridge around a fresh client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection state as the client sees it.
    pub fn connection_state(&self) -> ConnectionState {
        self.client.connection_state()
    }

    /// Mark the connection attempt as started.
    pub fn connecting(&mut self) -> Vec<AppEvent> {
        self.client.connecting();
        vec![AppEvent::Connecting]
    }

    /// The socket finished opening.
    ///
    /// The Connected event precedes whatever the eager list request
    /// produces, so the UI flips state before the send is visible.
    pub fn socket_opened(&mut self) -> Vec<AppEvent> {
        let mut events = vec![AppEvent::Connected];
        events.extend(self.dispatch(ClientEvent::SocketOpened));
        events
    }

    /// The socket closed.
    pub fn socket_closed(&mut self) -> Vec<AppEvent> {
        let mut events = vec![AppEvent::Disconnected];
        events.extend(self.dispatch(ClientEvent::SocketClosed));
        events
    }

    /// Handle a raw frame from the server.
    pub fn handle_frame(&mut self, raw: String) -> Vec<AppEvent> {
        self.dispatch(ClientEvent::FrameReceived(raw))
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::RefreshMatches => self.dispatch(ClientEvent::RequestMatchList),
            AppAction::CreateMatch => self.dispatch(ClientEvent::CreateMatch),
            AppAction::JoinMatch { match_id } => {
                self.dispatch(ClientEvent::JoinMatch { match_id })
            },
            AppAction::Render | AppAction::Quit => vec![],
        }
    }

    /// Take pending outgoing envelopes.
    pub fn take_outgoing(&mut self) -> Vec<Envelope<ClientRequest>> {
        std::mem::take(&mut self.outgoing)
    }

    fn dispatch(&mut self, event: ClientEvent) -> Vec<AppEvent> {
        match self.client.handle(event) {
            Ok(actions) => self.process_client_actions(actions),
            Err(e) => vec![AppEvent::Error { message: e.to_string() }],
        }
    }

    fn process_client_actions(&mut self, actions: Vec<ClientAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ClientAction::Send(envelope) => {
                    self.outgoing.push(envelope);
                },
                ClientAction::SessionEstablished(user) => {
                    events.push(AppEvent::SessionEstablished(user));
                },
                ClientAction::MatchListReplaced(matches) => {
                    events.push(AppEvent::MatchListReplaced(matches));
                },
                ClientAction::ServerRejected(error) => {
                    events.push(AppEvent::Error { message: error.message });
                },
                ClientAction::Log { message } => {
                    tracing::debug!(%message, "client");
                },
            }
        }

        events
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use matchbook_proto::{MatchSummary, ServerMessage, UserProfile};

    use super::*;

    fn frame(message: ServerMessage, seq: Option<u64>) -> String {
        Envelope { message, seq }.encode().unwrap()
    }

    #[test]
    fn socket_opened_connects_before_requesting() {
        let mut bridge = Bridge::new();
        let events = bridge.socket_opened();

        assert!(matches!(events.first(), Some(AppEvent::Connected)));
        assert_eq!(bridge.connection_state(), ConnectionState::Connected);

        let outgoing = bridge.take_outgoing();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].message, ClientRequest::ListMatches);
    }

    #[test]
    fn rejected_action_surfaces_as_error_event() {
        let mut bridge = Bridge::new();

        let events = bridge.process_app_action(AppAction::CreateMatch);
        assert!(matches!(events.as_slice(), [AppEvent::Error { .. }]));
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn frames_translate_to_app_events() {
        let mut bridge = Bridge::new();
        let _ = bridge.socket_opened();
        let _ = bridge.take_outgoing();

        let events = bridge.handle_frame(frame(
            ServerMessage::LoginResponse(UserProfile::new("u1", "Alice")),
            None,
        ));
        assert!(matches!(events.as_slice(), [AppEvent::SessionEstablished(u)]
            if u.name == "Alice"));

        let listing = vec![MatchSummary::new("m1", UserProfile::new("u2", "Bob"))];
        let events = bridge.handle_frame(frame(
            ServerMessage::ListMatchesResponse(listing),
            None,
        ));
        assert!(matches!(events.as_slice(), [AppEvent::MatchListReplaced(m)] if m.len() == 1));
    }

    #[test]
    fn malformed_frame_surfaces_as_error_event() {
        let mut bridge = Bridge::new();
        let _ = bridge.socket_opened();

        let events = bridge.handle_frame("{not json".to_owned());
        assert!(matches!(events.as_slice(), [AppEvent::Error { .. }]));
    }
}
