//! Integration tests for the full client session flow.
//!
//! Drives the state machine through a complete lobby session the way the
//! runtime would: socket lifecycle events, server frames, and application
//! intents, asserting on the produced actions at each step.

use matchbook_client::{Client, ClientAction, ClientError, ClientEvent, ConnectionState};
use matchbook_proto::{
    ClientRequest, Envelope, ErrorPayload, MatchSummary, ServerMessage, UserProfile,
};

/// Serialize a server message the way the lobby would send it.
fn server_frame(message: ServerMessage, seq: Option<u64>) -> String {
    Envelope { message, seq }.encode().unwrap()
}

/// Extract the envelopes of all Send actions.
fn sends(actions: &[ClientAction]) -> Vec<Envelope<ClientRequest>> {
    actions
        .iter()
        .filter_map(|a| match a {
            ClientAction::Send(envelope) => Some(envelope.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn full_session_flow() {
    let mut client = Client::new();
    client.connecting();
    assert_eq!(client.connection_state(), ConnectionState::Connecting);

    // Socket opens: exactly one eager list request, sent from Connected.
    let actions = client.handle(ClientEvent::SocketOpened).unwrap();
    assert_eq!(client.connection_state(), ConnectionState::Connected);
    let outgoing = sends(&actions);
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].message, ClientRequest::ListMatches);
    let eager_seq = outgoing[0].seq.unwrap();

    // Server logs us in.
    let login = server_frame(
        ServerMessage::LoginResponse(UserProfile::new("u1", "Alice")),
        None,
    );
    let actions = client.handle(ClientEvent::FrameReceived(login)).unwrap();
    assert_eq!(
        actions,
        vec![ClientAction::SessionEstablished(UserProfile::new("u1", "Alice"))]
    );

    // Server answers the eager request.
    let listing = vec![MatchSummary::new("m1", UserProfile::new("u2", "Bob"))];
    let response = server_frame(
        ServerMessage::ListMatchesResponse(listing.clone()),
        Some(eager_seq),
    );
    let actions = client.handle(ClientEvent::FrameReceived(response)).unwrap();
    assert_eq!(actions, vec![ClientAction::MatchListReplaced(listing)]);

    // Create a match, then join one.
    let actions = client.handle(ClientEvent::CreateMatch).unwrap();
    assert_eq!(sends(&actions), vec![Envelope::new(ClientRequest::CreateMatch)]);

    let actions = client.handle(ClientEvent::JoinMatch { match_id: "m1".into() }).unwrap();
    assert_eq!(
        sends(&actions),
        vec![Envelope::new(ClientRequest::JoinMatch("m1".into()))]
    );

    // Socket closes: disconnected, everything rejected from here on.
    let _ = client.handle(ClientEvent::SocketClosed).unwrap();
    assert_eq!(client.connection_state(), ConnectionState::Disconnected);
    assert_eq!(
        client.handle(ClientEvent::CreateMatch),
        Err(ClientError::NotConnected)
    );
}

#[test]
fn refresh_supersedes_earlier_request() {
    let mut client = Client::new();
    let opened = client.handle(ClientEvent::SocketOpened).unwrap();
    let first_seq = sends(&opened)[0].seq.unwrap();

    let refreshed = client.handle(ClientEvent::RequestMatchList).unwrap();
    let second_seq = sends(&refreshed)[0].seq.unwrap();
    assert!(second_seq > first_seq);

    // The answer to the first request is now stale.
    let stale = server_frame(
        ServerMessage::ListMatchesResponse(vec![MatchSummary::new(
            "old",
            UserProfile::new("u9", "Zoe"),
        )]),
        Some(first_seq),
    );
    let actions = client.handle(ClientEvent::FrameReceived(stale)).unwrap();
    assert!(actions.iter().all(|a| !matches!(a, ClientAction::MatchListReplaced(_))));

    // The answer to the refresh is applied.
    let fresh_listing = vec![MatchSummary::new("new", UserProfile::new("u2", "Bob"))];
    let fresh = server_frame(
        ServerMessage::ListMatchesResponse(fresh_listing.clone()),
        Some(second_seq),
    );
    let actions = client.handle(ClientEvent::FrameReceived(fresh)).unwrap();
    assert_eq!(actions, vec![ClientAction::MatchListReplaced(fresh_listing)]);
}

#[test]
fn reopened_socket_requests_list_again() {
    let mut client = Client::new();
    let _ = client.handle(ClientEvent::SocketOpened).unwrap();
    let _ = client.handle(ClientEvent::SocketClosed).unwrap();

    // A second session within the same process starts over cleanly.
    let actions = client.handle(ClientEvent::SocketOpened).unwrap();
    assert_eq!(client.connection_state(), ConnectionState::Connected);
    assert_eq!(sends(&actions).len(), 1);
}

#[test]
fn server_rejection_reaches_the_caller() {
    let mut client = Client::new();
    let _ = client.handle(ClientEvent::SocketOpened).unwrap();

    let rejection = server_frame(
        ServerMessage::Error(ErrorPayload::match_not_found(&"m7".into())),
        None,
    );
    let actions = client.handle(ClientEvent::FrameReceived(rejection)).unwrap();
    assert!(matches!(actions.as_slice(), [ClientAction::ServerRejected(e)]
        if e.code == ErrorPayload::MATCH_NOT_FOUND));
}
