//! In-process simulated lobby.
//!
//! Runs a minimal lobby in-process using channels for frame transport.
//! No network - frames flow through mpsc channels so the TUI works offline
//! and tests are deterministic.
//!
//! Semantics follow the real lobby: a guest identity is assigned and
//! logged in as soon as the session attaches, `ListMatches` answers with
//! open matches only (full ones are excluded), `CreateMatch` records a
//! match owned by the guest without a reply, and `JoinMatch` fills the
//! second seat or answers with a typed error.

use matchbook_proto::{
    ClientRequest, Envelope, ErrorPayload, MatchId, MatchSummary, ServerMessage, UserProfile,
};
use rand::Rng as _;
use tokio::sync::mpsc;

/// Handle to a running in-process lobby.
pub struct ServerHandle {
    /// Send frames to the lobby.
    pub to_server: mpsc::Sender<String>,
    /// Receive frames from the lobby.
    pub from_server: mpsc::Receiver<String>,
    /// Abort handle to stop the lobby task.
    abort_handle: tokio::task::AbortHandle,
}

impl ServerHandle {
    /// Stop the lobby.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Names the simulated lobby hands out to guests.
const GUEST_NAMES: &[&str] = &["ada", "grace", "edsger", "barbara", "donald", "alonzo"];

/// Spawn an in-process simulated lobby.
///
/// Returns a handle with channels for frame transport. The lobby runs as a
/// tokio task until dropped or stopped.
pub fn spawn_lobby() -> ServerHandle {
    let (client_tx, server_rx) = mpsc::channel::<String>(32);
    let (server_tx, client_rx) = mpsc::channel::<String>(32);

    let handle = tokio::spawn(run_lobby(server_rx, server_tx));

    ServerHandle {
        to_server: client_tx,
        from_server: client_rx,
        abort_handle: handle.abort_handle(),
    }
}

/// Lobby bookkeeping for one simulated session.
struct Lobby {
    guest: UserProfile,
    matches: Vec<MatchSummary>,
}

impl Lobby {
    fn new() -> Self {
        let mut rng = rand::rng();
        let name = GUEST_NAMES[rng.random_range(0..GUEST_NAMES.len())];
        let suffix: u16 = rng.random();
        let guest =
            UserProfile::new(format!("guest-{suffix:04x}"), format!("{name}-{suffix:04x}"));

        // Seed a couple of open matches so the lobby is not empty offline.
        let matches = vec![
            MatchSummary::new("sim-1", UserProfile::new("bot-1", "Ada")),
            MatchSummary::new("sim-2", UserProfile::new("bot-2", "Grace")),
        ];

        Self { guest, matches }
    }

    /// Matches with a free seat; full ones are not listed.
    fn open_matches(&self) -> Vec<MatchSummary> {
        self.matches.iter().filter(|m| m.is_open()).cloned().collect()
    }

    fn handle(&mut self, envelope: Envelope<ClientRequest>) -> Option<Envelope<ServerMessage>> {
        match envelope.message {
            ClientRequest::ListMatches => Some(Envelope {
                message: ServerMessage::ListMatchesResponse(self.open_matches()),
                // Echo the correlation number so the client can match the
                // response to its request.
                seq: envelope.seq,
            }),
            ClientRequest::CreateMatch => {
                let id = format!("sim-{:08x}", rand::rng().random::<u32>());
                self.matches.push(MatchSummary::new(id, self.guest.clone()));
                // The real lobby answers CreateMatch with nothing; the new
                // match shows up on the next list.
                None
            },
            ClientRequest::JoinMatch(match_id) => self.join(&match_id),
        }
    }

    fn join(&mut self, match_id: &MatchId) -> Option<Envelope<ServerMessage>> {
        let Some(entry) = self.matches.iter_mut().find(|m| &m.id == match_id && m.is_open())
        else {
            return Some(Envelope::new(ServerMessage::Error(ErrorPayload::match_not_found(
                match_id,
            ))));
        };

        entry.player2 = Some(self.guest.clone());
        None
    }
}

/// Run the lobby until the session detaches.
async fn run_lobby(mut inbound: mpsc::Receiver<String>, outbound: mpsc::Sender<String>) {
    let mut lobby = Lobby::new();

    // The lobby logs the session in as soon as it attaches.
    let login = Envelope::new(ServerMessage::LoginResponse(lobby.guest.clone()));
    if !send(&outbound, &login).await {
        return;
    }

    while let Some(raw) = inbound.recv().await {
        let envelope = match Envelope::<ClientRequest>::decode(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("simulated lobby: dropping frame: {e}");
                continue;
            },
        };

        if let Some(reply) = lobby.handle(envelope)
            && !send(&outbound, &reply).await
        {
            break;
        }
    }
}

/// Send a reply. Returns whether the session is still attached.
async fn send(outbound: &mpsc::Sender<String>, envelope: &Envelope<ServerMessage>) -> bool {
    match envelope.encode() {
        Ok(text) => outbound.send(text).await.is_ok(),
        Err(e) => {
            tracing::warn!("simulated lobby: encode failed: {e}");
            true
        },
    }
}
