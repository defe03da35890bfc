//! UI state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the client completely decoupled from I/O and
//! protocol mechanics.
//!
//! This is a pure state machine: it consumes [`AppEvent`] inputs and
//! produces [`AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Mirrors the connection state for UI feedback and gates lobby actions
//!   on it (the actions are unavailable while disconnected).
//! - Holds the user identity and the match list, replaced wholesale from
//!   protocol events.
//! - Tracks the current view (lobby or match detail) and the lobby cursor.

use matchbook_client::ConnectionState;
use matchbook_proto::{MatchSummary, UserProfile};

use crate::{AppAction, AppEvent, KeyInput, View};

/// UI state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or a socket.
#[derive(Debug, Clone)]
pub struct App {
    /// Mirrored connection state.
    state: ConnectionState,
    /// Server URL, shown in the header.
    server_url: String,
    /// Identity assigned by the server. `None` until a login arrives.
    user: Option<UserProfile>,
    /// Last received match list, verbatim.
    matches: Vec<MatchSummary>,
    /// Current view.
    view: View,
    /// Cursor position in the lobby list.
    selected: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App with the given server URL.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            server_url: server_url.into(),
            user: None,
            matches: Vec::new(),
            view: View::Lobby,
            selected: 0,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions for the runtime.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                self.state = ConnectionState::Connected;
                self.status_message = None;
                vec![AppAction::Render]
            },
            AppEvent::Disconnected => {
                self.state = ConnectionState::Disconnected;
                self.status_message = Some("Connection lost - lobby actions disabled".to_owned());
                vec![AppAction::Render]
            },
            AppEvent::SessionEstablished(user) => {
                self.status_message = Some(format!("Logged in as {}", user.name));
                self.user = Some(user);
                vec![AppAction::Render]
            },
            AppEvent::MatchListReplaced(matches) => {
                self.matches = matches;
                self.clamp_selection();
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Handle keyboard input, routed by the current view.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match self.view {
            View::Lobby => self.handle_lobby_key(key),
            View::MatchDetail { .. } => self.handle_detail_key(key),
        }
    }

    fn handle_lobby_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char('q') | KeyInput::Esc => vec![AppAction::Quit],
            KeyInput::Char('l' | 'r') => self.guard_connected(AppAction::RefreshMatches),
            KeyInput::Char('c') => self.guard_connected(AppAction::CreateMatch),
            KeyInput::Up => {
                self.selected = self.selected.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Down => {
                let last = self.visible_matches().len().saturating_sub(1);
                if self.selected < last {
                    self.selected = self.selected.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.open_selected_match(),
            KeyInput::Char(_) => vec![],
        }
    }

    fn handle_detail_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => {
                self.view = View::Lobby;
                vec![AppAction::Render]
            },
            KeyInput::Char('q') => vec![AppAction::Quit],
            KeyInput::Char('j') => {
                let View::MatchDetail { ref match_id } = self.view else {
                    return vec![];
                };
                let match_id = match_id.clone();
                self.guard_connected(AppAction::JoinMatch { match_id })
            },
            _ => vec![],
        }
    }

    /// Open the detail view for the match under the cursor.
    fn open_selected_match(&mut self) -> Vec<AppAction> {
        let Some(match_id) = self.visible_matches().get(self.selected).map(|m| m.id.clone())
        else {
            return vec![];
        };
        self.view = View::MatchDetail { match_id };
        vec![AppAction::Render]
    }

    /// Emit a lobby action if connected, otherwise surface the refusal.
    ///
    /// Rejected intents never reach the transport; the client below
    /// enforces the same policy as a backstop.
    fn guard_connected(&mut self, action: AppAction) -> Vec<AppAction> {
        if matches!(self.state, ConnectionState::Connected) {
            vec![action, AppAction::Render]
        } else {
            self.status_message = Some("Not connected".to_owned());
            vec![AppAction::Render]
        }
    }

    fn clamp_selection(&mut self) {
        let last = self.visible_matches().len().saturating_sub(1);
        if self.selected > last {
            self.selected = last;
        }
    }

    /// The match list as displayed: matches created by the current user
    /// are excluded.
    ///
    /// Filtering requires a known identity. Before a login arrives the
    /// full list is shown; the user cannot own any of it yet.
    pub fn visible_matches(&self) -> Vec<&MatchSummary> {
        match &self.user {
            Some(user) => {
                self.matches.iter().filter(|m| m.player1.id != user.id).collect()
            },
            None => self.matches.iter().collect(),
        }
    }

    /// Summary of the match shown by the detail view, if it is still
    /// listed.
    pub fn detail_match(&self) -> Option<&MatchSummary> {
        let View::MatchDetail { ref match_id } = self.view else {
            return None;
        };
        self.matches.iter().find(|m| &m.id == match_id)
    }

    /// Mirrored connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Server URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Identity assigned by the server. `None` until a login arrives.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Last received match list, unfiltered.
    pub fn matches(&self) -> &[MatchSummary] {
        &self.matches
    }

    /// Current view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Cursor position in the lobby list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use matchbook_proto::MatchId;

    use super::*;

    fn connected_app() -> App {
        let mut app = App::new("ws://localhost:8000/game/");
        let _ = app.handle(AppEvent::Connected);
        app
    }

    fn listing() -> Vec<MatchSummary> {
        vec![
            MatchSummary::new("m1", UserProfile::new("u2", "Bob")),
            MatchSummary::new("m2", UserProfile::new("u1", "Alice")),
        ]
    }

    #[test]
    fn filter_excludes_own_matches_once_logged_in() {
        let mut app = connected_app();
        let _ = app.handle(AppEvent::MatchListReplaced(listing()));

        // No identity yet: the full list is shown
        assert_eq!(app.visible_matches().len(), 2);

        let _ = app.handle(AppEvent::SessionEstablished(UserProfile::new("u1", "Alice")));
        let visible = app.visible_matches();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, MatchId::from("m1"));

        // A different identity keeps m2 and drops m1
        let _ = app.handle(AppEvent::SessionEstablished(UserProfile::new("u2", "Bob")));
        let visible = app.visible_matches();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, MatchId::from("m2"));
    }

    #[test]
    fn lobby_actions_require_connection() {
        let mut app = App::new("ws://localhost:8000/game/");

        let actions = app.handle(AppEvent::Key(KeyInput::Char('l')));
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.status_message(), Some("Not connected"));

        let actions = app.handle(AppEvent::Key(KeyInput::Char('c')));
        assert_eq!(actions, vec![AppAction::Render]);
    }

    #[test]
    fn lobby_actions_emitted_while_connected() {
        let mut app = connected_app();

        let actions = app.handle(AppEvent::Key(KeyInput::Char('l')));
        assert_eq!(actions, vec![AppAction::RefreshMatches, AppAction::Render]);

        let actions = app.handle(AppEvent::Key(KeyInput::Char('c')));
        assert_eq!(actions, vec![AppAction::CreateMatch, AppAction::Render]);
    }

    #[test]
    fn enter_opens_detail_and_esc_returns() {
        let mut app = connected_app();
        let _ = app.handle(AppEvent::MatchListReplaced(listing()));

        let _ = app.handle(AppEvent::Key(KeyInput::Enter));
        assert_eq!(app.view(), &View::MatchDetail { match_id: "m1".into() });
        assert_eq!(app.detail_match().map(|m| m.player1.name.as_str()), Some("Bob"));

        let _ = app.handle(AppEvent::Key(KeyInput::Esc));
        assert_eq!(app.view(), &View::Lobby);
    }

    #[test]
    fn join_from_detail_view() {
        let mut app = connected_app();
        let _ = app.handle(AppEvent::MatchListReplaced(listing()));
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));

        let actions = app.handle(AppEvent::Key(KeyInput::Char('j')));
        assert_eq!(
            actions,
            vec![AppAction::JoinMatch { match_id: "m1".into() }, AppAction::Render]
        );
    }

    #[test]
    fn cursor_clamps_when_list_shrinks() {
        let mut app = connected_app();
        let _ = app.handle(AppEvent::MatchListReplaced(listing()));
        let _ = app.handle(AppEvent::Key(KeyInput::Down));
        assert_eq!(app.selected(), 1);

        let _ = app.handle(AppEvent::MatchListReplaced(vec![MatchSummary::new(
            "m1",
            UserProfile::new("u2", "Bob"),
        )]));
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn disconnect_shows_reason_and_disables_actions() {
        let mut app = connected_app();
        let _ = app.handle(AppEvent::Disconnected);

        assert_eq!(app.connection_state(), ConnectionState::Disconnected);
        assert!(app.status_message().is_some_and(|m| m.contains("Connection lost")));

        let actions = app.handle(AppEvent::Key(KeyInput::Char('l')));
        assert_eq!(actions, vec![AppAction::Render]);
    }

    #[test]
    fn enter_with_empty_list_is_a_no_op() {
        let mut app = connected_app();
        let actions = app.handle(AppEvent::Key(KeyInput::Enter));
        assert!(actions.is_empty());
        assert_eq!(app.view(), &View::Lobby);
    }
}
