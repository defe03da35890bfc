//! Async runtime
//!
//! Event loop that drives terminal I/O and coordinates between the App
//! state machine, the Bridge, and the connection. Uses tokio::select! to
//! handle terminal events and server frames concurrently.
//!
//! Supports two modes:
//! - Simulation mode: in-process lobby for offline use
//! - WebSocket mode: real connection to a lobby server

use std::io::{self, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use matchbook_app::{App, AppAction, AppEvent, Bridge, KeyInput};
use matchbook_client::transport::{self, ConnectedClient, TransportError};
use matchbook_proto::EncodeError;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    server::{self, ServerHandle},
    ui,
};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Outgoing frame failed to encode.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Connection to a lobby (either in-process or WebSocket).
enum Connection {
    /// In-process simulated lobby.
    InProcess(ServerHandle),
    /// WebSocket connection to a remote lobby.
    WebSocket(ConnectedClient),
}

impl Connection {
    fn to_server(&self) -> &mpsc::Sender<String> {
        match self {
            Connection::InProcess(h) => &h.to_server,
            Connection::WebSocket(h) => &h.to_server,
        }
    }

    fn from_server(&mut self) -> &mut mpsc::Receiver<String> {
        match self {
            Connection::InProcess(h) => &mut h.from_server,
            Connection::WebSocket(h) => &mut h.from_server,
        }
    }

    fn stop(&self) {
        match self {
            Connection::InProcess(h) => h.stop(),
            Connection::WebSocket(h) => h.stop(),
        }
    }
}

/// Connection mode for the runtime.
#[derive(Clone)]
enum ConnectionMode {
    /// Simulation mode - attach to an in-process lobby on startup.
    Simulation,
    /// WebSocket mode - connect to this URL.
    WebSocket(String),
}

/// One resolved step of the event loop.
enum Cycle {
    /// A terminal event arrived.
    Terminal(Event),
    /// A frame arrived, or `None` if the connection ended.
    Frame(Option<String>),
    /// The periodic tick fired.
    Tick,
    /// The terminal event stream ended.
    Quit,
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown, the main event loop, and coordinates
/// between App (UI) and Bridge (protocol) state machines.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    bridge: Bridge,
    connection: Option<Connection>,
    mode: ConnectionMode,
}

impl Runtime {
    /// Create a new runtime in simulation mode.
    pub fn new() -> Result<Self, RuntimeError> {
        Self::create("sim: in-process lobby".to_owned(), ConnectionMode::Simulation)
    }

    /// Create a new runtime that connects to a lobby server.
    pub fn with_server(url: String) -> Result<Self, RuntimeError> {
        Self::create(url.clone(), ConnectionMode::WebSocket(url))
    }

    fn create(display_url: String, mode: ConnectionMode) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let app = App::new(display_url);
        let bridge = Bridge::new();

        Ok(Self { terminal, app, bridge, connection: None, mode })
    }

    /// Run the main event loop.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;
        self.connect().await?;

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(std::time::Duration::from_millis(100));

        loop {
            let cycle = self.next_cycle(&mut event_stream, &mut tick_interval).await?;
            if self.process_cycle(cycle).await? {
                break;
            }
        }

        Ok(())
    }

    /// Wait for the next thing to happen.
    ///
    /// The connection borrow stays confined to the select expression; all
    /// state changes happen in [`Self::process_cycle`].
    async fn next_cycle(
        &mut self,
        event_stream: &mut EventStream,
        tick_interval: &mut tokio::time::Interval,
    ) -> Result<Cycle, RuntimeError> {
        if let Some(conn) = self.connection.as_mut() {
            Ok(tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => Cycle::Terminal(event),
                    Some(Err(e)) => return Err(RuntimeError::Io(e)),
                    None => Cycle::Quit,
                },
                frame = conn.from_server().recv() => Cycle::Frame(frame),
                _ = tick_interval.tick() => Cycle::Tick,
            })
        } else {
            Ok(tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => Cycle::Terminal(event),
                    Some(Err(e)) => return Err(RuntimeError::Io(e)),
                    None => Cycle::Quit,
                },
                _ = tick_interval.tick() => Cycle::Tick,
            })
        }
    }

    /// Apply one event loop step. Returns `true` if the app should quit.
    async fn process_cycle(&mut self, cycle: Cycle) -> Result<bool, RuntimeError> {
        match cycle {
            Cycle::Terminal(event) => self.handle_terminal_event(event).await,
            Cycle::Frame(Some(raw)) => {
                let events = self.bridge.handle_frame(raw);
                self.flush_outgoing().await?;
                self.process_events(events).await
            },
            Cycle::Frame(None) => {
                // The socket closed underneath us. No reconnect: the lobby
                // stays visible but its actions are disabled.
                if let Some(conn) = self.connection.take() {
                    conn.stop();
                }
                let events = self.bridge.socket_closed();
                self.process_events(events).await
            },
            Cycle::Tick => {
                let actions = self.app.handle(AppEvent::Tick);
                self.process_actions(actions).await
            },
            Cycle::Quit => Ok(true),
        }
    }

    /// Handle a terminal event and return whether to quit.
    async fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        let app_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(key.code) {
                Some(input) => AppEvent::Key(input),
                None => return Ok(false),
            },
            Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            _ => return Ok(false),
        };

        let actions = self.app.handle(app_event);
        self.process_actions(actions).await
    }

    /// Process actions returned by the app. Returns true if should quit.
    ///
    /// Uses iterative processing to avoid async recursion between actions
    /// and events.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<AppAction>,
    ) -> Result<bool, RuntimeError> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.render()?,
                    AppAction::Quit => return Ok(true),

                    // Protocol operations go through the bridge
                    AppAction::RefreshMatches
                    | AppAction::CreateMatch
                    | AppAction::JoinMatch { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                        self.flush_outgoing().await?;
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from the bridge back to the app.
    async fn process_events(&mut self, events: Vec<AppEvent>) -> Result<bool, RuntimeError> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Connect to the lobby based on the mode.
    async fn connect(&mut self) -> Result<(), RuntimeError> {
        let events = self.bridge.connecting();
        let _ = self.process_events(events).await?;

        let connection = match &self.mode {
            ConnectionMode::Simulation => Connection::InProcess(server::spawn_lobby()),
            ConnectionMode::WebSocket(url) => {
                Connection::WebSocket(transport::connect(url).await?)
            },
        };
        self.connection = Some(connection);

        // The transport resolving is the socket's `opened` event; the
        // bridge flips state and queues the eager list request.
        let events = self.bridge.socket_opened();
        self.flush_outgoing().await?;
        let _ = self.process_events(events).await?;

        Ok(())
    }

    /// Send all pending outgoing envelopes to the server.
    async fn flush_outgoing(&mut self) -> Result<(), RuntimeError> {
        let envelopes = self.bridge.take_outgoing();
        if envelopes.is_empty() {
            return Ok(());
        }

        let Some(conn) = self.connection.as_ref() else {
            tracing::warn!("dropping {} outgoing frame(s): no connection", envelopes.len());
            return Ok(());
        };

        for envelope in envelopes {
            let text = envelope.encode()?;
            if conn.to_server().send(text).await.is_err() {
                return Err(RuntimeError::Transport(TransportError::ChannelClosed));
            }
        }
        Ok(())
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| {
            ui::render(frame, &self.app);
        })?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(ref conn) = self.connection {
            conn.stop();
        }

        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Map a crossterm key code to the terminal-agnostic input type.
fn map_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        _ => None,
    }
}
