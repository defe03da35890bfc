//! Status bar
//!
//! Displays connection status, the current user, and transient messages.

use matchbook_app::{App, ConnectionState, View};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Connected => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let user_info = app.user().map_or_else(String::new, |user| format!(" | {}", user.name));

    let message = app
        .status_message()
        .map_or_else(String::new, |status| format!(" | {status}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(user_info, Style::default().fg(Color::Cyan)),
        Span::styled(message, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Render the per-view key hints.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.view() {
        View::Lobby => " l list | c create | up/down select | enter open | q quit",
        View::MatchDetail { .. } => " j join | esc back | q quit",
    };

    let paragraph =
        Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
