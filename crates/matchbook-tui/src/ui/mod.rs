//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod detail;
mod lobby;
mod status;

use matchbook_app::{App, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const HELP_HEIGHT: u16 = 1;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(HELP_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, help_area, status_area] = chunks.as_ref() else {
        return;
    };

    match app.view() {
        View::Lobby => lobby::render(frame, app, *main_area),
        View::MatchDetail { .. } => detail::render(frame, app, *main_area),
    }

    status::render_help(frame, app, *help_area);
    status::render(frame, app, *status_area);
}
