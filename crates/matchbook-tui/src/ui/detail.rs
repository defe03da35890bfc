//! Match detail view
//!
//! One page per match id, opened from the lobby. Match gameplay is not
//! part of the client; the page shows the participants and the join
//! action.

use matchbook_app::{App, View};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the match detail page.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let View::MatchDetail { match_id } = app.view() else {
        return;
    };

    let mut lines = vec![Line::from(vec![
        Span::raw("Match "),
        Span::styled(match_id.to_string(), Style::default().fg(Color::Yellow)),
    ])];

    match app.detail_match() {
        Some(summary) => {
            lines.push(Line::from(format!("Player 1: {}", summary.player1.name)));
            match &summary.player2 {
                Some(player2) => {
                    lines.push(Line::from(format!("Player 2: {}", player2.name)));
                },
                None => {
                    lines.push(Line::from(Span::styled(
                        "Seat open - press j to join",
                        Style::default().fg(Color::Green),
                    )));
                },
            }
        },
        None => {
            lines.push(Line::from(Span::styled(
                "This match is no longer listed.",
                Style::default().fg(Color::DarkGray),
            )));
        },
    }

    let block = Block::default().borders(Borders::ALL).title(" Match ");
    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
