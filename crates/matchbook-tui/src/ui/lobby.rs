//! Lobby view
//!
//! Displays the open-match list with cursor selection. The list is the
//! self-filtered one: matches created by the current user are not shown.

use matchbook_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

/// Render the lobby match list.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_matches();

    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "  no open matches - press c to create one",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(index, summary)| {
                let selected = index == app.selected();
                let (prefix, style) = if selected {
                    (
                        SELECTED_PREFIX,
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )
                } else {
                    (UNSELECTED_PREFIX, Style::default())
                };

                ListItem::new(Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("Match with {}", summary.player1.name), style),
                    Span::styled(
                        format!("  ({})", summary.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    let block = Block::default().borders(Borders::ALL).title(" Lobby ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
