//! Board and status rendering.

use crate::app::App;
use gomoku_client::{Cell, GameSession, Symbol};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Draws the whole frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    render_board(f, chunks[0], app);
    render_status(f, chunks[1], app);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("gomoku");
    match app.controller().session() {
        Some(session) => {
            let lines = board_lines(session, app.cursor());
            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
        None => {
            let help = Paragraph::new(
                "m: new multiplayer game\n\
                 b: new game, bot plays O\n\
                 B: new game, bot plays X\n\
                 a: advice for the side to move (multiplayer)\n\
                 arrows/hjkl: move cursor, enter/space: place stone\n\
                 q: quit",
            )
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(help, area);
        }
    }
}

fn board_lines(session: &GameSession, cursor: (u16, u16)) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(session.board.height() as usize);
    for y in 0..session.board.height() {
        let mut spans = Vec::with_capacity(session.board.width() as usize * 2);
        for x in 0..session.board.width() {
            let index = session.board.index_of(x, y);
            let (glyph, style) = if session.advice_marker == Some(index) {
                (
                    "*",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                match session.board.get(index) {
                    Some(Cell::Occupied(Symbol::X)) => (
                        "X",
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(Cell::Occupied(Symbol::O)) => (
                        "O",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    _ => ("·", Style::default().fg(Color::DarkGray)),
                }
            };
            let style = if (x, y) == cursor {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            spans.push(Span::styled(glyph, style));
            if x + 1 < session.board.width() {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(app.status().to_string())
        .block(Block::default().borders(Borders::ALL).title("status"));
    f.render_widget(status, area);
}
