//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent};
use gomoku_client::{Mode, Outcome, SessionController, SubmitStatus, Symbol};
use tracing::debug;

const WELCOME: &str = "m: multiplayer | b: bot plays O | B: bot plays X | q: quit";

/// Terminal application state: the session controller plus a cursor and
/// a status line. Rendering is a projection of this state.
pub struct App {
    controller: SessionController,
    cursor_x: u16,
    cursor_y: u16,
    status: String,
    should_quit: bool,
}

impl App {
    /// Creates the application around a controller with no live session.
    pub fn new(controller: SessionController) -> Self {
        let cursor_x = controller.config().board_width() / 2;
        let cursor_y = controller.config().board_height() / 2;
        Self {
            controller,
            cursor_x,
            cursor_y,
            status: WELCOME.to_string(),
            should_quit: false,
        }
    }

    /// The session controller, for rendering.
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Cursor position in board coordinates.
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key press.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('m') => self.start(Mode::Multiplayer, None).await,
            KeyCode::Char('b') => self.start(Mode::Bot, Some(Symbol::O)).await,
            KeyCode::Char('B') => self.start(Mode::Bot, Some(Symbol::X)).await,
            KeyCode::Char('a') => self.hint().await,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.place().await,
            _ => {}
        }
    }

    async fn start(&mut self, mode: Mode, bot_symbol: Option<Symbol>) {
        match self.controller.start_new_game(mode, bot_symbol).await {
            Ok(()) => {
                // A failed bot opening move keeps the session but leaves
                // a surfaced error behind.
                if let Some(err) = self.controller.last_error() {
                    self.status = err.to_string();
                } else {
                    self.refresh_status();
                }
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    async fn place(&mut self) {
        let Some(session) = self.controller.session() else {
            self.status = WELCOME.to_string();
            return;
        };
        if session.mode == Mode::Bot && session.bot_assignment == Some(session.turn) {
            self.status = "Waiting for the bot.".to_string();
            return;
        }
        let in_bot_mode = session.mode == Mode::Bot;
        let cell = session.board.index_of(self.cursor_x, self.cursor_y);

        match self.controller.submit_move(cell).await {
            Ok(SubmitStatus::Applied) => {
                if in_bot_mode {
                    if let Err(err) = self.controller.run_bot_turn().await {
                        self.status = err.to_string();
                        return;
                    }
                }
                self.refresh_status();
            }
            Ok(SubmitStatus::Ignored) => {
                debug!(cell, "Move ignored");
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    async fn hint(&mut self) {
        let Some(session) = self.controller.session() else {
            return;
        };
        if session.mode != Mode::Multiplayer {
            self.status = "Advice is available in multiplayer games.".to_string();
            return;
        }
        match self.controller.request_hint().await {
            Ok(Some((x, y))) => self.status = format!("Advice: try ({x}, {y})"),
            Ok(None) => {}
            Err(err) => self.status = err.to_string(),
        }
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) {
        let (width, height) = match self.controller.session() {
            Some(session) => (session.board.width(), session.board.height()),
            None => (
                *self.controller.config().board_width(),
                *self.controller.config().board_height(),
            ),
        };
        self.cursor_x = self.cursor_x.saturating_add_signed(dx).min(width - 1);
        self.cursor_y = self.cursor_y.saturating_add_signed(dy).min(height - 1);
    }

    fn refresh_status(&mut self) {
        let Some(session) = self.controller.session() else {
            self.status = WELCOME.to_string();
            return;
        };
        self.status = match session.outcome {
            Outcome::Won(symbol) => {
                format!("Winner: {} ({})", symbol, session.label_of(symbol))
            }
            Outcome::Draw => "Game ended in a draw. m/b/B starts a new one.".to_string(),
            Outcome::Undecided => {
                let mut status = format!(
                    "Next player: {} | Captures X:{} O:{}",
                    session.turn, session.captures.x, session.captures.o
                );
                if let Some(seconds) = session.last_advice_seconds {
                    status.push_str(&format!(" | advice {seconds:.2}s"));
                }
                status
            }
        };
    }
}
