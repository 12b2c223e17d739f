//! Session state and the pure transitions applied to it.

use crate::board::{Board, PlacedTile, Symbol};
use crate::wire::{AddTileResponse, CaptureTotals};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Identifier assigned to a session by the game service.
pub type GameId = i64;

/// Value of the `winner` field marking a finished game with no winner.
const DRAW_MARKER: &str = "draw";

/// How a session was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two humans alternate at the same client.
    Multiplayer,
    /// One side is played automatically via the advisory interface.
    Bot,
}

/// Terminal state of a session.
///
/// Monotonic: once decided it never reverts without a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Play continues.
    Undecided,
    /// Finished with no winner.
    Draw,
    /// Finished; the given symbol won.
    Won(Symbol),
}

/// The one live game session.
///
/// A plain value object: all service interaction lives in
/// [`crate::SessionController`], which drives the state exclusively
/// through the transition methods below. Replacing the session wholesale
/// (a new game) is the only other way it changes.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Service-assigned identifier.
    pub id: GameId,
    /// How the session was created.
    pub mode: Mode,
    /// Service-assigned label of the first mover.
    pub player_x: String,
    /// Service-assigned label of the second mover.
    pub player_o: String,
    /// Current occupancy, rebuilt from the tile list on every move.
    pub board: Board,
    /// Whose symbol moves next.
    pub turn: Symbol,
    /// Terminal state, if any.
    pub outcome: Outcome,
    /// Capture totals as last reported by the service.
    pub captures: CaptureTotals,
    /// True while a move (or advice-then-move sequence) is in flight.
    pub move_lock: bool,
    /// True while an advice request is in flight or unconsumed.
    pub advice_lock: bool,
    /// Which side is automated, if any.
    pub bot_assignment: Option<Symbol>,
    /// Last advisory round-trip in seconds, for display.
    pub last_advice_seconds: Option<f64>,
    /// Cell index of a displayed hint; never treated as occupied.
    pub advice_marker: Option<usize>,
}

impl GameSession {
    /// Seeds a fresh session: empty board, first mover to play, locks
    /// clear, outcome undecided, captures zeroed.
    pub fn new(
        id: GameId,
        mode: Mode,
        player_x: String,
        player_o: String,
        width: u16,
        height: u16,
        bot_assignment: Option<Symbol>,
    ) -> Self {
        Self {
            id,
            mode,
            player_x,
            player_o,
            board: Board::new(width, height),
            turn: Symbol::X,
            outcome: Outcome::Undecided,
            captures: CaptureTotals::default(),
            move_lock: false,
            advice_lock: false,
            bot_assignment,
            last_advice_seconds: None,
            advice_marker: None,
        }
    }

    /// Label the service knows the given symbol by.
    pub fn label_of(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::X => &self.player_x,
            Symbol::O => &self.player_o,
        }
    }

    /// Symbol behind a service label, if it matches either player.
    pub fn symbol_of(&self, label: &str) -> Option<Symbol> {
        if label == self.player_x {
            Some(Symbol::X)
        } else if label == self.player_o {
            Some(Symbol::O)
        } else {
            None
        }
    }

    /// Applies a successful move response: board reconciled from the tile
    /// list, captures replaced, turn toggled, outcome taken from the
    /// winner field, hint marker and advice lock cleared.
    pub fn apply_move_result(&mut self, response: &AddTileResponse) {
        let tiles: Vec<PlacedTile> = response
            .tiles
            .iter()
            .filter_map(|tile| {
                let symbol = self.symbol_of(&tile.player);
                if symbol.is_none() {
                    warn!(player = %tile.player, "Tile from unknown player; skipping");
                }
                symbol.map(|symbol| PlacedTile {
                    x: tile.x_coordinate,
                    y: tile.y_coordinate,
                    symbol,
                })
            })
            .collect();
        self.board = Board::reconcile(self.board.width(), self.board.height(), &tiles);
        self.captures = response.captures;
        self.turn = self.turn.opponent();
        self.outcome = self.outcome_from_winner(response.winner.as_deref());
        self.advice_marker = None;
        self.advice_lock = false;
        debug!(turn = %self.turn, outcome = ?self.outcome, "Move result applied");
    }

    /// Marks an advised cell for display. Advisory only: the marker is
    /// cleared by the next applied move and never occupies the board.
    pub fn apply_advice(&mut self, x: u16, y: u16) {
        self.advice_marker = Some(self.board.index_of(x, y));
    }

    fn outcome_from_winner(&self, winner: Option<&str>) -> Outcome {
        match winner {
            None => Outcome::Undecided,
            Some(DRAW_MARKER) => Outcome::Draw,
            Some(label) => match self.symbol_of(label) {
                Some(symbol) => Outcome::Won(symbol),
                None => {
                    warn!(label, "Winner label matches neither player; ignoring");
                    Outcome::Undecided
                }
            },
        }
    }
}
