//! Wire types for the authoritative game service.
//!
//! Field names mirror the service's JSON exactly; everything else in the
//! crate works with the client-side types in [`crate::board`] and
//! [`crate::session`].

use crate::session::{GameId, Mode};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/game/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGameRequest {
    /// Requested label for the first mover.
    pub player_1: String,
    /// Requested label for the second mover.
    pub player_2: String,
    /// Whether one side is automated.
    #[serde(rename = "type")]
    pub game_type: Mode,
}

/// Response to session creation.
///
/// The service may assign labels differing from the requested ones; the
/// returned values are authoritative for the session's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// Service-assigned session identifier.
    pub id: GameId,
    /// Label of the first mover.
    pub player_1: String,
    /// Label of the second mover.
    pub player_2: String,
}

/// Body of `POST /api/v1/game/add_tile/`.
#[derive(Debug, Clone, Serialize)]
pub struct AddTileRequest {
    /// Session to play in.
    pub game_id: GameId,
    /// Label of the moving player.
    pub player: String,
    /// Column of the placed stone.
    pub x_coordinate: u16,
    /// Row of the placed stone.
    pub y_coordinate: u16,
}

/// One placed tile as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileRecord {
    /// Column of the stone.
    pub x_coordinate: u16,
    /// Row of the stone.
    pub y_coordinate: u16,
    /// Label of the player who placed it.
    pub player: String,
}

/// Capture counters per symbol, replaced wholesale on every move response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTotals {
    /// Stones captured by the first mover.
    pub x: u32,
    /// Stones captured by the second mover.
    pub o: u32,
}

/// Response to a move submission: the full post-move board state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTileResponse {
    /// Every stone currently on the board.
    pub tiles: Vec<TileRecord>,
    /// `null` while play continues, the draw marker, or the winner's label.
    pub winner: Option<String>,
    /// Capture totals after this move.
    pub captures: CaptureTotals,
}

/// Response to `GET /api/v1/game/{id}/next_move/{player}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextMoveResponse {
    /// Suggested `(x, y)`, encoded as a two-element array on the wire.
    pub coordinates: (u16, u16),
    /// Server-side computation latency in seconds.
    pub time: f64,
}
