//! Session controller for a gomoku-style game service.
//!
//! The authoritative rules (move legality beyond occupancy, capture
//! counting, win and draw detection) live in an external HTTP service.
//! This crate keeps a client-side view of one live session consistent
//! with it: the board is rebuilt wholesale from the service's tile list
//! on every update, turn order and re-entrancy are gated client-side,
//! and a bot turn is orchestrated as an advice request followed by a
//! move submission.
//!
//! # Example
//!
//! ```no_run
//! use gomoku_client::{ClientConfig, HttpGameService, Mode, SessionController};
//!
//! # async fn example() -> Result<(), gomoku_client::ClientError> {
//! let config = ClientConfig::default();
//! let service = HttpGameService::new(config.base_url().clone());
//! let mut controller = SessionController::new(Box::new(service), config);
//!
//! controller.start_new_game(Mode::Multiplayer, None).await?;
//! controller.submit_move(0).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod controller;
mod error;
mod service;
mod session;
mod wire;

pub use board::{Board, Cell, PlacedTile, Symbol};
pub use config::{ClientConfig, DEFAULT_BOARD_SIZE};
pub use controller::{SessionController, SubmitStatus};
pub use error::ClientError;
pub use service::{GameService, HttpGameService, ServiceError};
pub use session::{GameId, GameSession, Mode, Outcome};
pub use wire::{
    AddTileRequest, AddTileResponse, CaptureTotals, CreateGameRequest, CreateGameResponse,
    NextMoveResponse, TileRecord,
};
