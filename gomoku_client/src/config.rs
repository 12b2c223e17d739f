//! Client configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: u16 = 19;

/// Settings for a session controller.
///
/// The player labels are the ones requested at game creation; the service
/// may assign different ones, and the session always uses the assigned
/// labels.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the game service.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Board width in cells.
    #[serde(default = "default_board_size")]
    board_width: u16,

    /// Board height in cells.
    #[serde(default = "default_board_size")]
    board_height: u16,

    /// Requested label for the first mover.
    #[serde(default = "default_player_1")]
    player_1: String,

    /// Requested label for the second mover.
    #[serde(default = "default_player_2")]
    player_2: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_board_size() -> u16 {
    DEFAULT_BOARD_SIZE
}

fn default_player_1() -> String {
    "player 1".to_string()
}

fn default_player_2() -> String {
    "player 2".to_string()
}

impl ClientConfig {
    /// Creates a configuration for the service at `base_url`, with the
    /// default board size and player labels.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            board_width: default_board_size(),
            board_height: default_board_size(),
            player_1: default_player_1(),
            player_2: default_player_2(),
        }
    }

    /// Sets the board dimensions.
    pub fn with_board(mut self, width: u16, height: u16) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Sets the requested player labels.
    pub fn with_players(mut self, player_1: impl Into<String>, player_2: impl Into<String>) -> Self {
        self.player_1 = player_1.into();
        self.player_2 = player_2.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}
