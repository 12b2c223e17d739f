//! The authoritative game service, behind a trait so tests can stand in
//! for the network.

use crate::session::GameId;
use crate::wire::{
    AddTileRequest, AddTileResponse, CreateGameRequest, CreateGameResponse, NextMoveResponse,
};
use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// HTTP status the service uses to refuse a move.
const FORBIDDEN: u16 = 403;

/// Transport-level failure talking to the game service.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[display("service returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
    /// The request never completed.
    #[display("transport failure: {message}")]
    Transport {
        /// Underlying error detail.
        message: String,
    },
}

impl ServiceError {
    /// True when the service explicitly refused the request.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ServiceError::Status { status: FORBIDDEN, .. })
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport {
            message: err.to_string(),
        }
    }
}

/// The game service as seen by the controller.
///
/// The rule engine (legality beyond occupancy, captures, win and draw
/// detection) lives entirely behind this boundary.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Creates a new game session.
    async fn create_game(
        &self,
        request: &CreateGameRequest,
    ) -> Result<CreateGameResponse, ServiceError>;

    /// Submits a move; the response carries the full post-move tile list.
    async fn add_tile(&self, request: &AddTileRequest) -> Result<AddTileResponse, ServiceError>;

    /// Requests an advisory move for the given player.
    async fn next_move(
        &self,
        game_id: GameId,
        player: &str,
    ) -> Result<NextMoveResponse, ServiceError>;
}

/// reqwest-backed implementation of [`GameService`].
#[derive(Debug, Clone)]
pub struct HttpGameService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameService {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), message = %message, "Service refused request");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl GameService for HttpGameService {
    #[instrument(skip(self, request))]
    async fn create_game(
        &self,
        request: &CreateGameRequest,
    ) -> Result<CreateGameResponse, ServiceError> {
        debug!("Creating game");
        let response = self
            .client
            .post(format!("{}/api/v1/game/", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, request), fields(game_id = request.game_id))]
    async fn add_tile(&self, request: &AddTileRequest) -> Result<AddTileResponse, ServiceError> {
        debug!(x = request.x_coordinate, y = request.y_coordinate, "Submitting move");
        let response = self
            .client
            .post(format!("{}/api/v1/game/add_tile/", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn next_move(
        &self,
        game_id: GameId,
        player: &str,
    ) -> Result<NextMoveResponse, ServiceError> {
        debug!("Requesting advice");
        let response = self
            .client
            .get(format!(
                "{}/api/v1/game/{}/next_move/{}",
                self.base_url, game_id, player
            ))
            .send()
            .await?;
        Self::decode(response).await
    }
}
