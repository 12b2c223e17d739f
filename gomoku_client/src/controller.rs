//! The session controller: lifecycle, move submission, advice, and the
//! automated turn.
//!
//! All service calls run to completion before the next user interaction
//! is handled, so the gate flags (`move_lock`, `advice_lock`) are set
//! synchronously just before each request. That is sufficient against
//! UI re-entrancy; it does not protect against network-level reordering,
//! and there is no cancellation or timeout. A hung request leaves the
//! locks set until it resolves; starting a new game is the recovery path.

use crate::board::Symbol;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::GameService;
use crate::session::{GameSession, Mode, Outcome};
use crate::wire::{AddTileRequest, CreateGameRequest};
use tracing::{debug, info, instrument, warn};

/// What became of a move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The move reached the service and the session was updated.
    Applied,
    /// A client-side precondition failed; nothing was sent.
    Ignored,
}

/// Drives one game session against the authoritative service.
///
/// Owns at most one live [`GameSession`]; starting a new game replaces
/// it wholesale. Every failure is returned to the caller, logged, and
/// kept in [`last_error`](Self::last_error) for display.
pub struct SessionController {
    service: Box<dyn GameService>,
    config: ClientConfig,
    session: Option<GameSession>,
    last_error: Option<String>,
}

impl SessionController {
    /// Creates a controller with no live session.
    pub fn new(service: Box<dyn GameService>, config: ClientConfig) -> Self {
        Self {
            service,
            config,
            session: None,
            last_error: None,
        }
    }

    /// The live session, if a game has been created.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Mutable access to the live session state.
    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// The controller's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Last surfaced failure, for display.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts a new game, replacing any prior session wholesale.
    ///
    /// `bot_symbol` picks the automated side in [`Mode::Bot`] and is
    /// ignored in [`Mode::Multiplayer`]. If the bot is the first mover
    /// its opening turn runs before this returns; a failure there keeps
    /// the created session and is surfaced through
    /// [`last_error`](Self::last_error). A creation failure leaves the
    /// prior session untouched.
    #[instrument(skip(self))]
    pub async fn start_new_game(
        &mut self,
        mode: Mode,
        bot_symbol: Option<Symbol>,
    ) -> Result<(), ClientError> {
        self.last_error = None;
        let request = CreateGameRequest {
            player_1: self.config.player_1().clone(),
            player_2: self.config.player_2().clone(),
            game_type: mode,
        };
        let created = match self.service.create_game(&request).await {
            Ok(created) => created,
            Err(err) => {
                let err = ClientError::ServiceUnavailable {
                    message: err.to_string(),
                };
                return Err(self.surface(err));
            }
        };
        info!(game_id = created.id, ?mode, "Game created");
        let bot_assignment = match mode {
            Mode::Bot => bot_symbol,
            Mode::Multiplayer => None,
        };
        self.session = Some(GameSession::new(
            created.id,
            mode,
            created.player_1,
            created.player_2,
            *self.config.board_width(),
            *self.config.board_height(),
            bot_assignment,
        ));
        if let Err(err) = self.run_bot_turn().await {
            warn!(error = %err, "Bot opening turn failed");
        }
        Ok(())
    }

    /// Submits a move at `cell`, a linear board index.
    ///
    /// Silently ignored (no request is issued) when no session is live,
    /// a move or advice sequence is already in flight, the game is over,
    /// or the cell is occupied. On success the session is updated from
    /// the response; on failure only `move_lock` is released and the
    /// session is otherwise untouched.
    #[instrument(skip(self))]
    pub async fn submit_move(&mut self, cell: usize) -> Result<SubmitStatus, ClientError> {
        let Some(session) = self.session.as_mut() else {
            debug!("No live session; ignoring move");
            return Ok(SubmitStatus::Ignored);
        };
        if session.move_lock
            || session.outcome != Outcome::Undecided
            || !session.board.is_empty(cell)
        {
            debug!(
                move_lock = session.move_lock,
                outcome = ?session.outcome,
                "Move preconditions not met; ignoring"
            );
            return Ok(SubmitStatus::Ignored);
        }
        let (x, y) = session.board.coords_of(cell);
        let request = AddTileRequest {
            game_id: session.id,
            player: session.label_of(session.turn).to_string(),
            x_coordinate: x,
            y_coordinate: y,
        };
        session.move_lock = true;
        self.last_error = None;

        let result = self.service.add_tile(&request).await;
        let Some(session) = self.session.as_mut() else {
            return Ok(SubmitStatus::Ignored);
        };
        session.move_lock = false;
        match result {
            Ok(response) => {
                session.apply_move_result(&response);
                info!(x, y, turn = %session.turn, outcome = ?session.outcome, "Move applied");
                Ok(SubmitStatus::Applied)
            }
            Err(err) => {
                let err = if err.is_forbidden() {
                    ClientError::MoveForbidden {
                        message: err.to_string(),
                    }
                } else {
                    ClientError::ServiceUnavailable {
                        message: err.to_string(),
                    }
                };
                Err(self.surface(err))
            }
        }
    }

    /// Requests a hint for the side to move and marks it on the board.
    ///
    /// Returns `Ok(None)` when a hint is not currently available: no
    /// live session, game over, or a request already in flight. On
    /// success the advice lock is released again so the session stays
    /// usable even though no move was made.
    #[instrument(skip(self))]
    pub async fn request_hint(&mut self) -> Result<Option<(u16, u16)>, ClientError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        if session.outcome != Outcome::Undecided || session.advice_lock || session.move_lock {
            debug!("Hint preconditions not met; ignoring");
            return Ok(None);
        }
        let (x, y) = self.request_advice().await?;
        if let Some(session) = self.session.as_mut() {
            session.apply_advice(x, y);
            session.advice_lock = false;
        }
        Ok(Some((x, y)))
    }

    /// Plays automated moves for the bot-controlled side until the turn
    /// passes back to the human or the game ends.
    ///
    /// Each iteration re-reads the post-move state before deciding to
    /// continue. A failed advice request or submission stops the
    /// sequence with the locks released by the failing path; so does an
    /// advised cell that turns out not to be playable.
    #[instrument(skip(self))]
    pub async fn run_bot_turn(&mut self) -> Result<(), ClientError> {
        loop {
            let Some(session) = self.session.as_ref() else {
                return Ok(());
            };
            if session.outcome != Outcome::Undecided
                || session.bot_assignment != Some(session.turn)
                || session.move_lock
            {
                return Ok(());
            }
            let (x, y) = self.request_advice().await?;
            let Some(session) = self.session.as_ref() else {
                return Ok(());
            };
            let cell = session.board.index_of(x, y);
            match self.submit_move(cell).await? {
                SubmitStatus::Applied => {}
                SubmitStatus::Ignored => {
                    warn!(x, y, "Advised cell is not playable; stopping bot turn");
                    if let Some(session) = self.session.as_mut() {
                        session.advice_lock = false;
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Requests an advisory move for the side to play.
    ///
    /// Both locks are taken before the request goes out: advice is
    /// computed for whoever moves next, so a concurrent move would
    /// invalidate it. On success only `move_lock` is released; the
    /// advice lock is cleared by the move that consumes the advice (or
    /// by the hint flow). On failure both locks are released.
    async fn request_advice(&mut self) -> Result<(u16, u16), ClientError> {
        let Some(session) = self.session.as_mut() else {
            debug!("No live session; advice unavailable");
            return Err(ClientError::AdviceFailure {
                message: "no live session".to_string(),
            });
        };
        session.move_lock = true;
        session.advice_lock = true;
        let game_id = session.id;
        let player = session.label_of(session.turn).to_string();
        self.last_error = None;

        let result = self.service.next_move(game_id, &player).await;
        match result {
            Ok(response) => {
                let (x, y) = response.coordinates;
                if let Some(session) = self.session.as_mut() {
                    session.last_advice_seconds = Some(response.time);
                    session.move_lock = false;
                }
                debug!(x, y, seconds = response.time, "Advice received");
                Ok((x, y))
            }
            Err(err) => {
                if let Some(session) = self.session.as_mut() {
                    session.move_lock = false;
                    session.advice_lock = false;
                }
                let err = ClientError::AdviceFailure {
                    message: err.to_string(),
                };
                Err(self.surface(err))
            }
        }
    }

    fn surface(&mut self, err: ClientError) -> ClientError {
        warn!(error = %err, "Surfacing failure");
        self.last_error = Some(err.to_string());
        err
    }
}
