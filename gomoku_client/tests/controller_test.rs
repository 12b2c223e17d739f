//! Controller scenarios against a scripted in-memory game service.

use async_trait::async_trait;
use gomoku_client::{
    AddTileRequest, AddTileResponse, CaptureTotals, ClientConfig, ClientError, CreateGameRequest,
    CreateGameResponse, GameId, GameService, Mode, NextMoveResponse, Outcome, ServiceError,
    SessionController, SubmitStatus, Symbol, TileRecord,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Stands in for the game service: records every call and serves
/// scripted responses, echoing back the accumulated tile list the way
/// the real service does.
#[derive(Clone, Default)]
struct ScriptedService {
    state: Arc<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
    calls: Mutex<Vec<String>>,
    tiles: Mutex<Vec<TileRecord>>,
    winner: Mutex<Option<String>>,
    captures: Mutex<CaptureTotals>,
    advice: Mutex<VecDeque<(u16, u16)>>,
    fail_create: Mutex<bool>,
    move_failure: Mutex<Option<u16>>,
    fail_advice: Mutex<bool>,
}

impl ScriptedService {
    fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    fn advise(&self, x: u16, y: u16) {
        self.state.advice.lock().unwrap().push_back((x, y));
    }

    /// Declares the winner returned by the next move response.
    fn declare_winner(&self, winner: &str) {
        *self.state.winner.lock().unwrap() = Some(winner.to_string());
    }

    fn set_captures(&self, x: u32, o: u32) {
        *self.state.captures.lock().unwrap() = CaptureTotals { x, o };
    }

    fn fail_create(&self) {
        *self.state.fail_create.lock().unwrap() = true;
    }

    /// Makes every subsequent move submission fail with `status`.
    fn refuse_moves(&self, status: u16) {
        *self.state.move_failure.lock().unwrap() = Some(status);
    }

    fn fail_advice(&self) {
        *self.state.fail_advice.lock().unwrap() = true;
    }
}

#[async_trait]
impl GameService for ScriptedService {
    async fn create_game(
        &self,
        request: &CreateGameRequest,
    ) -> Result<CreateGameResponse, ServiceError> {
        self.state.calls.lock().unwrap().push("create".to_string());
        if *self.state.fail_create.lock().unwrap() {
            return Err(ServiceError::Transport {
                message: "connection refused".to_string(),
            });
        }
        Ok(CreateGameResponse {
            id: 7,
            player_1: request.player_1.clone(),
            player_2: request.player_2.clone(),
        })
    }

    async fn add_tile(&self, request: &AddTileRequest) -> Result<AddTileResponse, ServiceError> {
        self.state.calls.lock().unwrap().push(format!(
            "add_tile:{},{},{}",
            request.x_coordinate, request.y_coordinate, request.player
        ));
        if let Some(status) = *self.state.move_failure.lock().unwrap() {
            return Err(ServiceError::Status {
                status,
                message: "refused".to_string(),
            });
        }
        let mut tiles = self.state.tiles.lock().unwrap();
        tiles.push(TileRecord {
            x_coordinate: request.x_coordinate,
            y_coordinate: request.y_coordinate,
            player: request.player.clone(),
        });
        Ok(AddTileResponse {
            tiles: tiles.clone(),
            winner: self.state.winner.lock().unwrap().take(),
            captures: *self.state.captures.lock().unwrap(),
        })
    }

    async fn next_move(
        &self,
        _game_id: GameId,
        player: &str,
    ) -> Result<NextMoveResponse, ServiceError> {
        self.state
            .calls
            .lock()
            .unwrap()
            .push(format!("next_move:{player}"));
        if *self.state.fail_advice.lock().unwrap() {
            return Err(ServiceError::Transport {
                message: "advisor down".to_string(),
            });
        }
        let coordinates = self
            .state
            .advice
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted advice left");
        Ok(NextMoveResponse {
            coordinates,
            time: 0.25,
        })
    }
}

fn controller(service: &ScriptedService) -> SessionController {
    SessionController::new(Box::new(service.clone()), ClientConfig::default())
}

#[tokio::test]
async fn test_new_game_seeds_fresh_session() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);

    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();

    let session = controller.session().unwrap();
    assert_eq!(session.id, 7);
    assert_eq!(session.turn, Symbol::X);
    assert_eq!(session.outcome, Outcome::Undecided);
    assert_eq!(session.captures, CaptureTotals::default());
    assert_eq!(session.board.cell_count(), 19 * 19);
    assert!(!session.move_lock);
    assert!(!session.advice_lock);
    assert_eq!(session.bot_assignment, None);
}

#[tokio::test]
async fn test_creation_failure_leaves_session_untouched() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    controller.submit_move(5).await.unwrap();

    service.fail_create();
    let err = controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ServiceUnavailable { .. }));
    assert!(controller.last_error().is_some());
    // The prior session survives, stone and all.
    let session = controller.session().unwrap();
    assert!(!session.board.is_empty(5));
    assert_eq!(session.turn, Symbol::O);
}

#[tokio::test]
async fn test_move_toggles_turn_and_fills_cell() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();

    let status = controller.submit_move(42).await.unwrap();

    assert_eq!(status, SubmitStatus::Applied);
    let session = controller.session().unwrap();
    assert!(!session.board.is_empty(42));
    assert_eq!(session.turn, Symbol::O);
    assert_eq!(session.outcome, Outcome::Undecided);
    assert!(!session.move_lock);
}

#[tokio::test]
async fn test_submit_index_zero_maps_to_origin() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();

    controller.submit_move(0).await.unwrap();

    assert_eq!(
        service.calls(),
        vec!["create".to_string(), "add_tile:0,0,player 1".to_string()]
    );
}

#[tokio::test]
async fn test_occupied_cell_is_ignored() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    controller.submit_move(42).await.unwrap();

    let status = controller.submit_move(42).await.unwrap();

    assert_eq!(status, SubmitStatus::Ignored);
    // Only the first submission reached the service.
    assert_eq!(service.calls().len(), 2);
}

#[tokio::test]
async fn test_move_lock_blocks_submission() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();

    controller.session_mut().unwrap().move_lock = true;
    let status = controller.submit_move(5).await.unwrap();

    assert_eq!(status, SubmitStatus::Ignored);
    assert_eq!(service.calls(), vec!["create".to_string()]);
}

#[tokio::test]
async fn test_forbidden_move_leaves_state_untouched() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.refuse_moves(403);

    let err = controller.submit_move(5).await.unwrap_err();

    assert!(matches!(err, ClientError::MoveForbidden { .. }));
    let session = controller.session().unwrap();
    assert!(session.board.is_empty(5));
    assert_eq!(session.turn, Symbol::X);
    assert_eq!(session.outcome, Outcome::Undecided);
    assert!(!session.move_lock);
    assert!(controller.last_error().is_some());
}

#[tokio::test]
async fn test_generic_move_failure_is_service_unavailable() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.refuse_moves(500);

    let err = controller.submit_move(5).await.unwrap_err();

    assert!(matches!(err, ClientError::ServiceUnavailable { .. }));
}

#[tokio::test]
async fn test_winner_ends_session_and_blocks_moves() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.declare_winner("player 1");

    controller.submit_move(0).await.unwrap();
    assert_eq!(
        controller.session().unwrap().outcome,
        Outcome::Won(Symbol::X)
    );

    let status = controller.submit_move(1).await.unwrap();
    assert_eq!(status, SubmitStatus::Ignored);
    assert_eq!(service.calls().len(), 2);
}

#[tokio::test]
async fn test_draw_marker_maps_to_draw_outcome() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.declare_winner("draw");

    controller.submit_move(0).await.unwrap();

    assert_eq!(controller.session().unwrap().outcome, Outcome::Draw);
}

#[tokio::test]
async fn test_hint_marks_cell_and_next_move_clears_it() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.advise(3, 4);

    let hint = controller.request_hint().await.unwrap();

    assert_eq!(hint, Some((3, 4)));
    let session = controller.session().unwrap();
    assert_eq!(session.advice_marker, Some(4 * 19 + 3));
    // The marked cell is advisory only, still playable.
    assert!(session.board.is_empty(4 * 19 + 3));
    assert_eq!(session.last_advice_seconds, Some(0.25));
    // The hint flow leaves the session usable: both locks released.
    assert!(!session.move_lock);
    assert!(!session.advice_lock);

    controller.submit_move(0).await.unwrap();
    assert_eq!(controller.session().unwrap().advice_marker, None);
}

#[tokio::test]
async fn test_hint_is_noop_after_game_over() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.declare_winner("player 1");
    controller.submit_move(0).await.unwrap();

    let hint = controller.request_hint().await.unwrap();

    assert_eq!(hint, None);
    assert_eq!(service.calls().len(), 2);
}

#[tokio::test]
async fn test_hint_failure_releases_locks() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();
    service.fail_advice();

    let err = controller.request_hint().await.unwrap_err();

    assert!(matches!(err, ClientError::AdviceFailure { .. }));
    let session = controller.session().unwrap();
    assert!(!session.move_lock);
    assert!(!session.advice_lock);
}

#[tokio::test]
async fn test_bot_plays_after_human_move() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Bot, Some(Symbol::O))
        .await
        .unwrap();
    service.advise(9, 9);

    controller.submit_move(0).await.unwrap();
    controller.run_bot_turn().await.unwrap();

    // Exactly one advisory request and one submission for the bot side.
    assert_eq!(
        service.calls(),
        vec![
            "create".to_string(),
            "add_tile:0,0,player 1".to_string(),
            "next_move:player 2".to_string(),
            "add_tile:9,9,player 2".to_string(),
        ]
    );
    let session = controller.session().unwrap();
    assert_eq!(session.turn, Symbol::X);
    assert!(!session.board.is_empty(9 * 19 + 9));
    assert!(!session.move_lock);
    assert!(!session.advice_lock);
}

#[tokio::test]
async fn test_bot_opening_move_when_bot_is_first_mover() {
    let service = ScriptedService::default();
    service.advise(4, 4);
    let mut controller = controller(&service);

    controller
        .start_new_game(Mode::Bot, Some(Symbol::X))
        .await
        .unwrap();

    assert_eq!(
        service.calls(),
        vec![
            "create".to_string(),
            "next_move:player 1".to_string(),
            "add_tile:4,4,player 1".to_string(),
        ]
    );
    assert_eq!(controller.session().unwrap().turn, Symbol::O);
}

#[tokio::test]
async fn test_bot_stops_on_unplayable_advice() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Bot, Some(Symbol::O))
        .await
        .unwrap();
    controller.submit_move(0).await.unwrap();
    // Advisor suggests the cell the human just took.
    service.advise(0, 0);

    controller.run_bot_turn().await.unwrap();

    let next_moves = service
        .calls()
        .iter()
        .filter(|c| c.starts_with("next_move"))
        .count();
    assert_eq!(next_moves, 1);
    let session = controller.session().unwrap();
    assert_eq!(session.turn, Symbol::O);
    assert!(!session.advice_lock);
    assert!(!session.move_lock);
}

#[tokio::test]
async fn test_bot_advice_failure_surfaces_and_stops() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Bot, Some(Symbol::O))
        .await
        .unwrap();
    controller.submit_move(0).await.unwrap();
    service.fail_advice();

    let err = controller.run_bot_turn().await.unwrap_err();

    assert!(matches!(err, ClientError::AdviceFailure { .. }));
    let session = controller.session().unwrap();
    assert_eq!(session.turn, Symbol::O);
    assert!(!session.move_lock);
    assert!(!session.advice_lock);
}

#[tokio::test]
async fn test_captures_are_replaced_not_accumulated() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);
    controller
        .start_new_game(Mode::Multiplayer, None)
        .await
        .unwrap();

    service.set_captures(2, 0);
    controller.submit_move(0).await.unwrap();
    assert_eq!(
        controller.session().unwrap().captures,
        CaptureTotals { x: 2, o: 0 }
    );

    service.set_captures(2, 3);
    controller.submit_move(1).await.unwrap();
    assert_eq!(
        controller.session().unwrap().captures,
        CaptureTotals { x: 2, o: 3 }
    );
}

#[tokio::test]
async fn test_submit_without_session_is_ignored() {
    let service = ScriptedService::default();
    let mut controller = controller(&service);

    let status = controller.submit_move(0).await.unwrap();

    assert_eq!(status, SubmitStatus::Ignored);
    assert!(service.calls().is_empty());
}
