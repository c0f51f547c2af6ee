//! Server state management
//!
//! The arena of game sessions keyed by integer id. Session rules (who may act
//! for which colour, when the AI replies) live here; board rules live in
//! checkers-core.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use checkers_core::{
    check_human_move, Board, CheckersAI, EngineConfig, Game, GameResult, Move, Position,
    SelectError, Side,
};
use serde::Serialize;

use crate::error::ApiError;

/// A seat at a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
    pub color: Side,
    pub is_ai: bool,
}

/// One match in the lobby
pub struct GameSession {
    pub id: u64,
    pub name: String,
    pub game: Game,
    pub players: Vec<Player>,
    pub ai_opponent: bool,
    pub chat: Vec<String>,
    /// Present while the AI is not thinking
    ai: Option<CheckersAI>,
}

/// Lobby entry
#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub id: u64,
    pub name: String,
    pub ai_opponent: bool,
    pub number_of_players: usize,
    pub turn: Side,
    pub result: GameResult,
}

/// Full game state sent to clients
#[derive(Clone, Debug, Serialize)]
pub struct GameView {
    pub id: u64,
    pub name: String,
    pub board: Board,
    pub turn: Side,
    pub result: GameResult,
    pub ai_opponent: bool,
    pub players: Vec<Player>,
    pub chat: Vec<String>,
}

impl GameSession {
    fn new(id: u64, name: String, ai: Option<CheckersAI>) -> Self {
        let ai_opponent = ai.is_some();
        let mut players = vec![Player {
            color: Side::Red,
            is_ai: false,
        }];
        if ai_opponent {
            players.push(Player {
                color: Side::Black,
                is_ai: true,
            });
        }

        Self {
            id,
            name,
            game: Game::new(),
            players,
            ai_opponent,
            chat: Vec::new(),
            ai,
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id,
            name: self.name.clone(),
            ai_opponent: self.ai_opponent,
            number_of_players: self.players.len(),
            turn: self.game.turn,
            result: self.game.result(),
        }
    }

    pub fn view(&self) -> GameView {
        GameView {
            id: self.id,
            name: self.name.clone(),
            board: self.game.board,
            turn: self.game.turn,
            result: self.game.result(),
            ai_opponent: self.ai_opponent,
            players: self.players.clone(),
            chat: self.chat.clone(),
        }
    }

    /// Seat a second player. AI games are always full; the joiner plays red.
    pub fn join(&mut self) -> Result<Side, ApiError> {
        if self.ai_opponent {
            return Ok(Side::Red);
        }
        if self.players.len() >= 2 {
            return Err(ApiError::GameFull(self.id));
        }
        self.players.push(Player {
            color: Side::Black,
            is_ai: false,
        });
        Ok(Side::Black)
    }

    /// Apply a move on behalf of `color`, enforcing turn and ownership
    pub fn apply_player_move(
        &mut self,
        color: Side,
        selected: Position,
        destination: Position,
    ) -> Result<Move, ApiError> {
        if self.game.result() != GameResult::Ongoing {
            return Err(ApiError::GameOver(self.id));
        }
        if self.ai_opponent && color == Side::Black {
            return Err(ApiError::AiControlled);
        }
        if color != self.game.turn {
            return Err(ApiError::NotYourTurn(color));
        }
        if !self.game.board.get(selected).belongs_to(color) {
            return Err(ApiError::NotYourPiece(color));
        }

        let mv = check_human_move(&self.game.board, selected, destination)?;
        self.game.play(&mv);
        Ok(mv)
    }

    /// Hand out the board and AI if it is the AI's turn to move
    pub fn take_ai_turn(&mut self) -> Option<(Board, CheckersAI)> {
        if !self.ai_opponent
            || self.game.turn != Side::Black
            || self.game.result() != GameResult::Ongoing
        {
            return None;
        }
        self.ai.take().map(|ai| (self.game.board, ai))
    }

    /// Return the AI and apply its decision
    pub fn finish_ai_turn(
        &mut self,
        ai: CheckersAI,
        decision: Result<Move, SelectError>,
    ) -> Result<Move, SelectError> {
        self.ai = Some(ai);
        match &decision {
            Ok(mv) => {
                tracing::info!(game = self.id, ?mv, "AI moved");
                self.game.play(mv);
            }
            Err(e) => {
                tracing::warn!(game = self.id, "AI has no move ({}), red wins", e);
            }
        }
        decision
    }
}

/// Server-wide shared state
pub struct ServerState {
    games: RwLock<BTreeMap<u64, GameSession>>,
    next_id: AtomicU64,
    pub engine: EngineConfig,
}

impl ServerState {
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            games: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
            engine,
        }
    }

    pub fn games(&self) -> RwLockReadGuard<'_, BTreeMap<u64, GameSession>> {
        self.games.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn games_mut(&self) -> RwLockWriteGuard<'_, BTreeMap<u64, GameSession>> {
        self.games.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new game; the creator plays red
    pub fn create_game(&self, name: String, ai_opponent: bool) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let ai = ai_opponent.then(|| CheckersAI::from_config(&self.engine));

        tracing::info!(game = id, %name, ai_opponent, "game created");
        self.games_mut().insert(id, GameSession::new(id, name, ai));
        id
    }

    /// Reinstall a fresh AI in a game whose search task was lost, so the
    /// next move request can trigger the reply again
    pub fn recover_ai(&self, id: u64) {
        if let Some(session) = self.games_mut().get_mut(&id) {
            if session.ai_opponent && session.ai.is_none() {
                tracing::warn!(game = id, "AI task lost, reinstalling AI");
                session.ai = Some(CheckersAI::from_config(&self.engine));
            }
        }
    }

    /// Remove a multiplayer game. AI games survive a player leaving.
    pub fn end_game(&self, id: u64) -> Result<bool, ApiError> {
        let mut games = self.games_mut();
        let session = games.get(&id).ok_or(ApiError::NotFound(id))?;
        if session.ai_opponent {
            return Ok(false);
        }
        games.remove(&id);
        tracing::info!(game = id, "game ended");
        Ok(true)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
