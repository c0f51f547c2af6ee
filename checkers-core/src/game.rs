//! Live match state and the human move path
//!
//! The human path validates one request against the live board and applies it
//! in place. It deliberately does not enforce forced capture: a player may
//! decline an available jump. Every rejected request leaves board and turn
//! untouched.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::moves::{apply_move, generate_moves, Move};
use crate::pieces::Side;

/// Furthest a pawn may travel in one request (one step or one jump)
const PAWN_MAX_DISTANCE: i8 = 2;

/// Furthest a queen may travel in one request
const QUEEN_MAX_DISTANCE: i8 = 7;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    BlackWins,
}

impl GameResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Ongoing => None,
            GameResult::RedWins => Some(Side::Red),
            GameResult::BlackWins => Some(Side::Black),
        }
    }

    fn won_by(side: Side) -> Self {
        match side {
            Side::Red => GameResult::RedWins,
            Side::Black => GameResult::BlackWins,
        }
    }
}

/// Why a human move request was refused
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("square off the board")]
    OffBoard,
    #[error("no piece on {0:?}")]
    EmptySource(Position),
    #[error("destination {0:?} is occupied")]
    OccupiedDestination(Position),
    #[error("move is not diagonal")]
    NotDiagonal,
    #[error("pawns only move toward the opponent")]
    WrongDirection,
    #[error("move of {0} rows is too far")]
    TooFar(i8),
    #[error("pawn cannot pass over empty square {0:?}")]
    JumpedEmpty(Position),
    #[error("cannot jump own piece on {0:?}")]
    JumpedOwn(Position),
}

/// A live match: the authoritative board and the side to move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub turn: Side,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, red to move
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            turn: Side::Red,
        }
    }

    pub fn from_board(board: Board, turn: Side) -> Self {
        Self { board, turn }
    }

    /// Legal moves for the side to move, forced capture applied
    pub fn legal_moves(&self) -> Vec<Move> {
        generate_moves(&self.board, self.turn)
    }

    /// Validate and apply a move request in place, toggling the turn.
    /// Returns `false`, leaving the game untouched, if the request is invalid.
    pub fn apply_human_move(&mut self, selected: Position, destination: Position) -> bool {
        match check_human_move(&self.board, selected, destination) {
            Ok(mv) => {
                self.play(&mv);
                true
            }
            Err(reason) => {
                tracing::debug!(?selected, ?destination, %reason, "human move ignored");
                false
            }
        }
    }

    /// Apply an already validated move and pass the turn
    pub fn play(&mut self, mv: &Move) {
        self.board = apply_move(&self.board, mv);
        self.turn = self.turn.opponent();
    }

    /// Win by elimination, or by the side to move having no legal move
    pub fn result(&self) -> GameResult {
        let counts = self.board.piece_counts();
        if counts.red == 0 {
            return GameResult::BlackWins;
        }
        if counts.black == 0 {
            return GameResult::RedWins;
        }
        if self.legal_moves().is_empty() {
            return GameResult::won_by(self.turn.opponent());
        }
        GameResult::Ongoing
    }
}

/// Validate a single human move request against `board`.
///
/// On success returns the move, with any jumped opponent pieces listed in
/// `captured`. Pawns travel at most two rows, so they jump at most one piece; queens
/// travel up to seven rows across empty squares and may jump several pieces.
pub fn check_human_move(
    board: &Board,
    selected: Position,
    destination: Position,
) -> Result<Move, Rejection> {
    if !selected.is_valid() || !destination.is_valid() {
        return Err(Rejection::OffBoard);
    }

    let piece = board.get(selected);
    let side = piece.side().ok_or(Rejection::EmptySource(selected))?;
    if !board.get(destination).is_empty() {
        return Err(Rejection::OccupiedDestination(destination));
    }

    let drow = destination.row - selected.row;
    let dcol = destination.col - selected.col;
    if drow.abs() != dcol.abs() || drow == 0 {
        return Err(Rejection::NotDiagonal);
    }

    let is_queen = piece.is_queen();
    if !is_queen && drow.signum() != side.forward() {
        return Err(Rejection::WrongDirection);
    }

    let distance = drow.abs();
    let max_distance = if is_queen { QUEEN_MAX_DISTANCE } else { PAWN_MAX_DISTANCE };
    if distance > max_distance {
        return Err(Rejection::TooFar(distance));
    }

    let mut captured = Vec::new();
    for step in 1..distance {
        let square = Position::new(
            selected.row + step * drow.signum(),
            selected.col + step * dcol.signum(),
        );

        match board.get(square).side() {
            None if is_queen => {}
            None => return Err(Rejection::JumpedEmpty(square)),
            Some(owner) if owner == side => return Err(Rejection::JumpedOwn(square)),
            Some(_) => captured.push(square),
        }
    }

    Ok(Move::capture(selected, destination, captured))
}

// ============================================================================
// TESTS
// ============================================================================
