//! Minimax search with alpha-beta pruning, and the AI move selector

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, DIAGONALS};
use crate::config::EngineConfig;
use crate::eval::{evaluate, Evaluation, Heuristics, WIN_VALUE};
use crate::game::{Game, GameResult};
use crate::moves::{apply_move, generate_moves, is_exposed, is_promotion, Move};
use crate::pieces::{Cell, Side};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 4;

/// Adjusted values closer than this are treated as equal
const TIE_EPSILON: f32 = 1e-4;

// ============================================================================
// SELECTION RESULT TYPES
// ============================================================================

/// Adjustments added to the search score of each root move.
/// They bias the top-level choice only; the search tree never sees them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveBonuses {
    /// Added when the move promotes a pawn
    pub promotion: f32,
    /// Subtracted when the moved piece can be captured by the reply
    pub exposure_penalty: f32,
}

impl Default for MoveBonuses {
    fn default() -> Self {
        Self {
            promotion: 10.0,
            exposure_penalty: 5.0,
        }
    }
}

/// A square next to a stuck piece
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub position: Position,
    pub cell: Cell,
}

/// One AI piece and its diagonal surroundings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDiagnostic {
    pub position: Position,
    pub cell: Cell,
    pub neighbors: Vec<Neighbor>,
}

/// Why the selector could not return a move
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("AI has no pieces")]
    NoPieces,
    #[error("no valid moves")]
    NoValidMoves { diagnostics: Vec<PieceDiagnostic> },
}

impl SelectError {
    /// Map diagnostics back from a mirrored board
    fn mirrored(self) -> Self {
        match self {
            SelectError::NoPieces => SelectError::NoPieces,
            SelectError::NoValidMoves { diagnostics } => SelectError::NoValidMoves {
                diagnostics: diagnostics
                    .into_iter()
                    .map(|d| PieceDiagnostic {
                        position: d.position.mirrored(),
                        cell: d.cell.swapped(),
                        neighbors: d
                            .neighbors
                            .into_iter()
                            .map(|n| Neighbor {
                                position: n.position.mirrored(),
                                cell: n.cell.swapped(),
                            })
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}

// ============================================================================
// CHECKERS AI
// ============================================================================

/// Alpha-beta AI player. Hard-wired to black; red moves are chosen on the
/// mirrored board.
pub struct CheckersAI {
    pub depth: u32,
    pub heuristics: Heuristics,
    pub bonuses: MoveBonuses,
    rng: ChaCha8Rng,
}

impl CheckersAI {
    /// AI with default weights and an entropy-seeded tie-breaker
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            heuristics: Heuristics::default(),
            bonuses: MoveBonuses::default(),
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(depth: u32, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ..Self::new(depth)
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            depth: config.depth,
            heuristics: config.heuristics.clone(),
            bonuses: config.bonuses.clone(),
            rng,
        }
    }

    /// Choose black's move
    pub fn select_move(&mut self, board: &Board) -> Result<Move, SelectError> {
        select_best_move(
            board,
            self.depth,
            &self.heuristics,
            &self.bonuses,
            &mut self.rng,
        )
    }

    /// Choose a move for either side
    pub fn select_move_for(&mut self, board: &Board, side: Side) -> Result<Move, SelectError> {
        match side {
            Side::Black => self.select_move(board),
            Side::Red => self
                .select_move(&board.mirrored())
                .map(|mv| mv.mirrored())
                .map_err(SelectError::mirrored),
        }
    }

    /// Play a game against itself until it ends or `max_moves` is reached
    pub fn play_game(&mut self, initial: Game, max_moves: usize) -> (Game, Vec<Move>) {
        let mut game = initial;
        let mut history = Vec::new();

        while game.result() == GameResult::Ongoing && history.len() < max_moves {
            match self.select_move_for(&game.board, game.turn) {
                Ok(mv) => {
                    game.play(&mv);
                    history.push(mv);
                }
                Err(e) => {
                    tracing::warn!(turn = %game.turn, "AI could not move: {}", e);
                    break;
                }
            }
        }

        (game, history)
    }

    /// Evaluate a position
    pub fn evaluate(&self, board: &Board) -> Evaluation {
        evaluate(board, &self.heuristics)
    }
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Depth-bounded minimax with alpha-beta pruning. `maximizing` means red is
/// to move. Scores are from red's perspective.
pub fn minimax(
    board: &Board,
    depth: u32,
    maximizing: bool,
    alpha: f32,
    beta: f32,
    heuristics: &Heuristics,
) -> f32 {
    let mut nodes = 0;
    search(board, depth, maximizing, alpha, beta, heuristics, &mut nodes)
}

fn search(
    board: &Board,
    depth: u32,
    maximizing: bool,
    mut alpha: f32,
    mut beta: f32,
    heuristics: &Heuristics,
    nodes: &mut u64,
) -> f32 {
    *nodes += 1;

    // Terminal check precedes the depth limit
    let eval = evaluate(board, heuristics);
    if eval.piece_counts.red == 0 {
        return -WIN_VALUE;
    }
    if eval.piece_counts.black == 0 {
        return WIN_VALUE;
    }

    if depth == 0 {
        return eval.score;
    }

    let side = if maximizing { Side::Red } else { Side::Black };
    let moves = generate_moves(board, side);
    if moves.is_empty() {
        return if maximizing { -WIN_VALUE } else { WIN_VALUE };
    }

    if maximizing {
        let mut best = f32::NEG_INFINITY;
        for mv in &moves {
            let child = apply_move(board, mv);
            let score = search(&child, depth - 1, false, alpha, beta, heuristics, nodes);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f32::INFINITY;
        for mv in &moves {
            let child = apply_move(board, mv);
            let score = search(&child, depth - 1, true, alpha, beta, heuristics, nodes);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

// ============================================================================
// MOVE SELECTION
// ============================================================================

struct Candidate {
    mv: Move,
    exposed: bool,
}

/// Select black's move.
///
/// Captures short-circuit the search: the longest capture chain is played,
/// the first one found on ties. Otherwise every move is scored by a search of
/// red's reply, adjusted by `bonuses`, and a random move is drawn from the
/// best-scoring ones, preferring moves that leave the piece safe.
pub fn select_best_move<R: Rng + ?Sized>(
    board: &Board,
    depth: u32,
    heuristics: &Heuristics,
    bonuses: &MoveBonuses,
    rng: &mut R,
) -> Result<Move, SelectError> {
    if board.piece_counts().black == 0 {
        return Err(SelectError::NoPieces);
    }

    let moves = generate_moves(board, Side::Black);
    if moves.is_empty() {
        return Err(SelectError::NoValidMoves {
            diagnostics: diagnose(board, Side::Black),
        });
    }

    if let Some(capture) = longest_capture(&moves) {
        tracing::debug!(captured = capture.captured.len(), "AI takes capture");
        return Ok(capture.clone());
    }

    let mut nodes = 0u64;
    let mut best_value = f32::NEG_INFINITY;
    let mut tied: Vec<Candidate> = Vec::new();

    for mv in moves {
        let child = apply_move(board, &mv);
        let score = search(
            &child,
            depth,
            true,
            f32::NEG_INFINITY,
            f32::INFINITY,
            heuristics,
            &mut nodes,
        );

        // Black prefers low red scores
        let mut value = -score;
        if is_promotion(board, &mv) {
            value += bonuses.promotion;
        }
        let exposed = is_exposed(&child, mv.to, Side::Red);
        if exposed {
            value -= bonuses.exposure_penalty;
        }

        if value > best_value + TIE_EPSILON {
            best_value = value;
            tied.clear();
            tied.push(Candidate { mv, exposed });
        } else if (value - best_value).abs() <= TIE_EPSILON {
            tied.push(Candidate { mv, exposed });
        }
    }

    if tied.len() > 1 && tied.iter().any(|c| !c.exposed) {
        tied.retain(|c| !c.exposed);
    }

    tracing::debug!(nodes, best_value, candidates = tied.len(), "search complete");

    tied.choose(rng)
        .map(|c| c.mv.clone())
        .ok_or_else(|| SelectError::NoValidMoves {
            diagnostics: diagnose(board, Side::Black),
        })
}

/// Longest capture chain, first encountered on ties
fn longest_capture(moves: &[Move]) -> Option<&Move> {
    let mut best: Option<&Move> = None;
    for mv in moves.iter().filter(|m| m.is_capture()) {
        if best.map_or(true, |b| mv.captured.len() > b.captured.len()) {
            best = Some(mv);
        }
    }
    best
}

/// Every piece of `side` with its diagonal neighbours
fn diagnose(board: &Board, side: Side) -> Vec<PieceDiagnostic> {
    board
        .pieces(side)
        .map(|(position, cell)| PieceDiagnostic {
            position,
            cell,
            neighbors: DIAGONALS
                .iter()
                .filter_map(|&(drow, dcol)| position.offset(drow, dcol))
                .map(|n| Neighbor {
                    position: n,
                    cell: board.get(n),
                })
                .collect(),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
