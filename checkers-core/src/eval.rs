//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, PieceCounts};
use crate::pieces::Cell;

/// Score of a decided game (red perspective: positive means red won)
pub const WIN_VALUE: f32 = 1000.0;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Material value of a pawn
    pub pawn_value: f32,
    /// Material value of a queen
    pub queen_value: f32,
    /// Bonus per row a pawn has advanced from its own back row
    pub advancement_weight: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            pawn_value: 5.0,
            queen_value: 10.0,
            advancement_weight: 0.8,
        }
    }
}

/// Static score plus the raw piece counts it was computed from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Positive favours red, negative favours black
    pub score: f32,
    pub piece_counts: PieceCounts,
}

/// Evaluate a board from red's perspective
pub fn evaluate(board: &Board, heuristics: &Heuristics) -> Evaluation {
    let mut score = 0.0f32;
    let mut piece_counts = PieceCounts::default();

    for (pos, cell) in board.occupied() {
        match cell {
            Cell::RedPawn => {
                piece_counts.red += 1;
                score += heuristics.pawn_value + heuristics.advancement_weight * pos.row as f32;
            }
            Cell::BlackPawn => {
                piece_counts.black += 1;
                score -= heuristics.pawn_value + heuristics.advancement_weight * (7 - pos.row) as f32;
            }
            Cell::RedQueen => {
                piece_counts.red += 1;
                score += heuristics.queen_value;
            }
            Cell::BlackQueen => {
                piece_counts.black += 1;
                score -= heuristics.queen_value;
            }
            Cell::Empty => {}
        }
    }

    Evaluation {
        score,
        piece_counts,
    }
}
