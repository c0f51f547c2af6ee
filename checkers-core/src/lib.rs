//! Checkers Core - Rule engine and AI
//!
//! This crate provides the core game logic for checkers:
//! - Board geometry (8x8 grid, dark squares playable)
//! - Piece types and sides
//! - Move generation with forced capture and multi-jump chains
//! - Human move validation for a live game
//! - Position evaluation
//! - Alpha-beta minimax AI

pub mod board;
pub mod pieces;
pub mod moves;
pub mod game;
pub mod eval;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{Board, PieceCounts, Position, BOARD_SIZE};
pub use pieces::{Cell, Side};
pub use moves::{apply_move, generate_moves, Move};
pub use game::{check_human_move, Game, GameResult, Rejection};
pub use eval::{evaluate, Evaluation, Heuristics, WIN_VALUE};
pub use ai::{minimax, select_best_move, CheckersAI, MoveBonuses, PieceDiagnostic, SelectError};
pub use config::EngineConfig;

/// Wire-format decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid cell code: {0}")]
    InvalidCell(u8),
}
