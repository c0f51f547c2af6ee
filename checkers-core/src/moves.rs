//! Move generation and application
//!
//! Generation never mutates the input board. Capture chains are explored on
//! copies of the board with each jumped piece already removed, so a chain can
//! never jump the same square twice and sibling branches never see each
//! other's captures.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, DIAGONALS};
use crate::pieces::{Cell, Side};

/// A complete move: a single step, a slide, or a capture chain
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Jumped squares in the order they were jumped
    #[serde(default)]
    pub captured: Vec<Position>,
}

impl Move {
    /// Non-capturing move
    pub fn step(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: Vec::new(),
        }
    }

    pub fn capture(from: Position, to: Position, captured: Vec<Position>) -> Self {
        Self { from, to, captured }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// The same move on a mirrored board
    pub fn mirrored(&self) -> Self {
        Self {
            from: self.from.mirrored(),
            to: self.to.mirrored(),
            captured: self.captured.iter().map(Position::mirrored).collect(),
        }
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// All legal moves for `side`. If any capture exists only captures are
/// returned. An empty result means `side` has lost.
pub fn generate_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut captures = Vec::new();
    let mut steps = Vec::new();

    for (pos, piece) in board.pieces(side) {
        generate_captures(board, pos, piece, &mut captures);

        // Steps are irrelevant once a capture has been found
        if captures.is_empty() {
            if piece.is_queen() {
                generate_slide_moves(board, pos, piece, &mut steps);
            } else {
                generate_step_moves(board, pos, piece, &mut steps);
            }
        }
    }

    if captures.is_empty() {
        steps
    } else {
        captures
    }
}

/// Capture moves only, for every piece of `side`
pub fn generate_captures_for(board: &Board, side: Side) -> Vec<Move> {
    let mut captures = Vec::new();
    for (pos, piece) in board.pieces(side) {
        generate_captures(board, pos, piece, &mut captures);
    }
    captures
}

/// Directions a piece may move or capture in
fn directions(piece: Cell) -> &'static [(i8, i8)] {
    match piece {
        Cell::RedPawn => &DIAGONALS[0..2],
        Cell::BlackPawn => &DIAGONALS[2..4],
        Cell::RedQueen | Cell::BlackQueen => &DIAGONALS,
        Cell::Empty => &[],
    }
}

fn generate_step_moves(board: &Board, from: Position, piece: Cell, moves: &mut Vec<Move>) {
    for &(drow, dcol) in directions(piece) {
        if let Some(to) = from.offset(drow, dcol) {
            if board.get(to).is_empty() {
                moves.push(Move::step(from, to));
            }
        }
    }
}

fn generate_slide_moves(board: &Board, from: Position, piece: Cell, moves: &mut Vec<Move>) {
    for &(drow, dcol) in directions(piece) {
        let mut current = from;

        while let Some(next) = current.offset(drow, dcol) {
            if !board.get(next).is_empty() {
                break; // Blocked
            }
            moves.push(Move::step(from, next));
            current = next;
        }
    }
}

fn generate_captures(board: &Board, from: Position, piece: Cell, moves: &mut Vec<Move>) {
    // The mover leaves its origin square for the whole chain
    let mut lifted = *board;
    lifted.set(from, Cell::Empty);
    extend_chain(&lifted, from, from, piece, &[], moves);
}

/// Follow every capture available from `at`. Only maximal chains are emitted.
fn extend_chain(
    board: &Board,
    origin: Position,
    at: Position,
    piece: Cell,
    jumped: &[Position],
    moves: &mut Vec<Move>,
) {
    let Some(side) = piece.side() else {
        return;
    };
    let opponent = side.opponent();
    let mut extended = false;

    for &(drow, dcol) in directions(piece) {
        let Some(over) = at.offset(drow, dcol) else {
            continue;
        };
        let Some(landing) = over.offset(drow, dcol) else {
            continue;
        };
        if !board.get(over).belongs_to(opponent) || !board.get(landing).is_empty() {
            continue;
        }

        let mut after = *board;
        after.set(over, Cell::Empty);

        let mut path = jumped.to_vec();
        path.push(over);

        extended = true;
        extend_chain(&after, origin, landing, piece, &path, moves);
    }

    if !extended && !jumped.is_empty() {
        moves.push(Move::capture(origin, at, jumped.to_vec()));
    }
}

// ============================================================================
// APPLY MOVE
// ============================================================================

/// Apply a pre-validated move, return the new board. Captured squares are
/// emptied and a pawn reaching its promotion row becomes a queen.
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    let mut next = *board;
    let mut piece = next.get(mv.from);

    next.set(mv.from, Cell::Empty);
    for &pos in &mv.captured {
        next.set(pos, Cell::Empty);
    }

    if reaches_promotion_row(piece, mv.to) {
        piece = piece.promoted();
    }
    next.set(mv.to, piece);

    next
}

/// True if playing `mv` on `board` promotes a pawn
pub fn is_promotion(board: &Board, mv: &Move) -> bool {
    reaches_promotion_row(board.get(mv.from), mv.to)
}

/// True if `by` could capture the piece standing on `pos` with its next move
pub fn is_exposed(board: &Board, pos: Position, by: Side) -> bool {
    generate_captures_for(board, by)
        .iter()
        .any(|mv| mv.captured.contains(&pos))
}

fn reaches_promotion_row(piece: Cell, to: Position) -> bool {
    match piece.side() {
        Some(side) => piece.is_pawn() && to.row == side.promotion_row(),
        None => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::standard();
        let moves = generate_moves(&board, Side::Red);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_capture() && m.to.row == 3));

        let black = generate_moves(&board, Side::Black);
        assert_eq!(black.len(), 7);
        assert!(black.iter().all(|m| m.to.row == 4));
    }

    #[test]
    fn test_single_capture_is_forced() {
        let board = Board::with_pieces(&[
            (pos(2, 3), Cell::RedPawn),
            (pos(3, 4), Cell::BlackPawn),
            (pos(0, 0), Cell::RedPawn),
        ]);
        let moves = generate_moves(&board, Side::Red);
        assert_eq!(moves, vec![Move::capture(pos(2, 3), pos(4, 5), vec![pos(3, 4)])]);
    }

    #[test]
    fn test_pawn_cannot_capture_backward() {
        let board = Board::with_pieces(&[
            (pos(4, 4), Cell::RedPawn),
            (pos(3, 3), Cell::BlackPawn),
        ]);
        let moves = generate_moves(&board, Side::Red);
        assert!(moves.iter().all(|m| !m.is_capture()));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_own_piece_not_jumped() {
        let board = Board::with_pieces(&[
            (pos(2, 2), Cell::RedPawn),
            (pos(3, 3), Cell::RedPawn),
        ]);
        let moves = generate_moves(&board, Side::Red);
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_double_jump_is_one_move() {
        let board = Board::with_pieces(&[
            (pos(6, 1), Cell::BlackPawn),
            (pos(5, 2), Cell::RedPawn),
            (pos(3, 4), Cell::RedPawn),
        ]);
        let moves = generate_moves(&board, Side::Black);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].from, pos(6, 1));
        assert_eq!(moves[0].to, pos(2, 5));
        assert_eq!(moves[0].captured, vec![pos(5, 2), pos(3, 4)]);
    }

    #[test]
    fn test_branching_chain_yields_both_paths() {
        // From (4,4) the red pawn can continue either left or right
        let board = Board::with_pieces(&[
            (pos(2, 2), Cell::RedPawn),
            (pos(3, 3), Cell::BlackPawn),
            (pos(5, 3), Cell::BlackPawn),
            (pos(5, 5), Cell::BlackPawn),
        ]);
        let moves = generate_moves(&board, Side::Red);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.captured.len() == 2));
        let targets: Vec<_> = moves.iter().map(|m| m.to).collect();
        assert!(targets.contains(&pos(6, 2)));
        assert!(targets.contains(&pos(6, 6)));
    }

    #[test]
    fn test_queen_slides_and_captures_backward() {
        let board = Board::with_pieces(&[(pos(3, 3), Cell::RedQueen)]);
        let moves = generate_moves(&board, Side::Red);
        // 3 + 4 + 3 + 3 squares along the four diagonals
        assert_eq!(moves.len(), 13);

        let board = Board::with_pieces(&[
            (pos(3, 3), Cell::RedQueen),
            (pos(2, 2), Cell::BlackPawn),
        ]);
        let moves = generate_moves(&board, Side::Red);
        assert_eq!(moves, vec![Move::capture(pos(3, 3), pos(1, 1), vec![pos(2, 2)])]);
    }

    #[test]
    fn test_queen_chain_may_return_to_origin() {
        let board = Board::with_pieces(&[
            (pos(2, 2), Cell::BlackQueen),
            (pos(3, 3), Cell::RedPawn),
            (pos(5, 3), Cell::RedPawn),
            (pos(5, 1), Cell::RedPawn),
            (pos(3, 1), Cell::RedPawn),
        ]);
        let moves = generate_moves(&board, Side::Black);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert_eq!(mv.captured.len(), 4);
            assert_eq!(mv.to, pos(2, 2));
        }
    }

    #[test]
    fn test_apply_move_promotes() {
        let board = Board::with_pieces(&[(pos(6, 2), Cell::RedPawn)]);
        let mv = Move::step(pos(6, 2), pos(7, 3));
        assert!(is_promotion(&board, &mv));
        let next = apply_move(&board, &mv);
        assert_eq!(next.get(pos(7, 3)), Cell::RedQueen);
        assert!(next.get(pos(6, 2)).is_empty());
        // Input untouched
        assert_eq!(board.get(pos(6, 2)), Cell::RedPawn);
    }

    #[test]
    fn test_apply_capture_clears_jumped() {
        let board = Board::with_pieces(&[
            (pos(6, 1), Cell::BlackPawn),
            (pos(5, 2), Cell::RedPawn),
            (pos(3, 4), Cell::RedPawn),
        ]);
        let mv = generate_moves(&board, Side::Black).remove(0);
        let next = apply_move(&board, &mv);
        assert_eq!(next.piece_counts().red, 0);
        assert_eq!(next.get(pos(2, 5)), Cell::BlackPawn);
    }

    #[test]
    fn test_is_exposed() {
        let board = Board::with_pieces(&[
            (pos(4, 4), Cell::BlackPawn),
            (pos(3, 3), Cell::RedPawn),
        ]);
        assert!(is_exposed(&board, pos(4, 4), Side::Red));
        let blocked = Board::with_pieces(&[
            (pos(4, 4), Cell::BlackPawn),
            (pos(3, 3), Cell::RedPawn),
            (pos(5, 5), Cell::BlackPawn),
        ]);
        assert!(!is_exposed(&blocked, pos(4, 4), Side::Red));
    }

    #[test]
    fn test_move_wire_format() {
        let mv = Move::capture(pos(2, 3), pos(4, 5), vec![pos(3, 4)]);
        let json = serde_json::to_value(&mv).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": {"row": 2, "col": 3},
                "to": {"row": 4, "col": 5},
                "captured": [{"row": 3, "col": 4}]
            })
        );
        let step: Move = serde_json::from_str(r#"{"from":{"row":2,"col":2},"to":{"row":3,"col":3}}"#).unwrap();
        assert!(!step.is_capture());
    }
}
