//! Piece and side definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::BoardError;

/// Side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of a forward step
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// Row on which this side's pawns promote
    pub fn promotion_row(self) -> i8 {
        match self {
            Side::Red => 7,
            Side::Black => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Contents of one square. Discriminants are the wire codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    RedPawn = 1,
    BlackPawn = 2,
    RedQueen = 3,
    BlackQueen = 4,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_queen(self) -> bool {
        matches!(self, Cell::RedQueen | Cell::BlackQueen)
    }

    pub fn is_pawn(self) -> bool {
        matches!(self, Cell::RedPawn | Cell::BlackPawn)
    }

    /// Owner of the piece, `None` for an empty square
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::RedPawn | Cell::RedQueen => Some(Side::Red),
            Cell::BlackPawn | Cell::BlackQueen => Some(Side::Black),
        }
    }

    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// Piece after promotion; queens and empty squares are unchanged
    pub fn promoted(self) -> Self {
        match self {
            Cell::RedPawn => Cell::RedQueen,
            Cell::BlackPawn => Cell::BlackQueen,
            other => other,
        }
    }

    /// Same piece kind owned by the other side
    pub fn swapped(self) -> Self {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::RedPawn => Cell::BlackPawn,
            Cell::BlackPawn => Cell::RedPawn,
            Cell::RedQueen => Cell::BlackQueen,
            Cell::BlackQueen => Cell::RedQueen,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = BoardError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::RedPawn),
            2 => Ok(Cell::BlackPawn),
            3 => Ok(Cell::RedQueen),
            4 => Ok(Cell::BlackQueen),
            other => Err(BoardError::InvalidCell(other)),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_codes() {
        for code in 0..=4u8 {
            let cell = Cell::try_from(code).unwrap();
            assert_eq!(u8::from(cell), code);
        }
        assert!(matches!(Cell::try_from(5), Err(BoardError::InvalidCell(5))));
    }

    #[test]
    fn test_promotion() {
        assert_eq!(Cell::RedPawn.promoted(), Cell::RedQueen);
        assert_eq!(Cell::BlackPawn.promoted(), Cell::BlackQueen);
        assert_eq!(Cell::RedQueen.promoted(), Cell::RedQueen);
        assert_eq!(Cell::Empty.promoted(), Cell::Empty);
    }

    #[test]
    fn test_sides() {
        assert_eq!(Cell::BlackQueen.side(), Some(Side::Black));
        assert_eq!(Cell::Empty.side(), None);
        assert_eq!(Side::Red.opponent(), Side::Black);
        assert_eq!(Side::Red.forward(), 1);
        assert_eq!(Side::Black.promotion_row(), 0);
        assert_eq!(serde_json::to_string(&Side::Black).unwrap(), "\"black\"");
    }
}
