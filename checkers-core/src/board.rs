//! 8x8 board geometry and grid storage

use serde::{Deserialize, Serialize};

use crate::pieces::{Cell, Side};
use crate::BoardError;

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// Diagonal direction vectors (drow, dcol)
/// Index: 0,1 = toward row 7 (red forward), 2,3 = toward row 0 (black forward)
pub const DIAGONALS: [(i8, i8); 4] = [
    (1, -1),
    (1, 1),
    (-1, -1),
    (-1, 1),
];

/// Square coordinates, row 0 is red's back row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this square is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Playable (dark) square
    pub fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// Square at the given offset, if it is on the board
    pub fn offset(&self, drow: i8, dcol: i8) -> Option<Position> {
        let next = Position::new(self.row + drow, self.col + dcol);
        next.is_valid().then_some(next)
    }

    /// The same square seen from the other side of the board
    pub fn mirrored(&self) -> Position {
        Position::new(BOARD_SIZE - 1 - self.row, BOARD_SIZE - 1 - self.col)
    }
}

/// Count of pieces per side
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCounts {
    pub red: u32,
    pub black: u32,
}

impl PieceCounts {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Red => self.red,
            Side::Black => self.black,
        }
    }
}

/// Row-major grid of cells. Serializes as 8 rows of 8 small integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[u8; 8]; 8]", into = "[[u8; 8]; 8]")]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starting layout: red on dark squares of rows 0-2, black on rows 5-7
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if !pos.is_dark() {
                    continue;
                }
                match row {
                    0..=2 => board.set(pos, Cell::RedPawn),
                    5..=7 => board.set(pos, Cell::BlackPawn),
                    _ => {}
                }
            }
        }
        board
    }

    /// Build a board from explicit placements
    pub fn with_pieces(pieces: &[(Position, Cell)]) -> Self {
        let mut board = Self::empty();
        for &(pos, cell) in pieces {
            board.set(pos, cell);
        }
        board
    }

    /// Cell at `pos`. Off-board positions read as empty.
    pub fn get(&self, pos: Position) -> Cell {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize]
        } else {
            Cell::Empty
        }
    }

    /// Overwrite a square; off-board positions are ignored
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize] = cell;
        }
    }

    /// Iterate occupied squares in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.squares().filter(|(_, cell)| !cell.is_empty())
    }

    /// Iterate the pieces of one side in row-major order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.squares().filter(move |(_, cell)| cell.belongs_to(side))
    }

    pub fn piece_counts(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for (_, cell) in self.occupied() {
            match cell.side() {
                Some(Side::Red) => counts.red += 1,
                Some(Side::Black) => counts.black += 1,
                None => {}
            }
        }
        counts
    }

    /// True when every light square is empty
    pub fn light_squares_empty(&self) -> bool {
        self.occupied().all(|(pos, _)| pos.is_dark())
    }

    /// Rotate 180 degrees and swap colours, so red's position becomes black's
    pub fn mirrored(&self) -> Self {
        let mut board = Self::empty();
        for (pos, cell) in self.occupied() {
            board.set(pos.mirrored(), cell.swapped());
        }
        board
    }

    fn squares(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).map(move |col| {
                let pos = Position::new(row, col);
                (pos, self.get(pos))
            })
        })
    }
}

impl TryFrom<[[u8; 8]; 8]> for Board {
    type Error = BoardError;

    fn try_from(codes: [[u8; 8]; 8]) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        for (row, line) in codes.iter().enumerate() {
            for (col, &code) in line.iter().enumerate() {
                board.cells[row][col] = Cell::try_from(code)?;
            }
        }
        Ok(board)
    }
}

impl From<Board> for [[u8; 8]; 8] {
    fn from(board: Board) -> Self {
        board.cells.map(|line| line.map(u8::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_validity() {
        assert!(Position::new(0, 0).is_valid());
        assert!(Position::new(7, 7).is_valid());
        assert!(!Position::new(8, 0).is_valid());
        assert!(!Position::new(0, -1).is_valid());
        assert_eq!(Position::new(7, 7).offset(1, 1), None);
        assert_eq!(Position::new(3, 3).offset(-1, 1), Some(Position::new(2, 4)));
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        let counts = board.piece_counts();
        assert_eq!(counts, PieceCounts { red: 12, black: 12 });
        assert!(board.light_squares_empty());
        assert_eq!(board.get(Position::new(0, 0)), Cell::RedPawn);
        assert_eq!(board.get(Position::new(7, 7)), Cell::BlackPawn);
        assert!(board.get(Position::new(3, 3)).is_empty());
        assert!(board.get(Position::new(4, 4)).is_empty());
    }

    #[test]
    fn test_wire_format() {
        let board = Board::standard();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with("[[1,0,1,0,1,0,1,0],[0,1,0,1"));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        let bad = json.replacen('1', "9", 1);
        assert!(serde_json::from_str::<Board>(&bad).is_err());
    }

    #[test]
    fn test_mirrored_standard_is_standard() {
        assert_eq!(Board::standard().mirrored(), Board::standard());
        let board = Board::with_pieces(&[(Position::new(2, 2), Cell::RedQueen)]);
        let mirror = board.mirrored();
        assert_eq!(mirror.get(Position::new(5, 5)), Cell::BlackQueen);
        assert_eq!(mirror.mirrored(), board);
    }
}
