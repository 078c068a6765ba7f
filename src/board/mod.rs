//! Board representation for Pente

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use crate::error::PenteError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, Placement};

/// Board size (19x19)
pub const BOARD_SIZE: usize = 19;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 361

/// Index of the center row and column (J10)
pub const CENTER_INDEX: u8 = (BOARD_SIZE / 2) as u8;

/// Number of individual directions around a cell
pub const NUM_DIRECTIONS: usize = 8;

/// Row/column deltas for the 8 directions, clockwise from "up" (towards row 19).
///
/// Direction `d` and `d + 4` are always opposite, so `0..4` are the four axes.
pub const DIRECTIONS: [(i32, i32); NUM_DIRECTIONS] = [
    (1, 0),   // up
    (1, 1),   // up right
    (0, 1),   // right
    (-1, 1),  // down right
    (-1, 0),  // down
    (-1, -1), // down left
    (0, -1),  // left
    (1, -1),  // up left
];

/// Number of axes (pairs of opposite directions)
pub const NUM_AXES: usize = NUM_DIRECTIONS / 2;

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    #[default]
    Empty,
    White,
    Black,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Single character used by the save format
    pub fn to_char(self) -> char {
        match self {
            Stone::Empty => 'O',
            Stone::White => 'W',
            Stone::Black => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Stone> {
        match c {
            'O' => Some(Stone::Empty),
            'W' => Some(Stone::White),
            'B' => Some(Stone::Black),
            _ => None,
        }
    }

    /// Human readable color name
    pub fn name(self) -> &'static str {
        match self {
            Stone::Empty => "Empty",
            Stone::White => "White",
            Stone::Black => "Black",
        }
    }

    pub fn from_name(name: &str) -> Option<Stone> {
        match name {
            "White" => Some(Stone::White),
            "Black" => Some(Stone::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position on the board.
///
/// Row 0 is the bottom row ("1"), column 0 is column "A".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

/// The four points exactly 3 steps from the center along each axis
/// (J7, M10, J13, G10).
pub const CENTER_RING: [Pos; 4] = [
    Pos { row: CENTER_INDEX - 3, col: CENTER_INDEX },
    Pos { row: CENTER_INDEX, col: CENTER_INDEX + 3 },
    Pos { row: CENTER_INDEX + 3, col: CENTER_INDEX },
    Pos { row: CENTER_INDEX, col: CENTER_INDEX - 3 },
];

impl Pos {
    /// The center intersection, J10
    pub const CENTER: Pos = Pos { row: CENTER_INDEX, col: CENTER_INDEX };

    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Build a position from signed indices, `None` when off the board
    #[inline]
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Chebyshev distance from the center intersection
    #[inline]
    pub fn distance_from_center(self) -> u8 {
        let dr = (self.row as i32 - CENTER_INDEX as i32).unsigned_abs();
        let dc = (self.col as i32 - CENTER_INDEX as i32).unsigned_abs();
        dr.max(dc) as u8
    }

    /// Step `steps` cells in direction `dir` (index into [`DIRECTIONS`])
    #[inline]
    pub fn offset(self, dir: usize, steps: i32) -> Option<Pos> {
        let (dr, dc) = DIRECTIONS[dir];
        Pos::checked(self.row as i32 + dr * steps, self.col as i32 + dc * steps)
    }

    /// Iterate over every board position in row-major order, row "1" first
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }

    /// Parse `<letter><1-2 digits>` into signed indices without a bounds check.
    ///
    /// Returns `None` if the text does not have the right shape.
    pub fn parse_indices(text: &str) -> Option<(i32, i32)> {
        if text.len() < 2 || text.len() > 3 || !text.is_ascii() {
            return None;
        }
        let (letter, digits) = text.split_at(1);
        let letter = letter.as_bytes()[0];
        if !letter.is_ascii_alphabetic() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: i32 = digits.parse().ok()?;
        let col = (letter.to_ascii_uppercase() - b'A') as i32;
        Some((row - 1, col))
    }
}

impl FromStr for Pos {
    type Err = PenteError;

    /// Parse a human readable coordinate such as `"J10"` or `"a1"`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (row, col) = Pos::parse_indices(text).ok_or(PenteError::Parse)?;
        Pos::checked(row, col).ok_or(PenteError::OutOfBounds)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
