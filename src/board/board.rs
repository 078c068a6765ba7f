//! Board structure with move history, capture resolution and placement bounds

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::PenteError;
use crate::rules::capture::{resolve_captures, CAPTURE_NUM};
use crate::rules::lines::{color_sequences, num_n_in_a_row, Sequences, WIN_LENGTH};

/// What a successful placement did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub pos: Pos,
    pub color: Stone,
    /// Number of pairs removed
    pub captured_pairs: usize,
    /// Every removed stone, two per pair
    pub captured: Vec<Pos>,
    /// Lines of five (or more) completed through `pos`
    pub win_lines: usize,
}

/// Record of a move for undo
#[derive(Debug, Clone)]
struct MoveRecord {
    pos: Pos,
    inner: u8,
    outer: u8,
    captured_pairs: usize,
    empty_after: usize,
    /// Cells around `pos` after the stone was written, before captures
    prev_seqs: Sequences,
}

/// Game board
///
/// Stones are only ever added through [`Board::place_stone`] (or replaced
/// wholesale with [`Board::set_board`]); every placement can be reverted
/// with [`Board::undo_move`].
#[derive(Debug, Clone)]
pub struct Board {
    white: Bitboard,
    black: Bitboard,
    history: Vec<MoveRecord>,
    /// Placements must be at least `inner` and at most `outer` away from the center
    inner: u8,
    outer: u8,
    empty: usize,
    last_win_lines: usize,
    last_captured_pairs: usize,
    last_position: Option<Pos>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            white: Bitboard::new(),
            black: Bitboard::new(),
            history: Vec::with_capacity(TOTAL_CELLS),
            inner: 0,
            outer: BOARD_SIZE as u8,
            empty: TOTAL_CELLS,
            last_win_lines: 0,
            last_captured_pairs: 0,
            last_position: None,
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Overwrite one cell, no rule checks and no bookkeeping
    #[inline]
    pub(crate) fn put(&mut self, pos: Pos, stone: Stone) {
        self.black.clear(pos);
        self.white.clear(pos);
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Whether `pos` lies inside the active placement window
    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        let dist = pos.distance_from_center();
        dist >= self.inner && dist <= self.outer
    }

    /// Place a stone given as text (`"J10"`), resolve captures and record the move.
    ///
    /// Checks, in order: parse, grid bounds, restriction window, occupancy,
    /// finished game, full board. A rejected placement changes nothing.
    pub fn place_stone(&mut self, color: Stone, text: &str) -> Result<Placement, PenteError> {
        if color == Stone::Empty {
            return Err(PenteError::InvalidStone);
        }
        let pos: Pos = text.parse()?;

        if !self.in_bounds(pos) {
            return Err(PenteError::RestrictedZone);
        }
        if !self.is_empty(pos) {
            return Err(PenteError::Occupied);
        }
        if self.has_winner() {
            return Err(PenteError::GameAlreadyWon);
        }
        if self.is_full() {
            return Err(PenteError::BoardFull);
        }

        self.put(pos, color);
        let prev_seqs = color_sequences(self, WIN_LENGTH, pos);
        self.empty -= 1;

        let win_lines = num_n_in_a_row(self, WIN_LENGTH, pos);
        let captured = resolve_captures(self, color, pos);
        let captured_pairs = captured.len() / CAPTURE_NUM;
        self.empty += captured.len();

        self.last_win_lines = win_lines;
        self.last_captured_pairs = captured_pairs;
        self.last_position = Some(pos);
        self.history.push(MoveRecord {
            pos,
            inner: self.inner,
            outer: self.outer,
            captured_pairs,
            empty_after: self.empty,
            prev_seqs,
        });

        Ok(Placement { pos, color, captured_pairs, captured, win_lines })
    }

    /// [`Board::place_stone`] for an already parsed position
    pub fn place_at(&mut self, color: Stone, pos: Pos) -> Result<Placement, PenteError> {
        self.place_stone(color, &pos.to_string())
    }

    /// Revert the most recent placement, including any captures it made.
    ///
    /// Returns the position that was emptied.
    pub fn undo_move(&mut self) -> Result<Pos, PenteError> {
        let record = self.history.pop().ok_or(PenteError::NoHistory)?;

        self.inner = record.inner;
        self.outer = record.outer;

        for (dir, seq) in record.prev_seqs.iter().enumerate() {
            for (step, &stone) in seq.iter().enumerate() {
                if let Some(p) = record.pos.offset(dir, step as i32) {
                    self.put(p, stone);
                }
            }
        }
        self.put(record.pos, Stone::Empty);

        self.empty = record.empty_after + 1 - CAPTURE_NUM * record.captured_pairs;
        self.last_win_lines = 0;
        self.last_captured_pairs = 0;
        self.last_position = self.history.last().map(|r| r.pos);

        Ok(record.pos)
    }

    /// Replace every cell. `rows[0]` is row "1".
    ///
    /// Rejects boards of the wrong shape, boards with a completed line of five
    /// and boards without a free cell; the current board is kept in that case.
    /// On success the move history is cleared; bounds are left alone.
    pub fn set_board(&mut self, rows: &[Vec<Stone>]) -> Result<(), PenteError> {
        if rows.len() != BOARD_SIZE || rows.iter().any(|r| r.len() != BOARD_SIZE) {
            return Err(PenteError::InvalidBoardShape);
        }

        let mut next = Board::new();
        next.inner = self.inner;
        next.outer = self.outer;

        let mut empty = 0;
        for (row, cells) in rows.iter().enumerate() {
            for (col, &stone) in cells.iter().enumerate() {
                let pos = Pos::new(row as u8, col as u8);
                next.put(pos, stone);
                if stone == Stone::Empty {
                    empty += 1;
                }
            }
        }
        next.empty = empty;

        let finished = Pos::all()
            .filter(|&p| !next.is_empty(p))
            .any(|p| num_n_in_a_row(&next, WIN_LENGTH, p) > 0);
        if finished {
            return Err(PenteError::GameAlreadyWon);
        }
        if next.is_full() {
            return Err(PenteError::BoardFull);
        }

        *self = next;
        Ok(())
    }

    /// Set the placement window as Chebyshev distances from the center
    pub fn set_bounds(&mut self, inner: i32, outer: i32) -> Result<(), PenteError> {
        let valid = 0..=BOARD_SIZE as i32;
        if !valid.contains(&inner) || !valid.contains(&outer) {
            return Err(PenteError::InvalidBounds);
        }
        self.inner = inner as u8;
        self.outer = outer as u8;
        Ok(())
    }

    /// All rows, row "1" first
    pub fn grid(&self) -> Vec<Vec<Stone>> {
        (0..BOARD_SIZE as u8)
            .map(|row| (0..BOARD_SIZE as u8).map(|col| self.get(Pos::new(row, col))).collect())
            .collect()
    }

    /// All rows, row "19" first, the way the board is drawn and saved
    pub fn rows_top_down(&self) -> Vec<Vec<Stone>> {
        let mut rows = self.grid();
        rows.reverse();
        rows
    }

    #[inline]
    pub fn last_position(&self) -> Option<Pos> {
        self.last_position
    }

    #[inline]
    pub fn last_win_lines(&self) -> usize {
        self.last_win_lines
    }

    #[inline]
    pub fn last_captured_pairs(&self) -> usize {
        self.last_captured_pairs
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty
    }

    /// `(inner, outer)`
    #[inline]
    pub fn bounds(&self) -> (u8, u8) {
        (self.inner, self.outer)
    }

    #[inline]
    pub fn inner_bound(&self) -> u8 {
        self.inner
    }

    #[inline]
    pub fn outer_bound(&self) -> u8 {
        self.outer
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty == 0
    }

    /// The last move completed a line of five
    #[inline]
    pub fn has_winner(&self) -> bool {
        self.last_win_lines > 0
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.has_winner() || self.is_full()
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
