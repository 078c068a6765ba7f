//! Line detection: directional sequences, runs through a cell, and the
//! "exactly n" runs used for end-of-round scoring.
//!
//! Every count here is centered on one intersection and looks outward in the
//! 8 directions. The queried cell is step 0 of each directional sequence, so
//! when two opposite directions are added together that cell is counted twice.

use crate::board::{Board, Pos, Stone, BOARD_SIZE, NUM_AXES, NUM_DIRECTIONS};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Stones read outward from a cell in each of the 8 directions
pub type Sequences = [Vec<Stone>; NUM_DIRECTIONS];

/// Read up to `n` stones outward from `pos` in every direction.
///
/// Step 0 is `pos` itself; sequences are truncated at the board edge.
pub fn color_sequences(board: &Board, n: usize, pos: Pos) -> Sequences {
    std::array::from_fn(|dir| {
        (0..n as i32)
            .map_while(|step| pos.offset(dir, step))
            .map(|p| board.get(p))
            .collect()
    })
}

/// Length of the leading run equal to the first stone.
///
/// An empty first cell gives 0.
pub fn count_same(seq: &[Stone]) -> usize {
    match seq.first() {
        None | Some(Stone::Empty) => 0,
        Some(&first) => seq.iter().take_while(|&&s| s == first).count(),
    }
}

/// Per axis, the run lengths of both opposite directions added together
/// (with `pos` counted on both sides), each side looking at most `n` cells.
pub fn cardinal_count(board: &Board, n: usize, pos: Pos) -> [usize; NUM_AXES] {
    let seqs = color_sequences(board, n, pos);
    std::array::from_fn(|axis| count_same(&seqs[axis]) + count_same(&seqs[axis + NUM_AXES]))
}

/// Number of disjoint runs of `n` same-colored stones through `pos`, summed
/// over the 4 axes.
///
/// A combined length of exactly `2n` means two runs of `n` share the center
/// cell; otherwise the double-counted center is removed before dividing.
pub fn num_n_in_a_row(board: &Board, n: usize, pos: Pos) -> usize {
    if n < 2 {
        return 0;
    }

    cardinal_count(board, n, pos)
        .into_iter()
        .map(|mut len| {
            if len > 0 && (len / 2) % n != 0 {
                len -= 1;
            }
            len / n
        })
        .sum()
}

/// Number of runs of exactly `n` stones of `color` anywhere on the board.
///
/// A run longer than `n` does not count. Each run is found once from every
/// one of its stones, hence the final division.
pub fn uninterrupted_stones(board: &Board, n: usize, color: Stone) -> usize {
    if n < 1 || n > BOARD_SIZE - 1 {
        return 0;
    }
    let Some(stones) = board.stones(color) else {
        return 0;
    };

    let total: usize = stones
        .iter_ones()
        .map(|pos| {
            cardinal_count(board, n + 1, pos)
                .into_iter()
                .filter(|&len| len - 1 == n)
                .count()
        })
        .sum();

    total / n
}

/// Whether `pos` is part of 5 or more stones in a row
#[inline]
pub fn has_winning_line(board: &Board, pos: Pos) -> bool {
    num_n_in_a_row(board, WIN_LENGTH, pos) > 0
}
