//! Pair capture rules
//!
//! Capture pattern: X-O-O-X where X is the stone just placed and the stone
//! three steps away, and O-O is a pair of the other color. Exactly 2 stones
//! are captured; the window must fit on the board.

use crate::board::{Board, Pos, Stone, NUM_AXES, NUM_DIRECTIONS};

use super::lines::color_sequences;

/// Stones removed by one capture
pub const CAPTURE_NUM: usize = 2;

/// Cells in a capture window: placed stone, the pair, the far stone
const CAPTURE_WINDOW: usize = CAPTURE_NUM + 2;

/// Whether the window `[placed, a, b, far]` captures `a` and `b`
fn is_capture_window(seq: &[Stone], color: Stone) -> bool {
    if seq.len() != CAPTURE_WINDOW {
        return false;
    }
    let (first, last) = (seq[0], seq[CAPTURE_WINDOW - 1]);
    let pair = &seq[1..CAPTURE_WINDOW - 1];

    first == last
        && pair[0] != Stone::Empty
        && pair.iter().all(|&s| s == pair[0])
        && pair[0] != color
}

/// Find the stones `color` at `pos` would capture, without modifying the board.
///
/// Checks all 8 directions independently, so one placement can capture
/// several pairs. Returned positions come in pairs.
pub fn find_captures(board: &Board, color: Stone, pos: Pos) -> Vec<Pos> {
    let seqs = color_sequences(board, CAPTURE_WINDOW, pos);
    let mut captured = Vec::new();

    for dir in 0..NUM_DIRECTIONS {
        // The window starts at `pos`, which must already hold (or be about to hold) `color`
        let mut window = seqs[dir].clone();
        if let Some(first) = window.first_mut() {
            *first = color;
        }
        if is_capture_window(&window, color) {
            captured.extend((1..=CAPTURE_NUM as i32).filter_map(|step| pos.offset(dir, step)));
        }
    }

    captured
}

/// Remove every pair captured by the stone `color` just placed at `pos`.
///
/// Returns the removed positions; the caller accounts for the freed cells.
pub fn resolve_captures(board: &mut Board, color: Stone, pos: Pos) -> Vec<Pos> {
    let captured = find_captures(board, color, pos);
    for &cap in &captured {
        board.put(cap, Stone::Empty);
    }
    captured
}

/// Number of axes on which a `color` stone at `pos` would leave a pair open
/// to capture on the opponent's next move.
///
/// The line `[-2, -1, color, +1, +2]` is read along each axis, the center
/// being the hypothetical stone, and matched against `_ C C X` and `X C C _`
/// where `X` is any stone of the other color.
pub fn potential_captures(board: &Board, color: Stone, pos: Pos) -> usize {
    let seqs = color_sequences(board, CAPTURE_NUM + 1, pos);

    (0..NUM_AXES)
        .filter(|&axis| {
            let mut line: Vec<Stone> = seqs[axis + NUM_AXES].iter().skip(1).rev().copied().collect();
            line.push(color);
            line.extend(seqs[axis].iter().skip(1));

            line.windows(CAPTURE_WINDOW).any(|w| is_exposed_pair(w, color))
        })
        .count()
}

fn is_exposed_pair(window: &[Stone], color: Stone) -> bool {
    let is_other = |s: Stone| s != Stone::Empty && s != color;
    let pair_is_ours = window[1] == color && window[2] == color;

    pair_is_ours
        && ((window[0] == Stone::Empty && is_other(window[3]))
            || (is_other(window[0]) && window[3] == Stone::Empty))
}
