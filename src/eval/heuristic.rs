//! Heuristic scoring of a single placement
//!
//! A placement is scored right after it is made, from the point of view of
//! the color that made it:
//! - lines of five completed
//! - partial lines of 4, 3 and 2 running through the stone
//! - pairs captured
//! - pairs the stone leaves open to capture (only for the side to move)

use std::fmt;

use crate::board::{Board, Placement, Pos, Stone};
use crate::rules::{num_n_in_a_row, potential_captures};

use super::weights::{Weight, BUILD_LENGTHS};

/// Why a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveReason {
    #[default]
    Unknown,
    Win,
    Capture,
    Build,
    /// Only the restricted cells were allowed
    BoardRestriction,
}

impl MoveReason {
    /// Classify a placement score
    pub fn from_score(score: i32) -> Self {
        if score >= Weight::WIN {
            MoveReason::Win
        } else if score >= Weight::CAPTURE {
            MoveReason::Capture
        } else if score > 0 {
            MoveReason::Build
        } else {
            MoveReason::Unknown
        }
    }
}

impl fmt::Display for MoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveReason::Unknown => "unknown",
            MoveReason::Win => "win",
            MoveReason::Capture => "capture",
            MoveReason::Build => "build",
            MoveReason::BoardRestriction => "board restriction",
        };
        f.write_str(name)
    }
}

/// A candidate move with its score.
///
/// `color` is the side whose placement was scored. When it differs from the
/// side asking, the move blocks the opponent rather than furthering our own
/// lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatedMove {
    pub pos: Pos,
    pub color: Stone,
    pub score: i32,
    pub reason: MoveReason,
}

impl EvaluatedMove {
    pub fn new(pos: Pos, color: Stone, score: i32) -> Self {
        Self { pos, color, score, reason: MoveReason::from_score(score) }
    }

    /// Plain English explanation, e.g. `" to prevent a capture!"`
    pub fn rationale(&self, mover: Stone) -> String {
        let goal = match self.reason {
            MoveReason::BoardRestriction => {
                return " because of a board restriction, no other moves available!".to_string();
            }
            MoveReason::Unknown => return " since no move stands out!".to_string(),
            MoveReason::Win => "win",
            MoveReason::Capture => "capture",
            MoveReason::Build => "build",
        };

        if self.color != mover {
            format!(" to prevent a {goal}!")
        } else {
            format!(" to {goal}!")
        }
    }
}

/// Score the placement just made on `board`.
///
/// `mover` is the side actually about to play. Only its own placements get
/// the building bonus and the exposure penalty; the opponent's hypothetical
/// placements are scored on raw threat.
pub fn score_placement(board: &Board, placed: &Placement, mover: Stone) -> i32 {
    let evaluated = placed.color;
    let win_lines = placed.win_lines as i32;
    let mut score = Weight::WIN * win_lines;

    // Shorter lengths also see the stones of longer lines, so the count carries over
    let mut block = 0;
    for n in BUILD_LENGTHS {
        block += num_n_in_a_row(board, n, placed.pos) as i32 - win_lines;
        score += Weight::BUILD * block * (n * n) as i32;
    }

    if block > 0 && evaluated == mover {
        score += Weight::BUILD;
    }

    if score < Weight::WIN && evaluated == mover {
        score -= Weight::CAPTURE * potential_captures(board, evaluated, placed.pos) as i32;
    }

    score + Weight::CAPTURE * placed.captured_pairs as i32
}
