//! Scoring weights for single-move evaluation
//!
//! A completed line outweighs any number of captures on the same move, and a
//! capture outweighs anything that merely builds towards a line.

/// Weights used by [`score_placement`](super::heuristic::score_placement)
pub struct Weight;

impl Weight {
    /// Per line of five completed
    pub const WIN: i32 = 10_000;
    /// Per pair captured, also the penalty per pair left open to capture
    pub const CAPTURE: i32 = 2_000;
    /// Base unit for partial lines, scaled by the square of the line length
    pub const BUILD: i32 = 5;
}

/// Partial line lengths rewarded when building, longest first
pub const BUILD_LENGTHS: [usize; 3] = [4, 3, 2];
