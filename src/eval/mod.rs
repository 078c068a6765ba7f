//! Move evaluation: weights, placement scoring and move reasons

pub mod heuristic;
pub mod weights;

pub use heuristic::{score_placement, EvaluatedMove, MoveReason};
pub use weights::{Weight, BUILD_LENGTHS};
