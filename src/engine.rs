//! Move evaluator for the computer player and the human's hint button
//!
//! Every empty intersection is tried twice on a private copy of the board:
//! once as our stone and once as the opponent's. Each placement is scored
//! with [`score_placement`] and undone again. The best of our moves is
//! compared with the best of theirs, so a strong enough opponent threat is
//! answered by playing on the cell the opponent wants.
//!
//! # Example
//!
//! ```
//! use pente::{Board, MoveEvaluator, Stone};
//!
//! let mut board = Board::new();
//! board.place_stone(Stone::White, "J10").unwrap();
//!
//! let mut evaluator = MoveEvaluator::with_seed(7);
//! if let Some(best) = evaluator.best_move(&board, Stone::Black, Stone::White) {
//!     println!("Play {}{}", best.pos, best.rationale(Stone::Black));
//! }
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos, Stone, CENTER_RING};
use crate::eval::{score_placement, EvaluatedMove, MoveReason};

/// Inner bound forcing the first player's second stone away from the center
const SECOND_MOVE_DISTANCE: u8 = 3;

/// Single-ply evaluator with random tie-breaking.
///
/// The random source is injectable so games can be replayed with a seed.
pub struct MoveEvaluator<R: Rng = StdRng> {
    rng: R,
}

impl MoveEvaluator<StdRng> {
    /// Evaluator seeded from system entropy
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Evaluator with reproducible tie-breaking
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MoveEvaluator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MoveEvaluator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Best move for `mover`, whose opponent is `opponent`.
    ///
    /// `board` itself is never modified. Returns `None` when no cell accepts
    /// a stone for both sides (full board, finished game, or every cell
    /// restricted).
    pub fn best_move(&mut self, board: &Board, mover: Stone, opponent: Stone) -> Option<EvaluatedMove> {
        let mut sim = board.clone();
        let depth = sim.history_len();

        let mut our_best: Option<EvaluatedMove> = None;
        let mut their_best: Option<EvaluatedMove> = None;
        let mut top_moves = Vec::new();

        for pos in Pos::all() {
            let Some(ours) = Self::try_move(&mut sim, pos, mover, mover) else {
                continue;
            };
            debug_assert_eq!(sim.history_len(), depth);

            let Some(theirs) = Self::try_move(&mut sim, pos, opponent, mover) else {
                continue;
            };
            debug_assert_eq!(sim.history_len(), depth);

            if our_best.map_or(true, |best| ours.score >= best.score) {
                our_best = Some(ours);
                top_moves.push(ours);
            }
            if their_best.map_or(true, |best| theirs.score >= best.score) {
                their_best = Some(theirs);
                top_moves.push(theirs);
            }
        }

        let (ours, theirs) = (our_best?, their_best?);
        if ours.reason == MoveReason::Win {
            return Some(ours);
        }

        let mut best = if ours.score > theirs.score { ours } else { theirs };

        top_moves.retain(|m| m.score == best.score);
        if top_moves.len() > 1 {
            if let Some(&pick) = top_moves.choose(&mut self.rng) {
                best = pick;
            }
        }

        self.apply_restrictions(board, &mut best);
        Some(best)
    }

    /// Move the side to play should consider, for the hint button.
    ///
    /// Same search as [`MoveEvaluator::best_move`]; the caller's board is untouched.
    pub fn get_help(&mut self, board: &Board, player: Stone, opponent: Stone) -> Option<EvaluatedMove> {
        self.best_move(board, player, opponent)
    }

    /// Place, score and undo one stone. `None` if the placement is illegal.
    fn try_move(sim: &mut Board, pos: Pos, color: Stone, mover: Stone) -> Option<EvaluatedMove> {
        let placed = sim.place_at(color, pos).ok()?;
        let score = score_placement(sim, &placed, mover);
        let undone = sim.undo_move();
        debug_assert_eq!(undone, Ok(pos));
        Some(EvaluatedMove::new(pos, color, score))
    }

    /// The opening placements are forced, so say so, and spread the
    /// restricted second move over the ring around the center.
    fn apply_restrictions(&mut self, board: &Board, best: &mut EvaluatedMove) {
        if board.outer_bound() == 0 {
            best.reason = MoveReason::BoardRestriction;
        }
        if board.inner_bound() == SECOND_MOVE_DISTANCE {
            best.reason = MoveReason::BoardRestriction;
            let open: Vec<Pos> = CENTER_RING.into_iter().filter(|&p| board.is_empty(p)).collect();
            if !open.is_empty() {
                best.pos = open[self.rng.gen_range(0..open.len())];
            }
        }
    }
}
