//! Human and computer participants

use std::fmt;

use rand::Rng;

use crate::board::{Board, Placement, Stone};
use crate::engine::MoveEvaluator;
use crate::error::PenteError;
use crate::eval::EvaluatedMove;

/// Who is behind a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    pub fn name(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Computer => "Computer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Human" => Some(PlayerKind::Human),
            "Computer" => Some(PlayerKind::Computer),
            _ => None,
        }
    }

    #[inline]
    pub fn other(self) -> Self {
        match self {
            PlayerKind::Human => PlayerKind::Computer,
            PlayerKind::Computer => PlayerKind::Human,
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Player identity as shown in messages: `"Human - White"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTag {
    pub kind: PlayerKind,
    pub color: Stone,
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind, self.color)
    }
}

/// Result of [`Player::make_move`]
#[derive(Debug, Clone)]
pub struct MoveChoice {
    pub placement: Placement,
    /// The evaluator's pick, for computer moves
    pub advice: Option<EvaluatedMove>,
}

/// A participant in the tournament.
///
/// Captured pairs belong to the current round, the tournament score
/// carries over between rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub kind: PlayerKind,
    pub color: Stone,
    captured_pairs: usize,
    tournament_score: u32,
}

impl Player {
    pub fn new(kind: PlayerKind) -> Self {
        Self { kind, color: Stone::Empty, captured_pairs: 0, tournament_score: 0 }
    }

    /// Player restored from a save
    pub fn with_totals(kind: PlayerKind, color: Stone, captured_pairs: usize, tournament_score: u32) -> Self {
        Self { kind, color, captured_pairs, tournament_score }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn tag(&self) -> PlayerTag {
        PlayerTag { kind: self.kind, color: self.color }
    }

    #[inline]
    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }

    #[inline]
    pub fn captured_pairs(&self) -> usize {
        self.captured_pairs
    }

    #[inline]
    pub fn tournament_score(&self) -> u32 {
        self.tournament_score
    }

    pub fn add_captured_pairs(&mut self, pairs: usize) {
        self.captured_pairs += pairs;
    }

    /// Take back pairs credited by an undone move
    pub fn remove_captured_pairs(&mut self, pairs: usize) {
        self.captured_pairs = self.captured_pairs.saturating_sub(pairs);
    }

    pub fn add_tournament_score(&mut self, points: u32) {
        self.tournament_score += points;
    }

    /// Clear per-round state before a new round
    pub fn reset_round(&mut self) {
        self.captured_pairs = 0;
        self.color = Stone::Empty;
    }

    /// Play this player's stone.
    ///
    /// A human places `input`; a computer ignores it and plays the
    /// evaluator's choice.
    pub fn make_move<R: Rng>(
        &self,
        board: &mut Board,
        next_color: Stone,
        input: Option<&str>,
        evaluator: &mut MoveEvaluator<R>,
    ) -> Result<MoveChoice, PenteError> {
        match self.kind {
            PlayerKind::Human => {
                let text = input.ok_or(PenteError::MissingInput)?;
                let placement = board.place_stone(self.color, text)?;
                Ok(MoveChoice { placement, advice: None })
            }
            PlayerKind::Computer => {
                let Some(best) = evaluator.best_move(board, self.color, next_color) else {
                    return Err(if board.has_winner() {
                        PenteError::GameAlreadyWon
                    } else {
                        PenteError::BoardFull
                    });
                };
                let placement = board.place_at(self.color, best.pos)?;
                Ok(MoveChoice { placement, advice: Some(best) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn test_tag_format() {
        let mut player = Player::new(PlayerKind::Computer);
        player.color = Stone::Black;
        assert_eq!(player.tag().to_string(), "Computer - Black");
        assert_eq!(PlayerKind::from_name("Human"), Some(PlayerKind::Human));
        assert_eq!(PlayerKind::from_name("human"), None);
        assert_eq!(PlayerKind::Human.other(), PlayerKind::Computer);
    }

    #[test]
    fn test_round_reset_keeps_score() {
        let mut player = Player::new(PlayerKind::Human);
        player.color = Stone::White;
        player.add_captured_pairs(3);
        player.add_tournament_score(7);
        player.remove_captured_pairs(1);
        assert_eq!(player.captured_pairs(), 2);

        player.reset_round();
        assert_eq!(player.captured_pairs(), 0);
        assert_eq!(player.tournament_score(), 7);
        assert_eq!(player.color, Stone::Empty);
    }

    #[test]
    fn test_human_needs_input() {
        let player = Player::with_totals(PlayerKind::Human, Stone::White, 0, 0);
        let mut board = Board::new();
        let mut evaluator = MoveEvaluator::with_seed(0);

        let err = player.make_move(&mut board, Stone::Black, None, &mut evaluator);
        assert_eq!(err.unwrap_err(), PenteError::MissingInput);

        let choice = player.make_move(&mut board, Stone::Black, Some("K10"), &mut evaluator).unwrap();
        assert_eq!(choice.placement.pos, Pos::new(9, 10));
        assert!(choice.advice.is_none());
        assert_eq!(board.get(Pos::new(9, 10)), Stone::White);
    }

    #[test]
    fn test_computer_plays_evaluator_choice() {
        let player = Player::with_totals(PlayerKind::Computer, Stone::White, 0, 0);
        let mut board = Board::new();
        board.set_bounds(0, 0).unwrap();
        let mut evaluator = MoveEvaluator::with_seed(0);

        let choice = player.make_move(&mut board, Stone::Black, Some("A1"), &mut evaluator).unwrap();
        assert_eq!(choice.placement.pos, Pos::CENTER);
        assert_eq!(choice.advice.map(|a| a.pos), Some(Pos::CENTER));
        assert_eq!(board.get(Pos::CENTER), Stone::White);
    }
}
