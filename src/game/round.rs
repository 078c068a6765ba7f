//! One round of Pente: turn order, opening restrictions, end detection and
//! the end-of-round tally.

use std::fmt;

use rand::Rng;

use crate::board::{Board, Placement, Pos, Stone, BOARD_SIZE};
use crate::engine::MoveEvaluator;
use crate::error::PenteError;
use crate::eval::EvaluatedMove;
use crate::rules::{uninterrupted_stones, WIN_LENGTH};

use super::player::{Player, PlayerKind, PlayerTag};

/// Captured pairs that win the round outright
pub const CAPTURE_WIN_PAIRS: usize = 5;

/// Points per line of five
pub const WIN_POINTS: u32 = 5;

/// Run length rewarded at the end of a round
pub const SCORED_RUN: usize = 4;

/// Ply at which the first player's second stone must keep away from the center
const SECOND_MOVE_PLY: usize = 2;

/// Inner bound of that second stone
const SECOND_MOVE_DISTANCE: i32 = 3;

/// Ply count assumed for a loaded game in which pairs were already captured
const LOADED_CAPTURE_PLY: usize = 3;

/// Placement window forced by the opening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restriction {
    /// The first stone goes on J10
    Center,
    /// The first player's second stone goes at least 3 away from J10
    AwayFromCenter,
}

impl Restriction {
    pub fn for_ply(ply: usize) -> Option<Self> {
        match ply {
            0 => Some(Restriction::Center),
            SECOND_MOVE_PLY => Some(Restriction::AwayFromCenter),
            _ => None,
        }
    }

    /// `(inner, outer)` bounds; no restriction opens the whole board
    pub fn bounds(restriction: Option<Self>) -> (i32, i32) {
        match restriction {
            Some(Restriction::Center) => (0, 0),
            Some(Restriction::AwayFromCenter) => (SECOND_MOVE_DISTANCE, BOARD_SIZE as i32),
            None => (0, BOARD_SIZE as i32),
        }
    }
}

/// How a round was won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinKind {
    FiveInARow { lines: usize },
    Captures { pairs: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Winner { player: PlayerTag, by: WinKind },
    Tie,
}

/// Why points were given at the end of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardReason {
    FiveInARow { lines: usize },
    Captures { pairs: usize },
    FourInARow { runs: usize },
}

/// Points credited to a player's tournament score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub player: PlayerTag,
    pub points: u32,
    pub reason: AwardReason,
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player = self.player;
        match self.reason {
            AwardReason::FiveInARow { lines } => write!(
                f,
                "Added {WIN_POINTS} points {lines} time(s) to {player}, for placing {WIN_LENGTH} stones in a row, winning the round!"
            ),
            AwardReason::Captures { pairs } => write!(
                f,
                "Added {} point(s) to {player}, for capturing {pairs} pair(s)!",
                self.points
            ),
            AwardReason::FourInARow { runs } => write!(
                f,
                "Added {} point(s) to {player}, for having {runs} set(s) of {SCORED_RUN} uninterrupted stones at the end of the round!",
                self.points
            ),
        }
    }
}

/// Everything one ply did
#[derive(Debug, Clone)]
pub struct PlyOutcome {
    pub player: PlayerTag,
    pub placement: Placement,
    /// The computer's evaluation of its own move
    pub advice: Option<EvaluatedMove>,
    pub end: Option<RoundEnd>,
    /// Non-zero awards, only once the round ended
    pub awards: Vec<Award>,
    /// Restriction now facing the next player
    pub restriction: Option<Restriction>,
}

/// A round in progress (or just finished)
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    /// Both players, in any order; `current` indexes the one to move
    players: [Player; 2],
    current: usize,
    ply: usize,
    end: Option<RoundEnd>,
    /// Pairs captured by each ply still in the board history
    ply_captures: Vec<usize>,
}

impl Round {
    /// Fresh round with `first` playing White
    pub fn new(mut first: Player, mut second: Player) -> Self {
        first.reset_round();
        second.reset_round();
        first.color = Stone::White;
        second.color = Stone::Black;

        let mut round = Self {
            board: Board::new(),
            players: [first, second],
            current: 0,
            ply: 0,
            end: None,
            ply_captures: Vec::new(),
        };
        round.apply_restriction();
        round
    }

    /// Continue a saved game. `players[0]` moves next.
    ///
    /// Fails when the engine refuses the saved board.
    pub fn from_saved(rows: &[Vec<Stone>], players: [Player; 2]) -> Result<Self, PenteError> {
        let mut board = Board::new();
        board.set_board(rows)?;

        let ply = if players.iter().any(|p| p.captured_pairs() > 0) {
            LOADED_CAPTURE_PLY
        } else {
            board.stone_count() as usize
        };

        let mut round = Self { board, players, current: 0, ply, end: None, ply_captures: Vec::new() };
        round.apply_restriction();
        Ok(round)
    }

    /// Start over with the same players, `first` playing White
    pub fn reset(&mut self, first: PlayerKind) {
        let [a, b] = self.players.clone();
        let (first_player, second_player) = if a.kind == first { (a, b) } else { (b, a) };
        *self = Round::new(first_player, second_player);
    }

    fn apply_restriction(&mut self) -> Option<Restriction> {
        let restriction = Restriction::for_ply(self.ply);
        let (inner, outer) = Restriction::bounds(restriction);
        let applied = self.board.set_bounds(inner, outer);
        debug_assert!(applied.is_ok());
        restriction
    }

    /// Let the player to move place a stone.
    ///
    /// `input` is the human's position text; the computer ignores it.
    pub fn play_ply<R: Rng>(
        &mut self,
        input: Option<&str>,
        evaluator: &mut MoveEvaluator<R>,
    ) -> Result<PlyOutcome, PenteError> {
        if self.end.is_some() {
            return Err(PenteError::RoundOver);
        }

        let next_color = self.next_player().color;
        let choice = self.players[self.current].make_move(&mut self.board, next_color, input, evaluator)?;

        let pairs = choice.placement.captured_pairs;
        self.players[self.current].add_captured_pairs(pairs);
        self.ply_captures.push(pairs);

        let mut outcome = PlyOutcome {
            player: self.players[self.current].tag(),
            placement: choice.placement,
            advice: choice.advice,
            end: None,
            awards: Vec::new(),
            restriction: None,
        };

        if let Some(end) = self.check_round_end(outcome.placement.win_lines) {
            self.end = Some(end);
            outcome.end = Some(end);
            outcome.awards = self.tally(end, outcome.placement.win_lines);
        } else {
            self.ply += 1;
            outcome.restriction = self.apply_restriction();
            self.current = 1 - self.current;
        }

        Ok(outcome)
    }

    /// Later checks win over earlier ones: a full board is a tie even if the
    /// last stone completed a line.
    fn check_round_end(&self, win_lines: usize) -> Option<RoundEnd> {
        let player = &self.players[self.current];
        let mut end = None;

        if win_lines > 0 {
            end = Some(RoundEnd::Winner { player: player.tag(), by: WinKind::FiveInARow { lines: win_lines } });
        }
        if player.captured_pairs() >= CAPTURE_WIN_PAIRS {
            let pairs = player.captured_pairs();
            end = Some(RoundEnd::Winner { player: player.tag(), by: WinKind::Captures { pairs } });
        }
        if self.board.is_full() {
            end = Some(RoundEnd::Tie);
        }
        end
    }

    /// Credit the tournament scores and report every non-zero award
    fn tally(&mut self, end: RoundEnd, win_lines: usize) -> Vec<Award> {
        let mut awards = Vec::new();

        if let RoundEnd::Winner { player, .. } = end {
            if win_lines > 0 {
                let points = WIN_POINTS * win_lines as u32;
                self.players[self.current].add_tournament_score(points);
                awards.push(Award { player, points, reason: AwardReason::FiveInARow { lines: win_lines } });
            }
        }

        for player in self.players.iter_mut() {
            let pairs = player.captured_pairs();
            player.add_tournament_score(pairs as u32);
            if pairs > 0 {
                awards.push(Award {
                    player: player.tag(),
                    points: pairs as u32,
                    reason: AwardReason::Captures { pairs },
                });
            }

            let runs = uninterrupted_stones(&self.board, SCORED_RUN, player.color);
            player.add_tournament_score(runs as u32);
            if runs > 0 {
                awards.push(Award {
                    player: player.tag(),
                    points: runs as u32,
                    reason: AwardReason::FourInARow { runs },
                });
            }
        }

        awards
    }

    /// Take back the last stone played this round.
    ///
    /// Returns who played it and where. Not allowed once the round is over.
    pub fn undo_ply(&mut self) -> Result<(PlayerTag, Pos), PenteError> {
        if self.end.is_some() {
            return Err(PenteError::RoundOver);
        }
        let pos = self.board.undo_move()?;

        self.current = 1 - self.current;
        let pairs = self.ply_captures.pop().unwrap_or(0);
        self.players[self.current].remove_captured_pairs(pairs);
        self.ply = self.ply.saturating_sub(1);

        Ok((self.players[self.current].tag(), pos))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, kind: PlayerKind) -> &Player {
        if self.players[0].kind == kind {
            &self.players[0]
        } else {
            &self.players[1]
        }
    }

    #[inline]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    #[inline]
    pub fn next_player(&self) -> &Player {
        &self.players[1 - self.current]
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline]
    pub fn end(&self) -> Option<RoundEnd> {
        self.end
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.end.is_some()
    }

    /// Restriction facing the player to move
    pub fn restriction(&self) -> Option<Restriction> {
        if self.is_over() {
            None
        } else {
            Restriction::for_ply(self.ply)
        }
    }

    /// Whether undo has anything to take back
    pub fn can_undo(&self) -> bool {
        !self.is_over() && self.board.history_len() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_first() -> Round {
        Round::new(Player::new(PlayerKind::Human), Player::new(PlayerKind::Computer))
    }

    fn empty_rows() -> Vec<Vec<Stone>> {
        vec![vec![Stone::Empty; BOARD_SIZE]; BOARD_SIZE]
    }

    fn saved(rows: &[Vec<Stone>], human: (usize, u32), computer: (usize, u32)) -> Round {
        let players = [
            Player::with_totals(PlayerKind::Human, Stone::White, human.0, human.1),
            Player::with_totals(PlayerKind::Computer, Stone::Black, computer.0, computer.1),
        ];
        Round::from_saved(rows, players).unwrap()
    }

    #[test]
    fn test_new_round_forces_center() {
        let round = human_first();
        assert_eq!(round.current_player().kind, PlayerKind::Human);
        assert_eq!(round.current_player().color, Stone::White);
        assert_eq!(round.next_player().color, Stone::Black);
        assert_eq!(round.board().bounds(), (0, 0));
        assert_eq!(round.restriction(), Some(Restriction::Center));
    }

    #[test]
    fn test_opening_restrictions() {
        let mut round = human_first();
        let mut evaluator = MoveEvaluator::with_seed(4);

        assert_eq!(round.play_ply(Some("K10"), &mut evaluator).unwrap_err(), PenteError::RestrictedZone);
        let outcome = round.play_ply(Some("J10"), &mut evaluator).unwrap();
        assert_eq!(outcome.restriction, None);
        assert_eq!(round.board().bounds(), (0, 19));
        assert_eq!(round.ply(), 1);

        // Computer replies anywhere
        let outcome = round.play_ply(None, &mut evaluator).unwrap();
        assert_eq!(outcome.player.kind, PlayerKind::Computer);
        assert!(outcome.advice.is_some());
        assert_eq!(outcome.restriction, Some(Restriction::AwayFromCenter));
        assert_eq!(round.board().bounds(), (3, 19));

        assert_eq!(round.play_ply(Some("K11"), &mut evaluator).unwrap_err(), PenteError::RestrictedZone);
        assert_eq!(round.current_player().kind, PlayerKind::Human);
    }

    #[test]
    fn test_human_move_requires_input() {
        let mut round = human_first();
        let mut evaluator = MoveEvaluator::with_seed(0);
        assert_eq!(round.play_ply(None, &mut evaluator).unwrap_err(), PenteError::MissingInput);
        assert_eq!(round.ply(), 0);
    }

    #[test]
    fn test_five_in_a_row_ends_round() {
        let mut rows = empty_rows();
        for col in 0..4 {
            rows[0][col] = Stone::White;
        }
        for col in 10..14 {
            rows[11][col] = Stone::Black;
        }
        let mut round = saved(&rows, (0, 2), (0, 0));
        assert_eq!(round.ply(), 8);

        let mut evaluator = MoveEvaluator::with_seed(0);
        let outcome = round.play_ply(Some("E1"), &mut evaluator).unwrap();

        let human = PlayerTag { kind: PlayerKind::Human, color: Stone::White };
        assert_eq!(
            outcome.end,
            Some(RoundEnd::Winner { player: human, by: WinKind::FiveInARow { lines: 1 } })
        );
        assert!(round.is_over());
        assert_eq!(round.player(PlayerKind::Human).tournament_score(), 2 + WIN_POINTS);
        // Black's untouched four scores a point
        assert_eq!(round.player(PlayerKind::Computer).tournament_score(), 1);
        assert_eq!(outcome.awards.len(), 2);

        assert_eq!(round.play_ply(None, &mut evaluator).unwrap_err(), PenteError::RoundOver);
        assert_eq!(round.undo_ply().unwrap_err(), PenteError::RoundOver);
    }

    #[test]
    fn test_fifth_capture_ends_round() {
        let mut rows = empty_rows();
        rows[9][9] = Stone::White;
        rows[9][10] = Stone::Black;
        rows[9][11] = Stone::Black;
        let mut round = saved(&rows, (4, 0), (1, 3));
        assert_eq!(round.ply(), 3);

        let mut evaluator = MoveEvaluator::with_seed(0);
        let outcome = round.play_ply(Some("M10"), &mut evaluator).unwrap();

        let human = PlayerTag { kind: PlayerKind::Human, color: Stone::White };
        assert_eq!(outcome.end, Some(RoundEnd::Winner { player: human, by: WinKind::Captures { pairs: 5 } }));
        assert_eq!(round.player(PlayerKind::Human).tournament_score(), 5);
        assert_eq!(round.player(PlayerKind::Computer).tournament_score(), 4);
    }

    #[test]
    fn test_full_board_is_a_tie() {
        // Runs of at most 3 in every direction, no capture possible at A1
        let mut rows: Vec<Vec<Stone>> = (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| if (row + 2 * col) / 3 % 2 == 0 { Stone::White } else { Stone::Black })
                    .collect()
            })
            .collect();
        rows[0][0] = Stone::Empty;
        let mut round = saved(&rows, (0, 0), (0, 0));

        let mut evaluator = MoveEvaluator::with_seed(0);
        let outcome = round.play_ply(Some("A1"), &mut evaluator).unwrap();
        assert_eq!(outcome.end, Some(RoundEnd::Tie));
        assert!(outcome.awards.is_empty());
        assert_eq!(round.player(PlayerKind::Human).tournament_score(), 0);
    }

    #[test]
    fn test_undo_restores_turn_and_captures() {
        let mut rows = empty_rows();
        rows[9][9] = Stone::White;
        rows[9][10] = Stone::Black;
        rows[9][11] = Stone::Black;
        rows[3][3] = Stone::Black;
        let mut round = saved(&rows, (0, 0), (0, 0));
        assert_eq!(round.ply(), 4);

        let mut evaluator = MoveEvaluator::with_seed(0);
        round.play_ply(Some("M10"), &mut evaluator).unwrap();
        assert_eq!(round.player(PlayerKind::Human).captured_pairs(), 1);
        assert_eq!(round.current_player().kind, PlayerKind::Computer);

        let (player, pos) = round.undo_ply().unwrap();
        assert_eq!(player.kind, PlayerKind::Human);
        assert_eq!(pos, Pos::new(9, 12));
        assert_eq!(round.player(PlayerKind::Human).captured_pairs(), 0);
        assert_eq!(round.current_player().kind, PlayerKind::Human);
        assert_eq!(round.ply(), 4);
        assert_eq!(round.board().get(Pos::new(9, 10)), Stone::Black);

        // Loaded boards carry no history
        assert_eq!(round.undo_ply().unwrap_err(), PenteError::NoHistory);
    }

    #[test]
    fn test_reset_picks_first_player() {
        let mut round = human_first();
        round.reset(PlayerKind::Computer);
        assert_eq!(round.current_player().kind, PlayerKind::Computer);
        assert_eq!(round.current_player().color, Stone::White);
        assert_eq!(round.player(PlayerKind::Human).color, Stone::Black);
        assert_eq!(round.ply(), 0);
    }

    #[test]
    fn test_saved_board_is_checked() {
        let players = [Player::new(PlayerKind::Human), Player::new(PlayerKind::Computer)];
        let err = Round::from_saved(&empty_rows()[..3], players).unwrap_err();
        assert_eq!(err, PenteError::InvalidBoardShape);
    }
}
