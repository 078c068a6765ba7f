//! A tournament: a human against the computer over as many rounds as the
//! human wants, scores carried from round to round.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Pos;
use crate::engine::MoveEvaluator;
use crate::error::PenteError;
use crate::eval::EvaluatedMove;

use super::log::{GameLog, LogEntry};
use super::player::{Player, PlayerKind};
use super::round::{PlyOutcome, Round};
use super::save::SaveState;

/// A side of the coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coin {
    Heads,
    Tails,
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Coin::Heads => "HEADS",
            Coin::Tails => "TAILS",
        })
    }
}

impl FromStr for Coin {
    type Err = PenteError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_uppercase().as_str() {
            "H" | "HEADS" => Ok(Coin::Heads),
            "T" | "TAILS" => Ok(Coin::Tails),
            _ => Err(PenteError::Parse),
        }
    }
}

/// Tournament state owned by the front end
pub struct Tournament<R: Rng = StdRng> {
    round: Round,
    log: GameLog,
    evaluator: MoveEvaluator<R>,
    /// Used for the coin toss only
    coin: R,
    /// The next round cannot start until the human calls the coin
    awaiting_toss: bool,
    rounds_played: u32,
}

impl Tournament<StdRng> {
    pub fn new() -> Self {
        Self::with_rngs(StdRng::from_entropy(), StdRng::from_entropy())
    }

    /// Fully reproducible tournament
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rngs(StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed.wrapping_add(1)))
    }
}

impl Default for Tournament<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Tournament<R> {
    /// `evaluator_rng` breaks ties between moves, `coin` decides coin tosses
    pub fn with_rngs(evaluator_rng: R, coin: R) -> Self {
        Self {
            round: Round::new(Player::new(PlayerKind::Human), Player::new(PlayerKind::Computer)),
            log: GameLog::new(),
            evaluator: MoveEvaluator::with_rng(evaluator_rng),
            coin,
            awaiting_toss: true,
            rounds_played: 0,
        }
    }

    /// Flip the coin against the human's call. The winner plays White.
    ///
    /// Returns whether the human won the toss.
    pub fn coin_toss(&mut self, call: Coin) -> bool {
        let landed = if self.coin.gen_bool(0.5) { Coin::Heads } else { Coin::Tails };
        let won = landed == call;
        self.log.push(LogEntry::CoinToss { landed, won });

        let first = if won { PlayerKind::Human } else { PlayerKind::Computer };
        self.begin(first);
        won
    }

    /// Start the next round.
    ///
    /// The higher tournament score goes first; on a tie a coin toss is
    /// needed and `true` is returned.
    pub fn start_round(&mut self) -> bool {
        let human = self.round.player(PlayerKind::Human).tournament_score();
        let computer = self.round.player(PlayerKind::Computer).tournament_score();

        if human == computer {
            self.awaiting_toss = true;
            self.log.push(LogEntry::TiedScores);
            return true;
        }

        let first = if human > computer { PlayerKind::Human } else { PlayerKind::Computer };
        self.log.push(LogEntry::FirstByScore {
            player: self.round.player(first).tag(),
            score: human.max(computer),
        });
        self.begin(first);
        false
    }

    fn begin(&mut self, first: PlayerKind) {
        self.round.reset(first);
        self.awaiting_toss = false;
        if let Some(restriction) = self.round.restriction() {
            self.log.push(LogEntry::Restriction(restriction));
        }
    }

    /// Play the current player's turn.
    ///
    /// `input` is the human's position; the computer ignores it. A rejected
    /// move is logged and leaves the round unchanged.
    pub fn play_turn(&mut self, input: Option<&str>) -> Result<PlyOutcome, PenteError> {
        if self.awaiting_toss {
            return Err(PenteError::CoinTossPending);
        }

        self.log.push(LogEntry::Turn(self.round.current_player().tag()));
        let outcome = match self.round.play_ply(input, &mut self.evaluator) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.log.push(LogEntry::Rejected(err));
                return Err(err);
            }
        };

        self.record(&outcome);
        Ok(outcome)
    }

    fn record(&mut self, outcome: &PlyOutcome) {
        let player = outcome.player;
        let pos = outcome.placement.pos;

        if let Some(advice) = outcome.advice {
            self.log.push(LogEntry::ComputerMove { pos, rationale: advice.rationale(player.color) });
        }
        self.log.push(LogEntry::Placed { player, pos });
        if outcome.placement.captured_pairs > 0 {
            self.log.push(LogEntry::Captured { player, pairs: outcome.placement.captured_pairs });
        }

        if let Some(end) = outcome.end {
            self.rounds_played += 1;
            self.log.push(LogEntry::RoundEnd(end));
            self.log.extend(outcome.awards.iter().copied().map(LogEntry::Award));
        } else if let Some(restriction) = outcome.restriction {
            self.log.push(LogEntry::Restriction(restriction));
        }
        self.log.push(self.standings());
    }

    fn standings(&self) -> LogEntry {
        let players = self.round.players();
        LogEntry::Standings {
            captured: players.iter().map(|p| (p.tag(), p.captured_pairs())).collect(),
            scores: players.iter().map(|p| (p.tag(), p.tournament_score())).collect(),
        }
    }

    /// Suggest a move for the player to move
    pub fn hint(&mut self) -> Option<EvaluatedMove> {
        if self.awaiting_toss || self.round.is_over() {
            return None;
        }
        let player = self.round.current_player().color;
        let opponent = self.round.next_player().color;

        let help = self.evaluator.get_help(self.round.board(), player, opponent)?;
        self.log.push(LogEntry::Hint { pos: help.pos, rationale: help.rationale(player) });
        Some(help)
    }

    /// Take back stones until it is the human's turn again.
    ///
    /// Returns the emptied positions, most recent first.
    pub fn undo_turn(&mut self) -> Result<Vec<Pos>, PenteError> {
        let mut undone = Vec::new();
        loop {
            let (player, pos) = self.round.undo_ply()?;
            self.log.push(LogEntry::Undone { player, pos });
            undone.push(pos);

            let human_to_move = !self.round.current_player().is_computer();
            if human_to_move || !self.round.can_undo() {
                return Ok(undone);
            }
        }
    }

    /// Pick up a saved game
    pub fn load(&mut self, state: &SaveState) -> Result<(), PenteError> {
        self.round = Round::from_saved(&state.rows, state.players())?;
        self.awaiting_toss = false;
        if let Some(restriction) = self.round.restriction() {
            self.log.push(LogEntry::Restriction(restriction));
        }
        Ok(())
    }

    /// Current state in save form
    pub fn snapshot(&self) -> SaveState {
        SaveState::from_round(&self.round)
    }

    /// The overall winner so far, `None` on equal scores
    pub fn winner(&self) -> Option<PlayerKind> {
        let human = self.round.player(PlayerKind::Human).tournament_score();
        let computer = self.round.player(PlayerKind::Computer).tournament_score();
        match human.cmp(&computer) {
            std::cmp::Ordering::Greater => Some(PlayerKind::Human),
            std::cmp::Ordering::Less => Some(PlayerKind::Computer),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Log the final result
    pub fn finish(&mut self) -> Option<PlayerKind> {
        let winner = self.winner();
        let players = self.round.players();
        self.log.push(LogEntry::TournamentOver {
            winner: winner.map(|kind| self.round.player(kind).tag()),
            scores: players.iter().map(|p| (p.tag(), p.tournament_score())).collect(),
        });
        winner
    }

    #[inline]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[inline]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Record something the front end did (saving, a failed load)
    pub fn note(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    #[inline]
    pub fn awaiting_toss(&self) -> bool {
        self.awaiting_toss
    }

    #[inline]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn human(&self) -> &Player {
        self.round.player(PlayerKind::Human)
    }

    pub fn computer(&self) -> &Player {
        self.round.player(PlayerKind::Computer)
    }

    /// Whether the computer should move now
    pub fn computer_to_move(&self) -> bool {
        !self.awaiting_toss && !self.round.is_over() && self.round.current_player().is_computer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::game::round::RoundEnd;

    fn play_until_human(tournament: &mut Tournament) {
        while tournament.computer_to_move() {
            tournament.play_turn(None).unwrap();
        }
    }

    #[test]
    fn test_coin_call_parsing() {
        assert_eq!("heads".parse::<Coin>(), Ok(Coin::Heads));
        assert_eq!(" T ".parse::<Coin>(), Ok(Coin::Tails));
        assert_eq!("edge".parse::<Coin>(), Err(PenteError::Parse));
        assert_eq!(Coin::Heads.to_string(), "HEADS");
    }

    #[test]
    fn test_play_requires_coin_toss() {
        let mut tournament = Tournament::with_seed(1);
        assert!(tournament.awaiting_toss());
        assert_eq!(tournament.play_turn(Some("J10")).unwrap_err(), PenteError::CoinTossPending);
        assert!(tournament.hint().is_none());
    }

    #[test]
    fn test_coin_toss_winner_plays_white() {
        let mut tournament = Tournament::with_seed(2);
        let won = tournament.coin_toss(Coin::Heads);

        let (white, black) = if won {
            (PlayerKind::Human, PlayerKind::Computer)
        } else {
            (PlayerKind::Computer, PlayerKind::Human)
        };
        assert_eq!(tournament.round().current_player().kind, white);
        assert_eq!(tournament.round().player(white).color, Stone::White);
        assert_eq!(tournament.round().player(black).color, Stone::Black);
        assert!(!tournament.awaiting_toss());
        assert!(matches!(tournament.log().entries()[0], LogEntry::CoinToss { won: w, .. } if w == won));
    }

    #[test]
    fn test_same_seed_same_toss() {
        let first = Tournament::with_seed(77).coin_toss(Coin::Tails);
        let second = Tournament::with_seed(77).coin_toss(Coin::Tails);
        assert_eq!(first, second);
    }

    #[test]
    fn test_opening_turns() {
        let mut tournament = Tournament::with_seed(3);
        tournament.coin_toss(Coin::Heads);
        play_until_human(&mut tournament);

        let board = tournament.round().board();
        if tournament.round().ply() == 0 {
            assert_eq!(board.bounds(), (0, 0));
            tournament.play_turn(Some("J10")).unwrap();
            play_until_human(&mut tournament);
        } else {
            // Computer took the center
            assert_eq!(board.get(Pos::CENTER), Stone::White);
        }

        assert!(!tournament.round().current_player().is_computer());
        assert!(tournament.round().board().stone_count() >= 1);
    }

    #[test]
    fn test_rejected_move_is_logged() {
        let mut tournament = Tournament::with_seed(4);
        tournament.coin_toss(Coin::Heads);
        play_until_human(&mut tournament);

        let before = tournament.round().board().stone_count();
        let err = tournament.play_turn(Some("Z99")).unwrap_err();
        assert_eq!(tournament.log().last(), Some(&LogEntry::Rejected(err)));
        assert_eq!(tournament.round().board().stone_count(), before);
    }

    #[test]
    fn test_hint_and_undo() {
        let mut tournament = Tournament::with_seed(5);
        tournament.coin_toss(Coin::Tails);
        play_until_human(&mut tournament);
        if tournament.round().ply() == 0 {
            tournament.play_turn(Some("J10")).unwrap();
            play_until_human(&mut tournament);
        }

        let hint = tournament.hint().unwrap();
        assert!(matches!(tournament.log().last(), Some(LogEntry::Hint { .. })));

        let stones = tournament.round().board().stone_count();
        let input = hint.pos.to_string();
        tournament.play_turn(Some(input.as_str())).unwrap();
        play_until_human(&mut tournament);

        let undone = tournament.undo_turn().unwrap();
        assert_eq!(undone.len(), 2);
        assert_eq!(undone[1], hint.pos);
        assert_eq!(tournament.round().board().stone_count(), stones);
        assert!(!tournament.round().current_player().is_computer());
    }

    #[test]
    fn test_next_round_order_by_score() {
        let mut tournament = Tournament::with_seed(6);
        let state = SaveState {
            rows: vec![vec![Stone::Empty; crate::board::BOARD_SIZE]; crate::board::BOARD_SIZE],
            human: crate::game::save::SavedPlayer { captured_pairs: 0, score: 4 },
            computer: crate::game::save::SavedPlayer { captured_pairs: 0, score: 9 },
            next: PlayerKind::Human,
            next_color: Stone::White,
        };
        tournament.load(&state).unwrap();

        assert!(!tournament.start_round());
        assert_eq!(tournament.round().current_player().kind, PlayerKind::Computer);
        assert_eq!(tournament.computer().color, Stone::White);
        assert_eq!(tournament.winner(), Some(PlayerKind::Computer));
        assert_eq!(tournament.finish(), Some(PlayerKind::Computer));
    }

    #[test]
    fn test_tied_scores_need_toss() {
        let mut tournament = Tournament::with_seed(7);
        tournament.coin_toss(Coin::Heads);
        assert!(tournament.start_round());
        assert!(tournament.awaiting_toss());
        assert_eq!(tournament.winner(), None);
        assert_eq!(tournament.log().last(), Some(&LogEntry::TiedScores));
    }

    #[test]
    fn test_full_round_against_itself_terminates() {
        let mut tournament = Tournament::with_seed(8);
        tournament.coin_toss(Coin::Heads);

        // Human echoes the evaluator's advice until the round ends
        let mut plies = 0;
        while !tournament.round().is_over() && plies < 500 {
            if tournament.computer_to_move() {
                tournament.play_turn(None).unwrap();
            } else {
                let input = tournament.hint().unwrap().pos.to_string();
                tournament.play_turn(Some(input.as_str())).unwrap();
            }
            plies += 1;
        }

        let end = tournament.round().end().unwrap();
        assert!(matches!(end, RoundEnd::Winner { .. } | RoundEnd::Tie));
        assert_eq!(tournament.rounds_played(), 1);
        assert!(matches!(tournament.log().last(), Some(LogEntry::Standings { .. })));
    }
}
