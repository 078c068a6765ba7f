//! Append-only record of what happened during the tournament

use std::fmt;
use std::path::PathBuf;

use crate::board::{Pos, CENTER_RING};
use crate::error::PenteError;
use crate::rules::WIN_LENGTH;

use super::player::PlayerTag;
use super::round::{Award, Restriction, RoundEnd, WinKind};
use super::tournament::Coin;

/// One event, rendered as a line (or a few) of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Turn(PlayerTag),
    Placed { player: PlayerTag, pos: Pos },
    Captured { player: PlayerTag, pairs: usize },
    /// The computer explains its move
    ComputerMove { pos: Pos, rationale: String },
    /// The computer advises the human
    Hint { pos: Pos, rationale: String },
    Restriction(Restriction),
    Undone { player: PlayerTag, pos: Pos },
    RoundEnd(RoundEnd),
    Award(Award),
    Standings { captured: Vec<(PlayerTag, usize)>, scores: Vec<(PlayerTag, u32)> },
    CoinToss { landed: Coin, won: bool },
    TiedScores,
    FirstByScore { player: PlayerTag, score: u32 },
    Saved(PathBuf),
    Loaded(PathBuf),
    Rejected(PenteError),
    TournamentOver { winner: Option<PlayerTag>, scores: Vec<(PlayerTag, u32)> },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Turn(player) => write!(f, "{player}'s turn:"),
            LogEntry::Placed { player, pos } => write!(f, "{player}, placed a stone at {pos}!"),
            LogEntry::Captured { player, pairs } => write!(f, "{player}, captured {pairs} pair(s)!"),
            LogEntry::ComputerMove { pos, rationale } => write!(f, "I'm placing a stone at {pos}{rationale}"),
            LogEntry::Hint { pos, rationale } => {
                write!(f, "The computer recommends you play at {pos}{rationale}")
            }
            LogEntry::Restriction(Restriction::Center) => write!(
                f,
                "First white move must be placed on the center of the board at {}!",
                Pos::CENTER
            ),
            LogEntry::Restriction(Restriction::AwayFromCenter) => write!(
                f,
                "Second white move must be placed at least {} stones away from the center of the board at {}!",
                CENTER_RING[0].distance_from_center(),
                Pos::CENTER
            ),
            LogEntry::Undone { player, pos } => write!(f, "Took back {player}'s stone at {pos}."),
            LogEntry::RoundEnd(RoundEnd::Winner { player, by: WinKind::FiveInARow { .. } }) => {
                write!(f, "{player} has won the round by placing {WIN_LENGTH} stones in a row!")
            }
            LogEntry::RoundEnd(RoundEnd::Winner { player, by: WinKind::Captures { pairs } }) => {
                write!(f, "{player} has won the round by capturing {pairs} pairs!")
            }
            LogEntry::RoundEnd(RoundEnd::Tie) => write!(f, "The board is full! The round ends in a tie!"),
            LogEntry::Award(award) => write!(f, "\t- {award}"),
            LogEntry::Standings { captured, scores } => {
                writeln!(f, "Captured Pairs:")?;
                for (player, pairs) in captured {
                    writeln!(f, "\t{player}: {pairs}")?;
                }
                write!(f, "Tournament scores:")?;
                for (player, score) in scores {
                    write!(f, "\n\t{player}: {score}")?;
                }
                Ok(())
            }
            LogEntry::CoinToss { landed, won } => {
                write!(f, "The coin landed on {landed}! ")?;
                if *won {
                    write!(f, "You won the coin toss! You are white and will go first.")
                } else {
                    write!(f, "You lost the coin toss! You are black and computer will go first.")
                }
            }
            LogEntry::TiedScores => {
                write!(f, "The tournament scores are tied, a coin toss decides who goes first.")
            }
            LogEntry::FirstByScore { player, score } => write!(
                f,
                "{} goes first as they have the highest tournament score with {score} points",
                player.kind
            ),
            LogEntry::Saved(path) => write!(f, "Game saved to {}", path.display()),
            LogEntry::Loaded(path) => write!(f, "Game loaded from {}", path.display()),
            LogEntry::Rejected(err) => write!(f, "{err}"),
            LogEntry::TournamentOver { winner, scores } => {
                match winner {
                    Some(player) => write!(f, "{} wins the tournament!", player.kind)?,
                    None => write!(f, "The tournament ends in a tie!")?,
                }
                for (player, score) in scores {
                    write!(f, "\n\t{}: {score}", player.kind)?;
                }
                Ok(())
            }
        }
    }
}

/// Events in the order they happened
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for GameLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
