//! Game flow on top of the board engine: players, rounds, the tournament,
//! its log and save files.

pub mod log;
pub mod player;
pub mod round;
pub mod save;
pub mod tournament;

pub use log::{GameLog, LogEntry};
pub use player::{MoveChoice, Player, PlayerKind, PlayerTag};
pub use round::{Award, AwardReason, PlyOutcome, Restriction, Round, RoundEnd, WinKind};
pub use save::{SaveError, SaveState, SavedPlayer};
pub use tournament::{Coin, Tournament};
