//! Error type shared by the board engine and the game flow

use thiserror::Error;

use crate::board::BOARD_SIZE;

/// Every way a board or round operation can be refused.
///
/// A failed operation never leaves the board half-modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PenteError {
    #[error("Could not parse input: format should be <letter><number> (e.g. 'A1', 'J10')")]
    Parse,
    #[error("Invalid move: move must be within the bounds of the board")]
    OutOfBounds,
    #[error("Invalid move: a board restriction does not allow a stone there")]
    RestrictedZone,
    #[error("Space occupied: cannot place a stone on an occupied space")]
    Occupied,
    #[error("Already won: cannot place a stone once there is a winner")]
    GameAlreadyWon,
    #[error("Full board: cannot place a stone on a full board")]
    BoardFull,
    #[error("No previous moves: cannot undo when no moves have been made")]
    NoHistory,
    #[error("Invalid bounds: bounds must be between 0 and {}", BOARD_SIZE)]
    InvalidBounds,
    #[error("Invalid board: board must be {} rows of {} intersections", BOARD_SIZE, BOARD_SIZE)]
    InvalidBoardShape,
    #[error("Invalid stone: only white or black stones can be placed")]
    InvalidStone,
    #[error("Missing input: a position is required for a human move")]
    MissingInput,
    #[error("Round ended: start another round to keep playing")]
    RoundOver,
    #[error("Coin toss pending: call heads or tails to decide who goes first")]
    CoinTossPending,
}
