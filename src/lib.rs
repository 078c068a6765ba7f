//! Pente: a 19x19 board game played against the computer
//!
//! Rules:
//! - White opens on the center intersection (J10)
//! - White's second stone must be at least 3 intersections from the center
//! - Five or more stones in a row win the round
//! - Flanking exactly two opposing stones (X-O-O-X) captures them;
//!   five captured pairs win the round
//! - A tournament is a series of rounds with points carried over
//!
//! # Modules
//!
//! - [`board`]: positions, stones and the move engine with undo
//! - [`rules`]: line counting and captures
//! - [`eval`]: scoring a single placement
//! - [`engine`]: the computer's move choice
//! - [`game`]: players, rounds, tournaments, the log and save files
//! - [`ui`]: the egui front end
//!
//! # Quick Start
//!
//! ```
//! use pente::{Board, MoveEvaluator, Stone};
//!
//! let mut board = Board::new();
//! board.set_bounds(0, 0).unwrap();
//!
//! // The opening stone can only go on the center
//! let mut evaluator = MoveEvaluator::with_seed(1);
//! let best = evaluator.best_move(&board, Stone::White, Stone::Black).unwrap();
//! board.place_at(Stone::White, best.pos).unwrap();
//! assert_eq!(best.pos.to_string(), "J10");
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod ui;

pub use board::{Board, Placement, Pos, Stone, BOARD_SIZE};
pub use engine::MoveEvaluator;
pub use error::PenteError;
pub use eval::{EvaluatedMove, MoveReason};
pub use game::{Coin, GameLog, LogEntry, Player, PlayerKind, Round, RoundEnd, Tournament};
