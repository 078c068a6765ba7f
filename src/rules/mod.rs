//! Game rules for Pente
//!
//! - Lines: runs of stones through a cell, five in a row wins
//! - Captures: flanking a pair removes it

pub mod capture;
pub mod lines;

// Re-exports for convenient access
pub use capture::{find_captures, potential_captures, resolve_captures, CAPTURE_NUM};
pub use lines::{
    cardinal_count, color_sequences, count_same, has_winning_line, num_n_in_a_row,
    uninterrupted_stones, Sequences, WIN_LENGTH,
};
