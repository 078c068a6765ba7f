//! egui front end

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::PenteApp;
pub use game_state::GameState;
