pub mod board;
pub mod display;
pub mod game_state;
pub mod get_legal_moves;
pub mod plane;
pub mod player;
pub mod simulate_game;
