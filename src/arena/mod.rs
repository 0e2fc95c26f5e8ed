//! Match orchestration: seats bind agents to colors and the match loop rolls
//! the die, asks the seated agent, checks its answer and applies it.

pub mod game_match;
pub mod seat;

pub use game_match::{play_match, MatchConfig, MatchOutcome};
pub use seat::{DecisionLatency, Seat};
