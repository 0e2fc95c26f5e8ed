//! # Aeroplane Chess Library
//!
//! Rule engine and decision agents for the two-player Aeroplane Chess variant.
//!
//! ## Features
//!
//! - **Game Engine**: token state machine, captures, jumps and the pure transition function
//! - **Search Agents**: depth-bounded expectimax and Monte Carlo Tree Search
//! - **Learning Agent**: tabular Q-learning over structural state keys
//! - **Arena**: match orchestration, board rendering and CSV result recording
//!
//! ## Usage
//!
//! ```rust
//! use aeroplane_chess::game::game_state::GameState;
//!
//! let state = GameState::new();
//! let next = state.generate_successor(None, 3).unwrap();
//! assert_eq!(next.turn(), 1);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Expectimax and Monte Carlo Tree Search agents
pub mod mcts;

/// Position evaluation
pub mod scoring;

/// Agent trait, factory and baseline agents
pub mod strategy;

/// Tabular reinforcement learning
pub mod training;

/// Match orchestration
pub mod arena;

/// Match result recording
pub mod recording;

/// Logger initialization helpers
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::board::Color;
pub use game::game_state::{GameState, MoveEvent, Transition};
pub use game::plane::{Phase, Plane, Position};
pub use game::player::Player;
pub use mcts::algorithm::MctsAgent;
pub use mcts::expectimax_algorithm::ExpectimaxAgent;
pub use mcts::hyperparameters::{AgentConfig, ExpectimaxConfig, FinalSelection, MctsHyperparameters};
pub use scoring::scoring::{evaluate_state, EvaluationWeights};
pub use strategy::agent::{create_agent, Agent, AgentKind};
pub use strategy::random_agent::RandomAgent;
pub use training::q_learning::{QLearningAgent, QLearningConfig};
pub use training::value_table::{StateKey, ValueTable};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Aeroplane Chess library
#[derive(Debug, thiserror::Error)]
pub enum AeroplaneChessError {
    #[error("Illegal move: {color} plane {plane} cannot move {steps} from {phase:?}")]
    IllegalMove {
        color: Color,
        plane: usize,
        phase: Phase,
        steps: u8,
    },

    #[error("Illegal action: {color} plane {plane} is not movable with die {die}")]
    IllegalAction { color: Color, plane: usize, die: u8 },

    #[error("Illegal pass: {color} has movable planes for die {die}")]
    IllegalPass { color: Color, die: u8 },

    #[error("Invalid die value: {0}")]
    InvalidDie(u8),

    #[error("Search degenerate: {0}")]
    SearchDegenerate(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AeroplaneChessError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
