use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::board::Color;
use crate::game::game_state::GameState;
use crate::mcts::algorithm::MctsAgent;
use crate::mcts::expectimax_algorithm::ExpectimaxAgent;
use crate::mcts::hyperparameters::AgentConfig;
use crate::strategy::random_agent::RandomAgent;
use crate::training::q_learning::QLearningAgent;
use crate::Result;

/// A decision maker bound to one color.
pub trait Agent {
    fn name(&self) -> &str;

    fn color(&self) -> Color;

    /// Plane index of the player to move for the rolled `die`. Must be one of
    /// `state.movable_planes(die)`, or `None` exactly when that set is empty.
    fn get_action(&mut self, state: &GameState, die: u8) -> Result<Option<usize>>;

    /// Called when a game ends.
    fn end_episode(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    Expectimax,
    Mcts,
    Rl,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Random => "random",
            AgentKind::Expectimax => "expectimax",
            AgentKind::Mcts => "mcts",
            AgentKind::Rl => "rl",
        };
        write!(f, "{}", name)
    }
}

/// Builds an agent of `kind` for `color`. `seed` drives every random choice
/// the agent makes.
pub fn create_agent(kind: AgentKind, color: Color, config: &AgentConfig, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::new(color, seed)),
        AgentKind::Expectimax => Box::new(ExpectimaxAgent::new(
            color,
            config.expectimax.clone(),
            config.evaluation.clone(),
        )),
        AgentKind::Mcts => Box::new(MctsAgent::new(
            color,
            config.mcts.clone(),
            config.evaluation.clone(),
            seed,
        )),
        AgentKind::Rl => Box::new(QLearningAgent::new(
            color,
            config.q_learning.clone(),
            config.evaluation.clone(),
            seed,
        )),
    }
}
