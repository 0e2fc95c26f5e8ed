//! Agent configuration.
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON file only
//! needs the fields it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::scoring::scoring::EvaluationWeights;
use crate::training::q_learning::QLearningConfig;
use crate::{AeroplaneChessError, Result};

/// How the MCTS root picks its move once the iteration budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalSelection {
    /// Highest accumulated utility.
    TotalUtility,
    /// Highest utility per visit.
    MeanUtility,
}

/// MCTS hyperparameters configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsHyperparameters {
    /// Select-expand-simulate-backpropagate iterations per decision.
    /// Default: 200
    pub iterations: usize,

    /// UCB1 exploration constant.
    /// Default: sqrt(2)
    pub exploration: f64,

    /// Random moves played per rollout before scoring.
    /// Default: 10
    pub rollout_depth: usize,

    /// Root move selection rule.
    /// Default: TotalUtility
    pub final_selection: FinalSelection,
}

impl Default for MctsHyperparameters {
    fn default() -> Self {
        Self {
            iterations: 200,
            exploration: std::f64::consts::SQRT_2,
            rollout_depth: 10,
            final_selection: FinalSelection::TotalUtility,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectimaxConfig {
    /// Decision plies searched below the root.
    /// Default: 2
    pub max_depth: usize,

    /// Evaluate root actions on the rayon pool.
    /// Default: true
    pub parallel_root: bool,
}

impl Default for ExpectimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            parallel_root: true,
        }
    }
}

/// Everything an agent factory needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub evaluation: EvaluationWeights,
    pub expectimax: ExpectimaxConfig,
    pub mcts: MctsHyperparameters,
    pub q_learning: QLearningConfig,
}

impl AgentConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: AgentConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mcts.iterations == 0 {
            return Err(AeroplaneChessError::Config(
                "mcts.iterations must be at least 1".to_string(),
            ));
        }
        if !(self.mcts.exploration.is_finite() && self.mcts.exploration >= 0.0) {
            return Err(AeroplaneChessError::Config(format!(
                "mcts.exploration must be a non-negative number (got {})",
                self.mcts.exploration
            )));
        }
        let q = &self.q_learning;
        for (name, value) in [("epsilon", q.epsilon), ("alpha", q.alpha), ("gamma", q.gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AeroplaneChessError::Config(format!(
                    "q_learning.{} must be within [0, 1] (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
