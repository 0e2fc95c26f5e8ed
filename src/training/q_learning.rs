//! Tabular Q-learning agent.
//!
//! The agent keeps its own [`ValueTable`]. Each decision bootstraps the value
//! of the previous (state, action) pair from the current state's reward and
//! its best stored action value.

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::game::board::Color;
use crate::game::game_state::{validate_die, GameState};
use crate::game::get_legal_moves::get_legal_actions;
use crate::scoring::scoring::{evaluate_state, EvaluationWeights};
use crate::strategy::agent::Agent;
use crate::training::value_table::{StateKey, ValueTable};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Exploration probability.
    /// Default: 0.2
    pub epsilon: f64,

    /// Step size. 1.0 replaces the old estimate outright.
    /// Default: 1.0
    pub alpha: f64,

    /// Discount factor.
    /// Default: 0.9
    pub gamma: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.2,
            alpha: 1.0,
            gamma: 0.9,
        }
    }
}

pub struct QLearningAgent {
    color: Color,
    config: QLearningConfig,
    weights: EvaluationWeights,
    table: ValueTable,
    previous: Option<(StateKey, Option<usize>)>,
    rng: StdRng,
}

impl QLearningAgent {
    pub fn new(color: Color, config: QLearningConfig, weights: EvaluationWeights, seed: u64) -> Self {
        Self::with_table(color, config, weights, ValueTable::new(), seed)
    }

    /// Agent that keeps learning into an existing table.
    pub fn with_table(
        color: Color,
        config: QLearningConfig,
        weights: EvaluationWeights,
        table: ValueTable,
        seed: u64,
    ) -> Self {
        Self {
            color,
            config,
            weights,
            table,
            previous: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    fn choose(&mut self, key: &StateKey, actions: &[Option<usize>]) -> Option<usize> {
        let epsilon = self.config.epsilon.clamp(0.0, 1.0);
        let explore = !self.table.contains(key) || self.rng.random_bool(epsilon);
        if explore {
            // Exploring starts the state over from a zero row.
            self.table.reset_row(key, actions);
            actions.choose(&mut self.rng).copied().flatten()
        } else {
            self.table.ensure_actions(key, actions);
            self.table
                .best_action(key, actions)
                .and_then(|(action, _)| action)
        }
    }

    fn update_previous(&mut self, state: &GameState, key: &StateKey, actions: &[Option<usize>]) {
        let Some((prev_key, prev_action)) = self.previous.take() else {
            return;
        };
        let reward = evaluate_state(state, self.color, &self.weights);
        let best_current = self
            .table
            .best_action(key, actions)
            .map_or(0.0, |(_, value)| value);
        let old = self.table.get(&prev_key, prev_action).unwrap_or(0.0);
        let updated = old + self.config.alpha * (reward + self.config.gamma * best_current - old);
        log::trace!(
            "Q update {} {:?}: {:.2} -> {:.2}",
            self.color,
            prev_action,
            old,
            updated
        );
        self.table.set(prev_key, prev_action, updated);
    }
}

impl Agent for QLearningAgent {
    fn name(&self) -> &str {
        "rl"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn get_action(&mut self, state: &GameState, die: u8) -> Result<Option<usize>> {
        let die = validate_die(die)?;
        let key = StateKey::new(state, die);
        let actions = get_legal_actions(state, die);

        let action = self.choose(&key, &actions);
        self.update_previous(state, &key, &actions);
        self.previous = Some((key, action));
        Ok(action)
    }

    fn end_episode(&mut self) {
        self.previous = None;
    }
}
