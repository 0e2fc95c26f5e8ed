//! Action-value store for tabular Q-learning.

use std::collections::HashMap;

use crate::game::board::Color;
use crate::game::game_state::GameState;
use crate::game::plane::Position;

/// Structural fingerprint of a decision point: whose turn, the rolled die and
/// every plane's position and step count in seating order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    turn: usize,
    die: u8,
    planes: Vec<(Color, Position, u8)>,
}

impl StateKey {
    pub fn new(state: &GameState, die: u8) -> Self {
        StateKey {
            turn: state.turn(),
            die,
            planes: state
                .players()
                .iter()
                .flat_map(|player| {
                    player
                        .planes
                        .iter()
                        .map(|plane| (plane.color, plane.position(), plane.total_steps()))
                })
                .collect(),
        }
    }
}

pub type ActionValues = HashMap<Option<usize>, f64>;

#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    rows: HashMap<StateKey, ActionValues>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn row(&self, key: &StateKey) -> Option<&ActionValues> {
        self.rows.get(key)
    }

    pub fn get(&self, key: &StateKey, action: Option<usize>) -> Option<f64> {
        self.rows.get(key).and_then(|row| row.get(&action)).copied()
    }

    pub fn set(&mut self, key: StateKey, action: Option<usize>, value: f64) {
        self.rows.entry(key).or_default().insert(action, value);
    }

    /// Makes sure `key` has an entry for each of `actions`, starting at 0.0.
    pub fn ensure_actions(&mut self, key: &StateKey, actions: &[Option<usize>]) {
        let row = self.rows.entry(key.clone()).or_default();
        for &action in actions {
            row.entry(action).or_insert(0.0);
        }
    }

    /// Overwrites the row of `key` with 0.0 for exactly `actions`.
    pub fn reset_row(&mut self, key: &StateKey, actions: &[Option<usize>]) {
        self.rows
            .insert(key.clone(), actions.iter().map(|&action| (action, 0.0)).collect());
    }

    /// Highest-valued action among `actions`; ties keep the earliest one.
    /// Actions without an entry count as 0.0.
    pub fn best_action(&self, key: &StateKey, actions: &[Option<usize>]) -> Option<(Option<usize>, f64)> {
        let mut best: Option<(Option<usize>, f64)> = None;
        for &action in actions {
            let value = self.get(key, action).unwrap_or(0.0);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((action, value));
            }
        }
        best
    }
}
