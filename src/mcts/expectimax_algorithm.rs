//! Depth-bounded expectimax agent.
//!
//! Decision nodes (`Max` for the searching color, `Min` for its opponent)
//! alternate with chance nodes that average over the six die faces. Whether a
//! chance node continues with the same role or flips it is decided by the die
//! that was just played: a 6 keeps the turn, anything else passes it.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::game::board::Color;
use crate::game::game_state::{validate_die, GameState, BONUS_ROLL, MAX_DIE, MIN_DIE};
use crate::game::get_legal_moves::{get_legal_actions, get_legal_moves};
use crate::mcts::hyperparameters::ExpectimaxConfig;
use crate::mcts::mcts_result::{ActionStats, SearchResult};
use crate::scoring::scoring::{evaluate_state, EvaluationWeights};
use crate::strategy::agent::Agent;
use crate::{AeroplaneChessError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Max,
    Min,
}

impl Role {
    pub fn flip(self) -> Role {
        match self {
            Role::Max => Role::Min,
            Role::Min => Role::Max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchNode {
    Max,
    Min,
    /// Averages over the next die. `continues` is set when the move that led
    /// here was played with a 6, so `mover` acts again.
    Chance { mover: Role, continues: bool },
}

impl SearchNode {
    pub fn decision(role: Role) -> SearchNode {
        match role {
            Role::Max => SearchNode::Max,
            Role::Min => SearchNode::Min,
        }
    }

    /// Chance node following a move by `mover` played with `die`.
    pub fn chance_after(mover: Role, die: u8) -> SearchNode {
        SearchNode::Chance {
            mover,
            continues: die == BONUS_ROLL,
        }
    }

    /// Role of the decision nodes below this node.
    pub fn next_role(self) -> Role {
        match self {
            SearchNode::Max => Role::Max,
            SearchNode::Min => Role::Min,
            SearchNode::Chance { mover, continues: true } => mover,
            SearchNode::Chance { mover, continues: false } => mover.flip(),
        }
    }
}

struct ExpectimaxSearch<'a> {
    color: Color,
    config: &'a ExpectimaxConfig,
    weights: &'a EvaluationWeights,
    nodes: AtomicUsize,
}

impl ExpectimaxSearch<'_> {
    fn is_leaf(&self, state: &GameState, depth: usize) -> bool {
        depth > self.config.max_depth || state.is_win(self.color) || state.is_lose(self.color)
    }

    fn value(&self, state: &GameState, node: SearchNode, die: u8, depth: usize) -> Result<f64> {
        self.nodes.fetch_add(1, Ordering::Relaxed);
        match node {
            SearchNode::Chance { .. } => self.chance_value(state, node, depth),
            SearchNode::Max | SearchNode::Min => self.decision_value(state, node, die, depth),
        }
    }

    fn decision_value(&self, state: &GameState, node: SearchNode, die: u8, depth: usize) -> Result<f64> {
        if self.is_leaf(state, depth) {
            return Ok(evaluate_state(state, self.color, self.weights));
        }
        let role = node.next_role();
        let mut best = match role {
            Role::Max => f64::NEG_INFINITY,
            Role::Min => f64::INFINITY,
        };
        // No movable plane still yields the forced pass successor.
        for action in get_legal_actions(state, die) {
            let succ = state.generate_successor(action, die)?;
            let value = self.value(&succ, SearchNode::chance_after(role, die), die, depth + 1)?;
            best = match role {
                Role::Max => best.max(value),
                Role::Min => best.min(value),
            };
        }
        Ok(best)
    }

    fn chance_value(&self, state: &GameState, node: SearchNode, depth: usize) -> Result<f64> {
        if self.is_leaf(state, depth) {
            return Ok(evaluate_state(state, self.color, self.weights));
        }
        let next = SearchNode::decision(node.next_role());
        let mut total = 0.0;
        for die in MIN_DIE..=MAX_DIE {
            total += self.value(state, next, die, depth)?;
        }
        Ok(total / (MAX_DIE - MIN_DIE + 1) as f64)
    }

    fn root_branch(&self, state: &GameState, action: Option<usize>, die: u8) -> Result<ActionStats> {
        let succ = state.generate_successor(action, die)?;
        let value = self.value(&succ, SearchNode::chance_after(Role::Max, die), die, 1)?;
        Ok(ActionStats {
            action,
            visits: 1,
            value,
        })
    }
}

pub struct ExpectimaxAgent {
    color: Color,
    config: ExpectimaxConfig,
    weights: EvaluationWeights,
}

impl ExpectimaxAgent {
    pub fn new(color: Color, config: ExpectimaxConfig, weights: EvaluationWeights) -> Self {
        Self {
            color,
            config,
            weights,
        }
    }

    /// Expected value of every legal root action and the maximizing one.
    pub fn search(&self, state: &GameState, die: u8) -> Result<SearchResult> {
        let die = validate_die(die)?;
        if get_legal_moves(state, die).is_empty() {
            return Ok(SearchResult::forced(None));
        }

        let search = ExpectimaxSearch {
            color: self.color,
            config: &self.config,
            weights: &self.weights,
            nodes: AtomicUsize::new(0),
        };
        let actions = get_legal_actions(state, die);
        let branches: Vec<ActionStats> = if self.config.parallel_root {
            actions
                .par_iter()
                .map(|&action| search.root_branch(state, action, die))
                .collect::<Result<Vec<_>>>()?
        } else {
            actions
                .iter()
                .map(|&action| search.root_branch(state, action, die))
                .collect::<Result<Vec<_>>>()?
        };

        let mut best: Option<&ActionStats> = None;
        for branch in &branches {
            if best.is_none_or(|b| branch.value > b.value) {
                best = Some(branch);
            }
        }
        let best = best.ok_or_else(|| {
            AeroplaneChessError::SearchDegenerate("no root branch evaluated".to_string())
        })?;
        if best.value == f64::NEG_INFINITY || best.value.is_nan() {
            return Err(AeroplaneChessError::SearchDegenerate(format!(
                "best root value is {}",
                best.value
            )));
        }

        let best_action = best.action;
        let nodes = search.nodes.load(Ordering::Relaxed);
        log::debug!(
            "Expectimax {} die {}: {} nodes, best {:?} ({:.2})",
            self.color,
            die,
            nodes,
            best_action,
            best.value
        );
        Ok(SearchResult {
            best_action,
            actions: branches,
            nodes,
        })
    }
}

impl Agent for ExpectimaxAgent {
    fn name(&self) -> &str {
        "expectimax"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn get_action(&mut self, state: &GameState, die: u8) -> Result<Option<usize>> {
        Ok(self.search(state, die)?.best_action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::plane::{Plane, Position};
    use crate::game::player::Player;

    fn agent(max_depth: usize, parallel_root: bool) -> ExpectimaxAgent {
        ExpectimaxAgent::new(
            Color::Blue,
            ExpectimaxConfig {
                max_depth,
                parallel_root,
            },
            EvaluationWeights::default(),
        )
    }

    fn capture_position() -> GameState {
        let mut blue = Player::new(Color::Blue);
        blue.planes[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(7), 8);
        blue.planes[1] = Plane::placed(Color::Blue, 1, Position::Launch, 0);
        let mut green = Player::new(Color::Green);
        green.planes[0] = Plane::placed(Color::Green, 0, Position::OnTrack(10), 36);
        GameState::from_players(vec![blue, green], 0).unwrap()
    }

    #[test]
    fn test_role_flips_unless_six() {
        assert_eq!(SearchNode::chance_after(Role::Max, 6).next_role(), Role::Max);
        assert_eq!(SearchNode::chance_after(Role::Max, 3).next_role(), Role::Min);
        assert_eq!(SearchNode::chance_after(Role::Min, 1).next_role(), Role::Max);
        assert_eq!(SearchNode::chance_after(Role::Min, 6).next_role(), Role::Min);
        assert_eq!(SearchNode::decision(Role::Min).next_role(), Role::Min);
    }

    #[test]
    fn test_forced_pass_returns_none() {
        let result = agent(2, false).search(&GameState::new(), 5).unwrap();
        assert_eq!(result.best_action, None);
    }

    #[test]
    fn test_prefers_capture() {
        let state = capture_position();
        let result = agent(1, false).search(&state, 3).unwrap();
        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.actions.len(), 2);
    }

    #[test]
    fn test_parallel_root_matches_sequential() {
        let state = capture_position();
        let sequential = agent(1, false).search(&state, 3).unwrap();
        let parallel = agent(1, true).search(&state, 3).unwrap();
        assert_eq!(sequential.best_action, parallel.best_action);
        assert_eq!(sequential.nodes, parallel.nodes);
        for (a, b) in sequential.actions.iter().zip(&parallel.actions) {
            assert_eq!(a.action, b.action);
            assert!((a.value - b.value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_prefers_finishing_plane() {
        let mut blue = Player::with_planes(
            Color::Blue,
            std::array::from_fn(|i| Plane::placed(Color::Blue, i, Position::Finished, 50)),
        );
        blue.planes[0] = Plane::placed(Color::Blue, 0, Position::FinalStretch(4), 50);
        blue.planes[1] = Plane::placed(Color::Blue, 1, Position::OnTrack(20), 21);
        let state = GameState::from_players(vec![blue, Player::new(Color::Green)], 0).unwrap();
        let mut expectimax = agent(0, true);
        assert_eq!(expectimax.get_action(&state, 2).unwrap(), Some(0));
    }

    #[test]
    fn test_depth_zero_scores_successors_directly() {
        let state = capture_position();
        let result = agent(0, false).search(&state, 3).unwrap();
        let weights = EvaluationWeights::default();
        for stats in &result.actions {
            let succ = state.generate_successor(stats.action, 3).unwrap();
            assert_eq!(stats.value, evaluate_state(&succ, Color::Blue, &weights));
        }
    }
}
