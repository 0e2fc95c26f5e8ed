//! Monte Carlo Tree Search agent.
//!
//! Each decision grows a fresh tree from the current state: UCB1 selection
//! over fully expanded nodes, expansion of one random untried action, a
//! bounded random rollout, and backpropagation of the rollout score to the
//! root. Every expanded child rolls its own die, which fixes the actions
//! available below it.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::board::Color;
use crate::game::game_state::{validate_die, GameState};
use crate::game::get_legal_moves::get_legal_moves;
use crate::game::simulate_game::{random_playout, roll_die};
use crate::mcts::hyperparameters::{FinalSelection, MctsHyperparameters};
use crate::mcts::mcts_result::{ActionStats, SearchResult};
use crate::mcts::node::{MctsNode, NodeId, SearchTree, ROOT};
use crate::mcts::selection::select_best_child;
use crate::scoring::scoring::EvaluationWeights;
use crate::strategy::agent::Agent;
use crate::{AeroplaneChessError, Result};

pub struct MctsAgent {
    color: Color,
    params: MctsHyperparameters,
    weights: EvaluationWeights,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(color: Color, params: MctsHyperparameters, weights: EvaluationWeights, seed: u64) -> Self {
        Self {
            color,
            params,
            weights,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs the configured number of iterations for `state` with `die` rolled.
    pub fn search(&mut self, state: &GameState, die: u8) -> Result<SearchResult> {
        let die = validate_die(die)?;
        let legal = get_legal_moves(state, die);
        if legal.is_empty() {
            return Ok(SearchResult::forced(None));
        }

        let mut tree = SearchTree::new(state.with_die_roll(die));
        for _ in 0..self.params.iterations {
            self.iterate(&mut tree)?;
        }

        let result = final_action(&tree, self.params.final_selection)?;
        log::debug!(
            "MCTS {} die {}: {} nodes, best {:?}",
            self.color,
            die,
            tree.len(),
            result.best_action
        );
        Ok(result)
    }

    fn iterate(&mut self, tree: &mut SearchTree) -> Result<()> {
        // 1. Selection
        let mut current = ROOT;
        tree.node_mut(ROOT).visits += 1;
        while !tree.node(current).state.is_terminal() && tree.is_fully_expanded(current) {
            current = select_best_child(tree, current, self.params.exploration).ok_or_else(|| {
                AeroplaneChessError::SearchDegenerate(format!(
                    "fully expanded node {} has no children",
                    current
                ))
            })?;
            tree.node_mut(current).visits += 1;
        }

        // 2. Expansion
        let leaf = if tree.node(current).state.is_terminal() {
            current
        } else {
            self.expand(tree, current)?
        };

        // 3. Simulation
        let score = random_playout(
            &tree.node(leaf).state,
            self.color,
            self.params.rollout_depth,
            &self.weights,
            &mut self.rng,
        )?;
        log::trace!("MCTS rollout from node {} scored {:.2}", leaf, score);

        // 4. Backpropagation
        tree.backpropagate(leaf, score);
        Ok(())
    }

    fn expand(&mut self, tree: &mut SearchTree, id: NodeId) -> Result<NodeId> {
        let untried = tree.untried_actions(id);
        let action = *untried.choose(&mut self.rng).ok_or_else(|| {
            AeroplaneChessError::SearchDegenerate(format!("node {} has nothing to expand", id))
        })?;
        let node = tree.node(id);
        let next_die = roll_die(&mut self.rng);
        let child_state = node
            .state
            .generate_successor(action, node.die())?
            .with_die_roll(next_die);
        Ok(tree.add_child(id, action, child_state))
    }
}

/// Picks the root child to play. `TotalUtility` ranks children by their
/// accumulated rollout score, so heavily visited children are favoured.
pub fn final_action(tree: &SearchTree, rule: FinalSelection) -> Result<SearchResult> {
    let score = |child: &MctsNode| match rule {
        FinalSelection::TotalUtility => child.utility,
        FinalSelection::MeanUtility => child.average_utility(),
    };

    let best_action = tree
        .children(ROOT)
        .max_by(|a, b| score(a).total_cmp(&score(b)))
        .map(|child| child.action)
        .ok_or_else(|| AeroplaneChessError::SearchDegenerate("root was never expanded".to_string()))?;

    Ok(SearchResult {
        best_action,
        actions: tree
            .children(ROOT)
            .map(|child| ActionStats {
                action: child.action,
                visits: child.visits,
                value: child.utility,
            })
            .collect(),
        nodes: tree.len(),
    })
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        "mcts"
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

    fn agent(color: Color, seed: u64) -> MctsAgent {
        MctsAgent::new(color, MctsHyperparameters::default(), EvaluationWeights::default(), seed)
    }

    #[test]
    fn test_no_legal_action_returns_none() {
        let mut mcts = agent(Color::Blue, 1);
        let result = mcts.search(&GameState::new(), 4).unwrap();
        assert_eq!(result.best_action, None);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_single_legal_action_is_chosen() {
        let mut planes: [Plane; 4] =
            std::array::from_fn(|i| Plane::placed(Color::Blue, i, Position::Finished, 50));
        planes[2] = Plane::placed(Color::Blue, 2, Position::OnTrack(30), 31);
        let state = GameState::from_players(
            vec![Player::with_planes(Color::Blue, planes), Player::new(Color::Green)],
            0,
        )
        .unwrap();
        for seed in 0..3 {
            let mut mcts = agent(Color::Blue, seed);
            let result = mcts.search(&state, 3).unwrap();
            assert_eq!(result.best_action, Some(2));
            assert_eq!(result.actions.len(), 1);
            assert_eq!(result.actions[0].visits, 200);
        }
    }

    #[test]
    fn test_choice_is_always_legal() {
        let state = GameState::new();
        let mut mcts = MctsAgent::new(
            Color::Blue,
            MctsHyperparameters {
                iterations: 60,
                ..Default::default()
            },
            EvaluationWeights::default(),
            11,
        );
        let result = mcts.search(&state, 6).unwrap();
        let action = result.best_action.unwrap();
        assert!(state.movable_planes(6).contains(&action));
        assert_eq!(result.actions.len(), 4);
        let visits: usize = result.actions.iter().map(|a| a.visits).sum();
        assert_eq!(visits, 60);
    }

    #[test]
    fn test_mean_selection_stays_legal() {
        let mut players = vec![Player::new(Color::Blue), Player::new(Color::Green)];
        players[0].planes[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(20), 21);
        players[0].planes[1] = Plane::placed(Color::Blue, 1, Position::FinalStretch(2), 50);
        let state = GameState::from_players(players, 0).unwrap();
        let mut mcts = MctsAgent::new(
            Color::Blue,
            MctsHyperparameters {
                iterations: 40,
                final_selection: FinalSelection::MeanUtility,
                ..Default::default()
            },
            EvaluationWeights::default(),
            5,
        );
        let action = mcts.get_action(&state, 4).unwrap();
        assert!(matches!(action, Some(0) | Some(1)));
    }

    #[test]
    fn test_final_action_total_versus_mean() {
        let root = GameState::new().with_die_roll(6);
        let mut tree = SearchTree::new(root.clone());
        for (plane, visits, utility) in [(0, 10, 30.0), (1, 2, 20.0)] {
            let child_state = root.generate_successor(Some(plane), 6).unwrap().with_die_roll(1);
            let child = tree.add_child(ROOT, Some(plane), child_state);
            tree.node_mut(child).visits = visits;
            tree.node_mut(child).utility = utility;
        }

        let total = final_action(&tree, FinalSelection::TotalUtility).unwrap();
        assert_eq!(total.best_action, Some(0));
        assert_eq!(total.actions.len(), 2);
        assert_eq!(total.nodes, 3);

        let mean = final_action(&tree, FinalSelection::MeanUtility).unwrap();
        assert_eq!(mean.best_action, Some(1));
        assert_eq!(tree.node(2).average_utility(), 10.0);
    }

    #[test]
    fn test_final_action_needs_expanded_root() {
        let tree = SearchTree::new(GameState::new().with_die_roll(6));
        assert!(matches!(
            final_action(&tree, FinalSelection::TotalUtility),
            Err(AeroplaneChessError::SearchDegenerate(_))
        ));
    }

    #[test]
    fn test_invalid_die_is_rejected() {
        let mut mcts = agent(Color::Green, 2);
        assert!(matches!(
            mcts.search(&GameState::new(), 9),
            Err(AeroplaneChessError::InvalidDie(9))
        ));
    }
}
