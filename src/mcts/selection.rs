use crate::mcts::node::{NodeId, SearchTree};

/// UCB1 score `u/n + c * sqrt(ln(N) / n)`.
pub fn ucb1(utility: f64, visits: usize, parent_visits: usize, exploration: f64) -> f64 {
    let n = visits.max(1) as f64;
    let parent = parent_visits.max(1) as f64;
    utility / n + exploration * (parent.ln() / n).sqrt()
}

/// Child of `id` with the highest UCB1 score, or `None` for a leaf.
pub fn select_best_child(tree: &SearchTree, id: NodeId, exploration: f64) -> Option<NodeId> {
    let parent_visits = tree.node(id).visits;
    let mut best: Option<(NodeId, f64)> = None;

    for &child_id in &tree.node(id).children {
        let child = tree.node(child_id);
        let score = ucb1(child.utility, child.visits, parent_visits, exploration);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((child_id, score));
        }
    }

    best.map(|(child_id, _)| child_id)
}
