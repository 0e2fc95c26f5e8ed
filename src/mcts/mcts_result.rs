/// Statistics for one root action after a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStats {
    pub action: Option<usize>,
    pub visits: usize,
    /// Accumulated utility (MCTS) or expected value (expectimax).
    pub value: f64,
}

/// Outcome of a single decision search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_action: Option<usize>,
    pub actions: Vec<ActionStats>,
    /// Nodes created (MCTS) or states expanded (expectimax).
    pub nodes: usize,
}

impl SearchResult {
    pub fn forced(action: Option<usize>) -> Self {
        SearchResult {
            best_action: action,
            actions: Vec::new(),
            nodes: 0,
        }
    }
}
