//! Arena-backed search tree for MCTS.
//!
//! Nodes refer to their parent and children by index into the arena, so the
//! tree owns every node and is dropped wholesale after a decision.

use crate::game::game_state::GameState;
use crate::game::get_legal_moves::get_legal_actions;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct MctsNode {
    /// State reached by `action`, with the die rolled for this node's own move.
    pub state: GameState,

    pub visits: usize,

    /// Sum of all rollout scores backpropagated through this node
    pub utility: f64,

    /// Action that produced this node from its parent (`None` = pass).
    pub action: Option<usize>,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl MctsNode {
    pub fn die(&self) -> u8 {
        self.state.die_roll().unwrap_or(0)
    }

    /// Actions available at this node: movable planes, or one forced pass.
    pub fn legal_actions(&self) -> Vec<Option<usize>> {
        get_legal_actions(&self.state, self.die())
    }

    pub fn average_utility(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.utility / self.visits as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<MctsNode>,
}

impl SearchTree {
    /// Tree with a single root whose state already carries the rolled die.
    pub fn new(root_state: GameState) -> Self {
        SearchTree {
            nodes: vec![MctsNode {
                state: root_state,
                visits: 0,
                utility: 0.0,
                action: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &MctsNode> + '_ {
        self.nodes[id].children.iter().map(move |&child| &self.nodes[child])
    }

    /// Appends a freshly expanded child: one visit, zero utility.
    pub fn add_child(&mut self, parent: NodeId, action: Option<usize>, state: GameState) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(MctsNode {
            state,
            visits: 1,
            utility: 0.0,
            action,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Actions of `id` that have no child yet.
    pub fn untried_actions(&self, id: NodeId) -> Vec<Option<usize>> {
        let tried: Vec<Option<usize>> = self.children(id).map(|child| child.action).collect();
        self.nodes[id]
            .legal_actions()
            .into_iter()
            .filter(|action| !tried.contains(action))
            .collect()
    }

    /// One child per distinct legal action (a single child for a forced pass).
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        self.untried_actions(id).is_empty()
    }

    /// Adds `value` to the utility of `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, value: f64) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id];
            node.utility += value;
            current = node.parent;
        }
    }
}
