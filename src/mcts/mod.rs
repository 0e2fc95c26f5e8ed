pub mod algorithm;
pub mod expectimax_algorithm;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod selection;
