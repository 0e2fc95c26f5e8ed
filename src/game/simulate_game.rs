use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::board::Color;
use crate::game::game_state::{GameState, MAX_DIE, MIN_DIE};
use crate::game::get_legal_moves::get_legal_moves;
use crate::scoring::scoring::{evaluate_state, EvaluationWeights};
use crate::Result;

pub fn roll_die(rng: &mut StdRng) -> u8 {
    rng.random_range(MIN_DIE..=MAX_DIE)
}

/// Plays up to `max_steps` uniformly random moves from `state`, rolling a
/// fresh die each step, and scores the position reached from `perspective`.
/// Stops early once either side has won.
pub fn random_playout(
    state: &GameState,
    perspective: Color,
    max_steps: usize,
    weights: &EvaluationWeights,
    rng: &mut StdRng,
) -> Result<f64> {
    let mut simulated = state.clone();

    for _ in 0..max_steps {
        if simulated.is_win(perspective) || simulated.is_lose(perspective) {
            break;
        }
        let die = roll_die(rng);
        let legal_moves = get_legal_moves(&simulated, die);
        let action = legal_moves.choose(rng).copied();
        simulated = simulated.generate_successor(action, die)?;
    }

    Ok(evaluate_state(&simulated, perspective, weights))
}
