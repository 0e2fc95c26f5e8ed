use crate::game::board::{Color, FINAL_STRETCH_GOAL};
use crate::game::game_state::GameState;
use crate::game::plane::{Plane, Position};
use serde::{Deserialize, Serialize};

/// Weights of the per-plane heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationWeights {
    /// Value of a finished plane.
    /// Default: 100.0
    pub finished: f64,

    /// Value of a plane still in its hangar.
    /// Default: -50.0
    pub hangar: f64,

    /// Value per step travelled on the shared track (launch counts as 0 steps).
    /// Default: 1.0
    pub track_step: f64,

    /// Base value of a plane on its final stretch.
    /// Default: 50.0
    pub final_stretch_base: f64,

    /// Extra value per final-stretch cell advanced.
    /// Default: 5.0
    pub final_stretch_step: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            finished: 100.0,
            hangar: -50.0,
            track_step: 1.0,
            final_stretch_base: 50.0,
            final_stretch_step: 5.0,
        }
    }
}

pub fn plane_value(plane: &Plane, weights: &EvaluationWeights) -> f64 {
    match plane.position() {
        Position::Finished => weights.finished,
        Position::Hangar => weights.hangar,
        Position::FinalStretch(offset) => {
            let advanced = offset.min(FINAL_STRETCH_GOAL) as f64;
            weights.final_stretch_base + weights.final_stretch_step * advanced
        }
        Position::Launch | Position::OnTrack(_) => weights.track_step * plane.total_steps() as f64,
    }
}

/// Heuristic desirability of `state` for `perspective`: its own planes count
/// positively, every other color's planes negatively.
pub fn evaluate_state(state: &GameState, perspective: Color, weights: &EvaluationWeights) -> f64 {
    state
        .players()
        .iter()
        .map(|player| {
            let total: f64 = player.planes.iter().map(|plane| plane_value(plane, weights)).sum();
            if player.color == perspective {
                total
            } else {
                -total
            }
        })
        .sum()
}
