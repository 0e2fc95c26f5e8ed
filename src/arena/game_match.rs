use rand::rngs::StdRng;
use std::time::Instant;

use crate::arena::seat::{DecisionLatency, Seat};
use crate::game::board::Color;
use crate::game::game_state::GameState;
use crate::game::simulate_game::roll_die;
use crate::scoring::scoring::{evaluate_state, EvaluationWeights};
use crate::{AeroplaneChessError, Result};

#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Die rolls after which an unfinished game is declared a draw.
    pub max_turns: usize,
    /// Print the board after every move.
    pub show_board: bool,
    /// Weights for the final per-color scores.
    pub weights: EvaluationWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_turns: 2000,
            show_board: false,
            weights: EvaluationWeights::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub winner: Option<Color>,
    pub turns: usize,
    /// Heuristic score of the final position for each seated color.
    pub scores: Vec<(Color, f64)>,
    pub latencies: Vec<(Color, DecisionLatency)>,
    pub final_state: GameState,
}

impl MatchOutcome {
    pub fn score_of(&self, color: Color) -> Option<f64> {
        self.scores
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, score)| *score)
    }
}

// Board as the mover sees it, with the rolled die.
fn board_before_move(state: &GameState, die: u8) -> String {
    state.with_die_roll(die).to_string()
}

/// Plays one game between `seats` (in seating order: Blue, then Green).
///
/// An agent answering with a plane that cannot move, or passing while a plane
/// could move, aborts the game with an error.
pub fn play_match(seats: &mut [Seat], config: &MatchConfig, rng: &mut StdRng) -> Result<MatchOutcome> {
    let mut state = GameState::new();
    if seats.len() != state.players().len()
        || seats
            .iter()
            .zip(state.players())
            .any(|(seat, player)| seat.color() != player.color)
    {
        return Err(AeroplaneChessError::Config(format!(
            "seats {:?} do not match the board's players",
            seats.iter().map(Seat::color).collect::<Vec<_>>()
        )));
    }

    let mut turns = 0;
    while turns < config.max_turns && !state.is_terminal() {
        let die = roll_die(rng);
        let seat = &mut seats[state.turn()];
        let color = seat.color();

        if config.show_board {
            println!("{}\n", board_before_move(&state, die));
        }

        let started = Instant::now();
        let action = seat.agent.get_action(&state, die)?;
        seat.latency.record(started.elapsed());

        let movable = state.movable_planes(die);
        match action {
            Some(plane) if !movable.contains(&plane) => {
                return Err(AeroplaneChessError::IllegalAction { color, plane, die });
            }
            None if !movable.is_empty() => {
                return Err(AeroplaneChessError::IllegalPass { color, die });
            }
            _ => {}
        }

        let transition = state.apply(action, die)?;
        log::debug!("{} rolled {} and played {:?}", color, die, action);
        for event in &transition.events {
            log::info!("{}", event);
        }
        state = transition.state;
        turns += 1;
    }

    for seat in seats.iter_mut() {
        seat.agent.end_episode();
    }

    let winner = state.winner();
    match winner {
        Some(color) => log::info!("{} wins after {} turns", color, turns),
        None => log::warn!("No winner after {} turns, game drawn", turns),
    }

    Ok(MatchOutcome {
        winner,
        turns,
        scores: state
            .players()
            .iter()
            .map(|player| (player.color, evaluate_state(&state, player.color, &config.weights)))
            .collect(),
        latencies: seats.iter().map(|seat| (seat.color(), seat.latency)).collect(),
        final_state: state,
    })
}
