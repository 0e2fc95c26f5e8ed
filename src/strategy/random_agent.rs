use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::board::Color;
use crate::game::game_state::GameState;
use crate::game::get_legal_moves::get_legal_moves;
use crate::strategy::agent::Agent;
use crate::Result;

/// Picks uniformly among the movable planes.
pub struct RandomAgent {
    color: Color,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(color: Color, seed: u64) -> Self {
        Self {
            color,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn get_action(&mut self, state: &GameState, die: u8) -> Result<Option<usize>> {
        Ok(get_legal_moves(state, die).choose(&mut self.rng).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::plane::{Plane, Position};
    use crate::game::player::Player;

    #[test]
    fn test_random_agent_only_returns_movable_planes() {
        let mut blue = Player::new(Color::Blue);
        blue.planes[1] = Plane::placed(Color::Blue, 1, Position::OnTrack(12), 13);
        blue.planes[3] = Plane::placed(Color::Blue, 3, Position::Finished, 50);
        let state = GameState::from_players(vec![blue, Player::new(Color::Green)], 0).unwrap();

        let mut agent = RandomAgent::new(Color::Blue, 42);
        for _ in 0..50 {
            assert_eq!(agent.get_action(&state, 4).unwrap(), Some(1));
            let on_six = agent.get_action(&state, 6).unwrap().unwrap();
            assert!([0, 1, 2].contains(&on_six));
        }
    }
}
