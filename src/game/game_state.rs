//! Game state snapshot and the transition function.
//!
//! A `GameState` is never mutated once built: `apply` clones the players,
//! resolves the move (captures, jumps, finishing) on the copy and hands back a
//! brand-new snapshot together with the events that happened on the way.

use crate::game::board::{
    is_jump_point, square_color, track_advance, Color, AMBUSH_OFFSET, BIG_JUMP, SEATED_COLORS,
    SMALL_JUMP,
};
use crate::game::plane::Position;
use crate::game::player::Player;
use crate::{AeroplaneChessError, Result};
use std::fmt;

pub const MIN_DIE: u8 = 1;
pub const MAX_DIE: u8 = 6;

/// Die value that grants the roller another turn.
pub const BONUS_ROLL: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    players: Vec<Player>,
    turn: usize,
    die_roll: Option<u8>,
}

/// Notable things that happened while resolving a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    Captured {
        color: Color,
        plane: usize,
        victim: Color,
        victim_plane: usize,
    },
    Jump {
        color: Color,
        plane: usize,
        from: u8,
        to: Position,
    },
    BigJump {
        color: Color,
        plane: usize,
        from: u8,
        to: Position,
    },
    AmbushCapture {
        color: Color,
        plane: usize,
        victim: Color,
        victim_plane: usize,
    },
    Finished {
        color: Color,
        plane: usize,
    },
}

impl fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveEvent::Captured {
                color,
                plane,
                victim,
                victim_plane,
            } => write!(
                f,
                "{} plane {} caught {} plane {}",
                color, plane, victim, victim_plane
            ),
            MoveEvent::Jump {
                color,
                plane,
                from,
                to,
            } => write!(f, "{} plane {} jumped from {} to {:?}", color, plane, from, to),
            MoveEvent::BigJump {
                color,
                plane,
                from,
                to,
            } => write!(
                f,
                "{} plane {} took a big jump from {} to {:?}",
                color, plane, from, to
            ),
            MoveEvent::AmbushCapture {
                color,
                plane,
                victim,
                victim_plane,
            } => write!(
                f,
                "{} plane {} ambushed {} plane {} on its final stretch",
                color, plane, victim, victim_plane
            ),
            MoveEvent::Finished { color, plane } => {
                write!(f, "{} plane {} finished", color, plane)
            }
        }
    }
}

/// Successor state plus the events produced while reaching it.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<MoveEvent>,
}

pub fn validate_die(die: u8) -> Result<u8> {
    if (MIN_DIE..=MAX_DIE).contains(&die) {
        Ok(die)
    } else {
        Err(AeroplaneChessError::InvalidDie(die))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh two-player game, Blue to move, every plane in its hangar.
    pub fn new() -> Self {
        GameState {
            players: SEATED_COLORS.iter().map(|&color| Player::new(color)).collect(),
            turn: 0,
            die_roll: None,
        }
    }

    /// Mid-game state from explicit players; `turn` wraps around the seats.
    pub fn from_players(players: Vec<Player>, turn: usize) -> Result<Self> {
        if players.is_empty() {
            return Err(AeroplaneChessError::Config(
                "a game needs at least one player".to_string(),
            ));
        }
        let turn = turn % players.len();
        Ok(GameState {
            players,
            turn,
            die_roll: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn die_roll(&self) -> Option<u8> {
        self.die_roll
    }

    /// Copy of this state with the pending die value set.
    pub fn with_die_roll(&self, die: u8) -> Self {
        GameState {
            die_roll: Some(die),
            ..self.clone()
        }
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    pub fn current_color(&self) -> Color {
        self.current_player().color
    }

    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|player| player.color == color)
    }

    /// Planes of the player to move that a roll of `die` can move.
    pub fn movable_planes(&self, die: u8) -> Vec<usize> {
        self.current_player().movable_planes(die)
    }

    pub fn is_win(&self, color: Color) -> bool {
        self.player(color).is_some_and(Player::has_won)
    }

    pub fn is_lose(&self, color: Color) -> bool {
        self.players
            .iter()
            .any(|player| player.color != color && player.has_won())
    }

    pub fn winner(&self) -> Option<Color> {
        self.players
            .iter()
            .find(|player| player.has_won())
            .map(|player| player.color)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Resolves `action` (a plane index of the player to move, or `None` to
    /// pass) for the rolled `die`.
    pub fn apply(&self, action: Option<usize>, die: u8) -> Result<Transition> {
        let die = validate_die(die)?;
        let mut succ = GameState {
            players: self.players.clone(),
            turn: self.turn,
            die_roll: None,
        };
        let mut events = Vec::new();

        if let Some(plane_idx) = action {
            succ.move_plane(plane_idx, die, &mut events)?;
        }

        if die != BONUS_ROLL {
            succ.turn = (succ.turn + 1) % succ.players.len();
        }

        Ok(Transition {
            state: succ,
            events,
        })
    }

    /// Pure successor function: same as [`GameState::apply`] without the event log.
    pub fn generate_successor(&self, action: Option<usize>, die: u8) -> Result<GameState> {
        self.apply(action, die).map(|transition| transition.state)
    }

    fn move_plane(&mut self, plane_idx: usize, die: u8, events: &mut Vec<MoveEvent>) -> Result<()> {
        let turn = self.turn;
        let color = self.players[turn].color;
        let movable = self.players[turn]
            .planes
            .get(plane_idx)
            .is_some_and(|plane| plane.can_move(die));
        if !movable {
            return Err(AeroplaneChessError::IllegalAction {
                color,
                plane: plane_idx,
                die,
            });
        }

        self.players[turn].planes[plane_idx].advance(die)?;
        self.catch_planes_at_mover(plane_idx, events);

        if let Some(square) = self.players[turn].planes[plane_idx].track_square() {
            if square_color(square) == color {
                if is_jump_point(square, color) || is_jump_point(track_advance(square, SMALL_JUMP), color) {
                    self.players[turn].planes[plane_idx].advance(BIG_JUMP)?;
                    events.push(MoveEvent::BigJump {
                        color,
                        plane: plane_idx,
                        from: square,
                        to: self.players[turn].planes[plane_idx].position(),
                    });
                    self.ambush(plane_idx, events);
                } else {
                    self.players[turn].planes[plane_idx].advance(SMALL_JUMP)?;
                    events.push(MoveEvent::Jump {
                        color,
                        plane: plane_idx,
                        from: square,
                        to: self.players[turn].planes[plane_idx].position(),
                    });
                }
                self.catch_planes_at_mover(plane_idx, events);
            }
        }

        if self.players[turn].planes[plane_idx].is_finished() {
            events.push(MoveEvent::Finished {
                color,
                plane: plane_idx,
            });
        }
        Ok(())
    }

    // Every opposing plane on the mover's shared-track square goes home.
    fn catch_planes_at_mover(&mut self, plane_idx: usize, events: &mut Vec<MoveEvent>) {
        let turn = self.turn;
        let color = self.players[turn].color;
        let Some(square) = self.players[turn].planes[plane_idx].track_square() else {
            return;
        };
        for (player_idx, player) in self.players.iter_mut().enumerate() {
            if player_idx == turn {
                continue;
            }
            for plane in player.planes.iter_mut() {
                if plane.track_square() == Some(square) {
                    plane.catch();
                    events.push(MoveEvent::Captured {
                        color,
                        plane: plane_idx,
                        victim: plane.color,
                        victim_plane: plane.index,
                    });
                }
            }
        }
    }

    // A big jump crosses the opponent's final stretch at its ambush cell.
    fn ambush(&mut self, plane_idx: usize, events: &mut Vec<MoveEvent>) {
        let color = self.players[self.turn].color;
        let opponent = color.opponent();
        for player in self.players.iter_mut().filter(|p| p.color == opponent) {
            for plane in player.planes.iter_mut() {
                if plane.final_stretch_offset() == Some(AMBUSH_OFFSET) {
                    plane.catch();
                    events.push(MoveEvent::AmbushCapture {
                        color,
                        plane: plane_idx,
                        victim: plane.color,
                        victim_plane: plane.index,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::plane::{Phase, Plane};
    use assert_matches::assert_matches;

    fn blue_with(planes: [Plane; 4]) -> Player {
        Player::with_planes(Color::Blue, planes)
    }

    fn hangar(color: Color) -> [Plane; 4] {
        std::array::from_fn(|i| Plane::new(color, i))
    }

    fn state_with(blue: [Plane; 4], green: [Plane; 4], turn: usize) -> GameState {
        GameState::from_players(
            vec![blue_with(blue), Player::with_planes(Color::Green, green)],
            turn,
        )
        .unwrap()
    }

    #[test]
    fn test_successor_does_not_mutate_input() {
        let state = GameState::new();
        let before = state.clone();
        let next = state.generate_successor(Some(0), 6).unwrap();
        assert_eq!(state, before);
        assert_eq!(next.players()[0].planes[0].position(), Position::Launch);
    }

    #[test]
    fn test_from_players_rejects_empty_table() {
        assert_matches!(
            GameState::from_players(Vec::new(), 0),
            Err(AeroplaneChessError::Config(_))
        );
        let wrapped = GameState::from_players(GameState::new().players().to_vec(), 3).unwrap();
        assert_eq!(wrapped.turn(), 1);
    }

    #[test]
    fn test_turn_alternation() {
        let state = GameState::new();
        for die in 1..=5 {
            assert_eq!(state.generate_successor(None, die).unwrap().turn(), 1);
        }
        assert_eq!(state.generate_successor(None, 6).unwrap().turn(), 0);

        let green_turn = GameState::from_players(state.players().to_vec(), 1).unwrap();
        assert_eq!(green_turn.generate_successor(None, 2).unwrap().turn(), 0);
    }

    #[test]
    fn test_invalid_die_rejected() {
        let state = GameState::new();
        assert_matches!(state.apply(None, 0), Err(AeroplaneChessError::InvalidDie(0)));
        assert_matches!(state.apply(None, 7), Err(AeroplaneChessError::InvalidDie(7)));
    }

    #[test]
    fn test_immovable_action_rejected() {
        let state = GameState::new();
        assert_matches!(
            state.apply(Some(0), 3),
            Err(AeroplaneChessError::IllegalAction { plane: 0, die: 3, .. })
        );
        assert_matches!(
            state.apply(Some(7), 6),
            Err(AeroplaneChessError::IllegalAction { plane: 7, .. })
        );
    }

    #[test]
    fn test_capture_sends_all_stacked_opponents_home() {
        let mut blue = hangar(Color::Blue);
        blue[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(7), 8);
        let mut green = hangar(Color::Green);
        green[1] = Plane::placed(Color::Green, 1, Position::OnTrack(10), 36);
        green[2] = Plane::placed(Color::Green, 2, Position::OnTrack(10), 36);
        let state = state_with(blue, green, 0);

        let transition = state.apply(Some(0), 3).unwrap();
        let next = transition.state;
        assert_eq!(next.players()[0].planes[0].position(), Position::OnTrack(10));
        assert_eq!(next.players()[1].planes[1].phase(), Phase::Hangar);
        assert_eq!(next.players()[1].planes[2].phase(), Phase::Hangar);
        assert_eq!(next.players()[1].planes[1].total_steps(), 0);
        let captures = transition
            .events
            .iter()
            .filter(|e| matches!(e, MoveEvent::Captured { .. }))
            .count();
        assert_eq!(captures, 2);
    }

    #[test]
    fn test_small_jump_on_own_color() {
        // Square 5 is Blue; neither 5 nor 9 is Blue's jump point.
        let mut blue = hangar(Color::Blue);
        blue[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(2), 3);
        let state = state_with(blue, hangar(Color::Green), 0);

        let transition = state.apply(Some(0), 3).unwrap();
        let plane = transition.state.players()[0].planes[0];
        assert_eq!(plane.position(), Position::OnTrack(9));
        assert_eq!(plane.total_steps(), 10);
        assert_matches!(transition.events[..], [MoveEvent::Jump { from: 5, to: Position::OnTrack(9), .. }]);
    }

    #[test]
    fn test_big_jump_on_trigger_square_ambushes() {
        let mut blue = hangar(Color::Blue);
        blue[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(15), 16);
        let mut green = hangar(Color::Green);
        green[3] = Plane::placed(Color::Green, 3, Position::FinalStretch(AMBUSH_OFFSET), 50);
        green[2] = Plane::placed(Color::Green, 2, Position::FinalStretch(2), 50);
        let state = state_with(blue, green, 0);

        let transition = state.apply(Some(0), 2).unwrap();
        let next = &transition.state;
        let plane = next.players()[0].planes[0];
        assert_eq!(plane.position(), Position::OnTrack(33));
        assert_eq!(plane.total_steps(), 34);
        assert_eq!(next.players()[1].planes[3].phase(), Phase::Hangar);
        assert_eq!(next.players()[1].planes[2].position(), Position::FinalStretch(2));
        assert!(transition
            .events
            .iter()
            .any(|e| matches!(e, MoveEvent::AmbushCapture { victim_plane: 3, .. })));
    }

    #[test]
    fn test_big_jump_four_before_trigger() {
        // Landing on 13 (Blue), whose square four ahead is Blue's trigger 17.
        let mut blue = hangar(Color::Blue);
        blue[1] = Plane::placed(Color::Blue, 1, Position::OnTrack(10), 11);
        let state = state_with(blue, hangar(Color::Green), 0);

        let next = state.generate_successor(Some(1), 3).unwrap();
        assert_eq!(next.players()[0].planes[1].position(), Position::OnTrack(29));
        assert_eq!(next.players()[0].planes[1].total_steps(), 30);
    }

    #[test]
    fn test_capture_after_jump() {
        let mut blue = hangar(Color::Blue);
        blue[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(2), 3);
        let mut green = hangar(Color::Green);
        green[0] = Plane::placed(Color::Green, 0, Position::OnTrack(9), 35);
        let state = state_with(blue, green, 0);

        let next = state.generate_successor(Some(0), 3).unwrap();
        assert_eq!(next.players()[0].planes[0].position(), Position::OnTrack(9));
        assert_eq!(next.players()[1].planes[0].phase(), Phase::Hangar);
    }

    #[test]
    fn test_own_planes_are_never_captured() {
        let mut blue = hangar(Color::Blue);
        blue[0] = Plane::placed(Color::Blue, 0, Position::OnTrack(20), 21);
        blue[1] = Plane::placed(Color::Blue, 1, Position::OnTrack(22), 23);
        let state = state_with(blue, hangar(Color::Green), 0);

        let next = state.generate_successor(Some(0), 2).unwrap();
        assert_eq!(next.players()[0].planes[1].position(), Position::OnTrack(22));
    }

    #[test]
    fn test_finish_event_and_win() {
        let mut green: [Plane; 4] = std::array::from_fn(|i| Plane::placed(Color::Green, i, Position::Finished, 50));
        green[0] = Plane::placed(Color::Green, 0, Position::FinalStretch(4), 50);
        let state = state_with(hangar(Color::Blue), green, 1);
        assert!(!state.is_win(Color::Green));

        let transition = state.apply(Some(0), 2).unwrap();
        assert_matches!(transition.events[..], [MoveEvent::Finished { color: Color::Green, plane: 0 }]);
        let next = transition.state;
        assert!(next.is_win(Color::Green));
        assert!(next.is_lose(Color::Blue));
        assert!(!next.is_lose(Color::Green));
        assert!(!next.is_win(Color::Blue));
        assert_eq!(next.winner(), Some(Color::Green));
    }

    #[test]
    fn test_pass_moves_nothing() {
        let state = GameState::new();
        let next = state.generate_successor(None, 4).unwrap();
        assert_eq!(next.players(), state.players());
    }
}
