use crate::game::board::{
    track_advance, Color, FINAL_STRETCH_ENTRY_STEPS, FINAL_STRETCH_GOAL, LAUNCH_ROLL, NUM_SQUARES,
};
use crate::{AeroplaneChessError, Result};
use serde::{Deserialize, Serialize};

/// Where a plane currently is. Track squares and final-stretch cells are
/// carried by the variant that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Hangar,
    Launch,
    OnTrack(u8),
    FinalStretch(u8),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Hangar,
    Launch,
    OnTrack,
    FinalStretch,
    Finished,
}

impl Position {
    pub fn phase(self) -> Phase {
        match self {
            Position::Hangar => Phase::Hangar,
            Position::Launch => Phase::Launch,
            Position::OnTrack(_) => Phase::OnTrack,
            Position::FinalStretch(_) => Phase::FinalStretch,
            Position::Finished => Phase::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plane {
    pub color: Color,
    pub index: usize,
    position: Position,
    total_steps: u8,
}

impl Plane {
    pub fn new(color: Color, index: usize) -> Self {
        Plane {
            color,
            index,
            position: Position::Hangar,
            total_steps: 0,
        }
    }

    /// Builds a plane at an arbitrary position, e.g. to set up a mid-game board.
    /// Track squares wrap around the board and final-stretch offsets at or
    /// past the goal count as finished.
    pub fn placed(color: Color, index: usize, position: Position, total_steps: u8) -> Self {
        let position = match position {
            Position::OnTrack(square) => Position::OnTrack(square % NUM_SQUARES),
            Position::FinalStretch(offset) if offset >= FINAL_STRETCH_GOAL => Position::Finished,
            other => other,
        };
        Plane {
            color,
            index,
            position,
            total_steps: total_steps.min(FINAL_STRETCH_ENTRY_STEPS),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.position.phase()
    }

    pub fn total_steps(&self) -> u8 {
        self.total_steps
    }

    pub fn track_square(&self) -> Option<u8> {
        match self.position {
            Position::OnTrack(square) => Some(square),
            _ => None,
        }
    }

    pub fn final_stretch_offset(&self) -> Option<u8> {
        match self.position {
            Position::FinalStretch(offset) => Some(offset),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position == Position::Finished
    }

    /// Whether a roll of `die` can move this plane.
    pub fn can_move(&self, die: u8) -> bool {
        match self.position {
            Position::Hangar => die == LAUNCH_ROLL,
            Position::Launch | Position::OnTrack(_) | Position::FinalStretch(_) => true,
            Position::Finished => false,
        }
    }

    /// Moves the plane `steps` forward according to its phase.
    pub fn advance(&mut self, steps: u8) -> Result<()> {
        match self.position {
            Position::Hangar if steps == LAUNCH_ROLL => {
                self.position = Position::Launch;
            }
            Position::Launch => {
                let square = track_advance(self.color.entry(), steps.saturating_sub(1));
                self.position = Position::OnTrack(square);
                self.total_steps = steps;
            }
            Position::OnTrack(square) => {
                let travelled = self.total_steps as u16 + steps as u16;
                if travelled > FINAL_STRETCH_ENTRY_STEPS as u16 {
                    let offset = (travelled - FINAL_STRETCH_ENTRY_STEPS as u16) as u8;
                    self.total_steps = FINAL_STRETCH_ENTRY_STEPS;
                    self.enter_final_stretch(offset);
                } else {
                    self.position = Position::OnTrack(track_advance(square, steps));
                    self.total_steps = travelled as u8;
                }
            }
            Position::FinalStretch(offset) => self.enter_final_stretch(offset + steps),
            Position::Hangar | Position::Finished => {
                return Err(AeroplaneChessError::IllegalMove {
                    color: self.color,
                    plane: self.index,
                    phase: self.phase(),
                    steps,
                });
            }
        }
        Ok(())
    }

    // Overshooting the goal bounces back by the excess.
    fn enter_final_stretch(&mut self, target: u8) {
        self.position = if target > FINAL_STRETCH_GOAL {
            Position::FinalStretch(FINAL_STRETCH_GOAL.saturating_sub(target - FINAL_STRETCH_GOAL))
        } else if target == FINAL_STRETCH_GOAL {
            Position::Finished
        } else {
            Position::FinalStretch(target)
        };
    }

    /// Sends the plane back to its hangar.
    pub fn catch(&mut self) {
        self.position = Position::Hangar;
        self.total_steps = 0;
    }
}
