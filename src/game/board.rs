//! Static board geometry.
//!
//! The shared track has 52 squares whose colors cycle Red, Blue, Yellow, Green.
//! Each color owns an entry square, a final-stretch entry square and one jump
//! trigger square. Only Blue and Green are seated in the two-player variant,
//! but the tables cover all four colors.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_SQUARES: u8 = 52;

/// Cumulative steps after which a plane leaves the shared track.
pub const FINAL_STRETCH_ENTRY_STEPS: u8 = 50;

/// Final-stretch goal cell (cells 0..=6).
pub const FINAL_STRETCH_GOAL: u8 = 6;

/// Final-stretch cell reachable by an opponent's big jump.
pub const AMBUSH_OFFSET: u8 = 3;

pub const LAUNCH_ROLL: u8 = 6;
pub const SMALL_JUMP: u8 = 4;
pub const BIG_JUMP: u8 = 16;

pub const PLANES_PER_PLAYER: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

/// Square color order along the shared track.
pub const SQUARE_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

/// Colors seated in the two-player variant, in turn order.
pub const SEATED_COLORS: [Color; 2] = [Color::Blue, Color::Green];

impl Color {
    /// Square a launched plane counts its first step from.
    pub const fn entry(self) -> u8 {
        match self {
            Color::Red => 39,
            Color::Blue => 0,
            Color::Yellow => 13,
            Color::Green => 26,
        }
    }

    /// Shared-track square where the color turns into its final stretch.
    pub const fn final_stretch_entry(self) -> u8 {
        match self {
            Color::Red => 36,
            Color::Blue => 49,
            Color::Yellow => 10,
            Color::Green => 23,
        }
    }

    pub const fn jump_point(self) -> u8 {
        match self {
            Color::Red => 4,
            Color::Blue => 17,
            Color::Yellow => 30,
            Color::Green => 43,
        }
    }

    pub const fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Yellow,
            Color::Blue => Color::Green,
            Color::Yellow => Color::Red,
            Color::Green => Color::Blue,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Green => 'G',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn square_color(square: u8) -> Color {
    SQUARE_COLORS[(square % NUM_SQUARES) as usize % SQUARE_COLORS.len()]
}

pub fn is_jump_point(square: u8, color: Color) -> bool {
    square % NUM_SQUARES == color.jump_point()
}

/// Square reached after `steps` forward moves on the shared track.
pub fn track_advance(square: u8, steps: u8) -> u8 {
    ((square as u16 + steps as u16) % NUM_SQUARES as u16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_points_sit_on_own_color() {
        for color in SQUARE_COLORS {
            assert_eq!(square_color(color.jump_point()), color);
        }
    }

    #[test]
    fn test_opponent_is_involution() {
        for color in SQUARE_COLORS {
            assert_ne!(color.opponent(), color);
            assert_eq!(color.opponent().opponent(), color);
        }
    }

    #[test]
    fn test_track_wraps_around() {
        assert_eq!(track_advance(50, 4), 2);
        assert_eq!(track_advance(51, 1), 0);
        assert_eq!(track_advance(10, 16), 26);
    }
}
