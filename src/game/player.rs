use crate::game::board::{Color, PLANES_PER_PLAYER};
use crate::game::plane::Plane;

/// A seated color and its four planes. Equality and hashing follow the
/// ordered plane list, so two players in the same configuration compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    pub color: Color,
    pub planes: [Plane; PLANES_PER_PLAYER],
}

impl Player {
    pub fn new(color: Color) -> Self {
        Player {
            color,
            planes: std::array::from_fn(|index| Plane::new(color, index)),
        }
    }

    pub fn with_planes(color: Color, planes: [Plane; PLANES_PER_PLAYER]) -> Self {
        Player { color, planes }
    }

    /// Indices of the planes a roll of `die` can move.
    pub fn movable_planes(&self, die: u8) -> Vec<usize> {
        self.planes
            .iter()
            .enumerate()
            .filter(|(_, plane)| plane.can_move(die))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn remaining_planes_count(&self) -> usize {
        self.planes.iter().filter(|plane| !plane.is_finished()).count()
    }

    pub fn has_won(&self) -> bool {
        self.remaining_planes_count() == 0
    }
}
