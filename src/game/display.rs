//! Console rendering of a game state.

use crate::game::board::{square_color, Color, FINAL_STRETCH_GOAL, NUM_SQUARES, SEATED_COLORS};
use crate::game::game_state::GameState;
use crate::game::plane::Position;
use std::fmt;

fn cell_row(cells: &[Option<char>]) -> String {
    cells
        .iter()
        .map(|cell| cell.unwrap_or(' ').to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// Two rows per strip: number of planes on each cell, then their color.
fn occupancy_rows(len: usize, occupants: impl Iterator<Item = (usize, Color)>) -> (String, String) {
    let mut counts = vec![0u32; len];
    let mut colors: Vec<Option<char>> = vec![None; len];
    for (cell, color) in occupants {
        counts[cell] += 1;
        colors[cell] = Some(color.symbol());
    }
    let counts: Vec<Option<char>> = counts
        .iter()
        .map(|&n| if n == 0 { None } else { char::from_digit(n.min(9), 10) })
        .collect();
    (cell_row(&counts), cell_row(&colors))
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares = NUM_SQUARES as usize;

        let mut markers: Vec<Option<char>> = vec![None; squares];
        for color in SEATED_COLORS {
            markers[color.entry() as usize] = Some('E');
            markers[color.final_stretch_entry() as usize] = Some('F');
        }
        let track: Vec<Option<char>> = (0..NUM_SQUARES)
            .map(|square| Some(square_color(square).symbol()))
            .collect();
        let (counts, colors) = occupancy_rows(
            squares,
            self.players().iter().flat_map(|player| {
                player
                    .planes
                    .iter()
                    .filter_map(|plane| plane.track_square().map(|sq| (sq as usize, plane.color)))
            }),
        );

        writeln!(f, "{:=^103}", " Main track ")?;
        writeln!(f, "{}", cell_row(&markers))?;
        writeln!(f, "{}", cell_row(&track))?;
        writeln!(f, "{}", counts)?;
        writeln!(f, "{}", colors)?;
        writeln!(f, "{:=^103}", " Final stretches ")?;

        let stretch_len = FINAL_STRETCH_GOAL as usize + 1;
        for player in self.players() {
            let cells: Vec<Option<char>> = vec![Some(player.color.symbol()); stretch_len];
            let (counts, colors) = occupancy_rows(
                stretch_len,
                player.planes.iter().filter_map(|plane| {
                    plane
                        .final_stretch_offset()
                        .map(|offset| (offset as usize, plane.color))
                }),
            );
            let count_of = |wanted: Position| player.planes.iter().filter(|p| p.position() == wanted).count();
            writeln!(f, "{:=^103}", format!(" {} ", player.color))?;
            writeln!(f, "{}", cell_row(&cells))?;
            writeln!(f, "{}", counts)?;
            writeln!(f, "{}", colors)?;
            writeln!(
                f,
                "hangar: {}  launch: {}  finished: {}",
                count_of(Position::Hangar),
                count_of(Position::Launch),
                count_of(Position::Finished)
            )?;
        }

        match self.die_roll() {
            Some(die) => write!(f, "turn: {}  die: {}", self.current_color(), die),
            None => write!(f, "turn: {}", self.current_color()),
        }
    }
}
