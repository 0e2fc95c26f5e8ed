use crate::game::game_state::GameState;

/// Returns the plane indices the player to move may pick for `die`.
/// An empty list means the only option is to pass.
pub fn get_legal_moves(state: &GameState, die: u8) -> Vec<usize> {
    state.movable_planes(die)
}

/// Legal actions as the agents see them: every movable plane, or the single
/// forced pass when nothing can move.
pub fn get_legal_actions(state: &GameState, die: u8) -> Vec<Option<usize>> {
    let moves = get_legal_moves(state, die);
    if moves.is_empty() {
        vec![None]
    } else {
        moves.into_iter().map(Some).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_position_forces_pass() {
        let state = GameState::new();
        assert_eq!(get_legal_actions(&state, 3), vec![None]);
        assert_eq!(get_legal_actions(&state, 6).len(), 4);
    }
}
