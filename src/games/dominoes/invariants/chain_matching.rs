//! Chain matching invariant: adjacent tiles touch on equal values.

use super::super::board::chain_is_linked;
use super::super::GameSnapshot;
use super::Invariant;

/// Invariant: every adjacent pair on the board touches on equal values.
pub struct ChainMatchingInvariant;

impl Invariant<GameSnapshot> for ChainMatchingInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        chain_is_linked(state.board())
    }

    fn description() -> &'static str {
        "Adjacent board tiles touch on equal values"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dominoes::Tile;

    fn with_board(board: Vec<Tile>) -> GameSnapshot {
        let initial = board.clone();
        GameSnapshot::new(board, [Vec::new(), Vec::new()], Vec::new(), Vec::new(), initial)
    }

    #[test]
    fn test_short_boards_hold() {
        assert!(ChainMatchingInvariant::holds(&with_board(Vec::new())));
        assert!(ChainMatchingInvariant::holds(&with_board(vec![Tile::new(2, 6)])));
    }

    #[test]
    fn test_linked_chain_holds() {
        let board = vec![Tile::new(1, 6), Tile::new(6, 3), Tile::new(3, 3), Tile::new(3, 0)];
        assert!(ChainMatchingInvariant::holds(&with_board(board)));
    }

    #[test]
    fn test_unflipped_tile_violates() {
        let board = vec![Tile::new(3, 5), Tile::new(2, 5)];
        assert!(!ChainMatchingInvariant::holds(&with_board(board)));
    }
}
