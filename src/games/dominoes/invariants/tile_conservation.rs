//! Tile conservation invariant: no tile is lost or duplicated.

use super::super::{GameSnapshot, Tile};
use super::Invariant;

/// Invariant: board, hands and pool together hold exactly the initial tiles.
///
/// Orientation is ignored; each tile appears in exactly one location.
pub struct TileConservationInvariant;

impl Invariant<GameSnapshot> for TileConservationInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        let mut current: Vec<Tile> = state
            .board()
            .iter()
            .chain(state.hands().iter().flatten())
            .chain(state.pool().iter())
            .map(|tile| tile.canonical())
            .collect();
        let mut initial: Vec<Tile> = state.initial().iter().map(|tile| tile.canonical()).collect();

        current.sort_unstable();
        initial.sort_unstable();
        let unique = initial.windows(2).all(|pair| pair[0] != pair[1]);

        unique && current == initial
    }

    fn description() -> &'static str {
        "Board, hands and pool hold every initial tile exactly once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dominoes::double_six;

    fn split(tiles: Vec<Tile>) -> GameSnapshot {
        let initial = double_six();
        let (board, rest) = tiles.split_at(1);
        let (one, rest) = rest.split_at(10);
        let (two, pool) = rest.split_at(10);
        GameSnapshot::new(
            board.to_vec(),
            [one.to_vec(), two.to_vec()],
            pool.to_vec(),
            Vec::new(),
            initial,
        )
    }

    #[test]
    fn test_full_set_split_holds() {
        let state = split(double_six());
        assert_eq!(state.tile_count(), 28);
        assert!(TileConservationInvariant::holds(&state));
    }

    #[test]
    fn test_orientation_is_ignored() {
        let mut tiles = double_six();
        tiles[0] = tiles[0].flipped();
        tiles[5] = tiles[5].flipped();
        assert!(TileConservationInvariant::holds(&split(tiles)));
    }

    #[test]
    fn test_duplicate_violates() {
        let mut tiles = double_six();
        tiles[27] = tiles[3];
        assert!(!TileConservationInvariant::holds(&split(tiles)));
    }

    #[test]
    fn test_lost_tile_violates() {
        let mut state = split(double_six());
        let initial = state.initial().clone();
        state = GameSnapshot::new(
            state.board().clone(),
            state.hands().clone(),
            state.pool()[1..].to_vec(),
            Vec::new(),
            initial,
        );
        assert!(!TileConservationInvariant::holds(&state));
    }
}
