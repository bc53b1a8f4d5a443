//! A participant's private tiles.

use super::{Ends, Tile};
use serde::{Deserialize, Serialize};

/// Ordered tiles owned by exactly one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    /// Creates an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tile to the end of the hand.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Removes the tile at `index`, keeping the order of the rest.
    pub fn take(&mut self, index: usize) -> Option<Tile> {
        (index < self.tiles.len()).then(|| self.tiles.remove(index))
    }

    /// True if any tile carries the head or tail value.
    ///
    /// Against an empty board every tile is playable.
    pub fn has_playable_tile(&self, ends: Option<Ends>) -> bool {
        match ends {
            Some(ends) => self.tiles.iter().any(|tile| ends.accepts_any(tile)),
            None => !self.tiles.is_empty(),
        }
    }

    /// Returns the tiles in hand order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles held.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True once every tile has been played.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Formats the hand as a 1-based numbered list, one tile per line.
    pub fn display(&self) -> String {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| format!("{}: {}", i + 1, tile))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Tile>> for Hand {
    fn from(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playable_against_either_end() {
        let hand = Hand::from(vec![Tile::new(1, 4), Tile::new(6, 6)]);
        assert!(hand.has_playable_tile(Some(Ends { head: 4, tail: 0 })));
        assert!(hand.has_playable_tile(Some(Ends { head: 0, tail: 6 })));
        assert!(!hand.has_playable_tile(Some(Ends { head: 2, tail: 3 })));
    }

    #[test]
    fn test_empty_board_needs_any_tile() {
        assert!(Hand::from(vec![Tile::new(2, 2)]).has_playable_tile(None));
        assert!(!Hand::new().has_playable_tile(None));
    }

    #[test]
    fn test_take_keeps_order() {
        let mut hand = Hand::from(vec![Tile::new(0, 1), Tile::new(0, 2), Tile::new(0, 3)]);
        assert_eq!(hand.take(1), Some(Tile::new(0, 2)));
        assert_eq!(hand.tiles(), &[Tile::new(0, 1), Tile::new(0, 3)]);
        assert_eq!(hand.take(5), None);
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn test_display_is_numbered_from_one() {
        let hand = Hand::from(vec![Tile::new(1, 1), Tile::new(2, 3)]);
        assert_eq!(hand.display(), "1: [1|1]\n2: [2|3]");
    }
}
