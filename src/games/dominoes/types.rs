//! Core domain types for double-six dominoes.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// Number of distinct pip values (0 through 6).
pub const PIP_VALUES: u8 = 7;

/// Number of tiles in a double-six set.
pub const FULL_SET_SIZE: usize = 28;

/// Number of seats at the table.
pub const SEATS: usize = 2;

/// A domino tile: two pip values in a listed order.
///
/// The listed order is the tile's orientation. Tiles drawn from a fresh set
/// are canonical (`first <= second`); a tile on the board is oriented so that
/// `first` faces the head and `second` faces the tail.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("[{}|{}]", first, second)]
pub struct Tile {
    first: u8,
    second: u8,
}

impl Tile {
    /// Creates a tile with the values in the given order.
    pub const fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Returns the value facing the head of the chain.
    pub fn first(&self) -> u8 {
        self.first
    }

    /// Returns the value facing the tail of the chain.
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Returns the same tile with its values swapped.
    pub fn flipped(self) -> Self {
        Self::new(self.second, self.first)
    }

    /// Returns the orientation-free form, smaller value first.
    pub fn canonical(self) -> Self {
        if self.first <= self.second {
            self
        } else {
            self.flipped()
        }
    }

    /// True if either value equals `pip`.
    pub fn contains(&self, pip: u8) -> bool {
        self.first == pip || self.second == pip
    }

    /// True if both values are equal.
    pub fn is_double(&self) -> bool {
        self.first == self.second
    }

    /// Sum of both values.
    pub fn pips(&self) -> u8 {
        self.first + self.second
    }

    /// True if both values are in the double-six range.
    pub fn in_range(&self) -> bool {
        self.first < PIP_VALUES && self.second < PIP_VALUES
    }
}

/// Builds the full double-six set in canonical form, ordered by value.
#[instrument]
pub fn double_six() -> Vec<Tile> {
    (0..PIP_VALUES)
        .flat_map(|i| (i..PIP_VALUES).map(move |j| Tile::new(i, j)))
        .collect()
}

/// One of the two open ends of the chain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    strum::Display,
)]
pub enum End {
    /// The front of the chain.
    #[strum(to_string = "head")]
    Head,
    /// The back of the chain.
    #[strum(to_string = "tail")]
    Tail,
}

/// The exposed values at both extremes of a non-empty chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("({}, {})", head, tail)]
pub struct Ends {
    /// Outward value of the first tile.
    pub head: u8,
    /// Outward value of the last tile.
    pub tail: u8,
}

impl Ends {
    /// Returns the value exposed at `end`.
    pub fn at(&self, end: End) -> u8 {
        match end {
            End::Head => self.head,
            End::Tail => self.tail,
        }
    }

    /// True if `tile` can be attached at `end`.
    pub fn accepts(&self, tile: &Tile, end: End) -> bool {
        tile.contains(self.at(end))
    }

    /// True if `tile` can be attached at either end.
    pub fn accepts_any(&self, tile: &Tile) -> bool {
        End::iter().any(|end| self.accepts(tile, end))
    }
}

/// A seat at the table, identifying one participant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    strum::Display,
)]
pub enum Seat {
    /// First seat.
    #[strum(to_string = "one")]
    One,
    /// Second seat.
    #[strum(to_string = "two")]
    Two,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Position of the seat in per-seat arrays.
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_double_six_has_every_pair_once() {
        let set = double_six();
        assert_eq!(set.len(), FULL_SET_SIZE);
        let unique: HashSet<_> = set.iter().copied().collect();
        assert_eq!(unique.len(), FULL_SET_SIZE);
        assert!(set.iter().all(|t| t.first() <= t.second() && t.in_range()));
    }

    #[test]
    fn test_canonical_ignores_orientation() {
        assert_eq!(Tile::new(5, 2).canonical(), Tile::new(2, 5));
        assert_eq!(Tile::new(2, 5).canonical(), Tile::new(2, 5));
        assert_eq!(Tile::new(4, 4).flipped(), Tile::new(4, 4));
    }

    #[test]
    fn test_ends_accept_either_value() {
        let ends = Ends { head: 3, tail: 2 };
        assert!(ends.accepts(&Tile::new(6, 3), End::Head));
        assert!(!ends.accepts(&Tile::new(6, 3), End::Tail));
        assert!(ends.accepts_any(&Tile::new(2, 2)));
        assert!(!ends.accepts_any(&Tile::new(4, 6)));
    }

    #[test]
    fn test_seat_opponent_alternates() {
        assert_eq!(Seat::One.opponent(), Seat::Two);
        assert_eq!(Seat::Two.opponent().opponent(), Seat::Two);
        assert_eq!(Seat::iter().count(), SEATS);
    }

    #[test]
    fn test_tile_display() {
        assert_eq!(Tile::new(3, 5).to_string(), "[3|5]");
    }
}
