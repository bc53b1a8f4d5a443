//! The shared chain of played tiles.

use super::action::MoveError;
use super::{End, Ends, Tile};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

/// Ordered chain of oriented tiles with two open ends.
///
/// Every read and write goes through one exclusive lock, so `ends` never
/// observes a partially placed tile. Adjacent tiles always touch on equal
/// values.
#[derive(Debug, Default)]
pub struct Board {
    chain: Mutex<VecDeque<Tile>>,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    // Placement validates before it writes, so a poisoned chain is still consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Tile>> {
        self.chain.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the open values, or `None` for an empty board.
    pub fn ends(&self) -> Option<Ends> {
        ends_of(&self.lock())
    }

    /// Places a tile at one end of the chain and returns the new ends.
    ///
    /// The first tile is accepted as listed. Afterwards the tile is oriented
    /// so its matching value touches the chain; a tile matching neither the
    /// head nor the tail as required yields [`MoveError::IllegalMove`] and
    /// leaves the chain untouched.
    #[instrument(skip(self), fields(%tile, %end))]
    pub fn add_piece(&self, tile: Tile, end: End) -> Result<Ends, MoveError> {
        let mut chain = self.lock();
        let Some(current) = ends_of(&chain) else {
            chain.push_back(tile);
            debug!("Opening tile placed");
            return Ok(Ends {
                head: tile.first(),
                tail: tile.second(),
            });
        };

        let open = current.at(end);
        let placed = match end {
            End::Tail if tile.first() == open => tile,
            End::Tail if tile.second() == open => tile.flipped(),
            End::Head if tile.second() == open => tile,
            End::Head if tile.first() == open => tile.flipped(),
            _ => return Err(MoveError::IllegalMove { tile, end, open }),
        };

        match end {
            End::Tail => chain.push_back(placed),
            End::Head => chain.push_front(placed),
        }
        let ends = ends_of(&chain).unwrap_or(current);
        debug!(%placed, %ends, "Tile placed");
        Ok(ends)
    }

    /// Returns the chain in order, head first.
    pub fn tiles(&self) -> Vec<Tile> {
        self.lock().iter().copied().collect()
    }

    /// Number of tiles on the board.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no tile has been placed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Formats the chain as a single line, e.g. `[3|5] [5|2]`.
    pub fn display(&self) -> String {
        display_chain(&self.tiles())
    }
}

fn ends_of(chain: &VecDeque<Tile>) -> Option<Ends> {
    Some(Ends {
        head: chain.front()?.first(),
        tail: chain.back()?.second(),
    })
}

/// True if every adjacent pair touches on equal values.
pub fn chain_is_linked(tiles: &[Tile]) -> bool {
    tiles
        .windows(2)
        .all(|pair| pair[0].second() == pair[1].first())
}

/// Formats a chain of tiles separated by spaces.
pub fn display_chain(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(Tile::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
