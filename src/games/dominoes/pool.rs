//! The shared supply of undrawn tiles.

use super::Tile;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

/// Undrawn tiles, drawn front first.
///
/// Each draw is an atomic pop under the pool's own lock, independent of the
/// board's lock.
#[derive(Debug, Default)]
pub struct TilePool {
    tiles: Mutex<VecDeque<Tile>>,
}

impl TilePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pool contents.
    ///
    /// Takes `&mut self`: once the pool is shared with participants it can
    /// no longer be refilled.
    #[instrument(skip(self, tiles), fields(count = tiles.len()))]
    pub fn initialize(&mut self, tiles: Vec<Tile>) {
        let slot = self.tiles.get_mut().unwrap_or_else(PoisonError::into_inner);
        *slot = tiles.into();
    }

    /// Removes and returns the next tile, or `None` if the pool is empty.
    pub fn draw(&self) -> Option<Tile> {
        let tile = self
            .tiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        debug!(tile = ?tile, "Draw from pool");
        tile
    }

    /// Number of tiles left.
    pub fn len(&self) -> usize {
        self.tiles.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True if nothing is left to draw.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the remaining tiles in draw order.
    pub fn remaining(&self) -> Vec<Tile> {
        self.tiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}

/// Shuffles tiles with a deterministic generator seeded from `seed`.
#[instrument(skip(tiles))]
pub fn shuffle(mut tiles: Vec<Tile>, seed: u64) -> Vec<Tile> {
    let mut rng = StdRng::seed_from_u64(seed);
    tiles.shuffle(&mut rng);
    tiles
}
