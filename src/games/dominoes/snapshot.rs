//! Point-in-time views of a game for checking and reporting.

use super::action::TurnOutcome;
use super::{Seat, Tile};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One completed turn in the game log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct TurnRecord {
    /// One-based turn number.
    pub turn: usize,
    /// Seat that acted.
    pub seat: Seat,
    /// What the turn amounted to.
    pub outcome: TurnOutcome,
}

/// Every tile location plus the turn log, observed between turns.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameSnapshot {
    /// Board chain, head first.
    board: Vec<Tile>,
    /// Hands indexed by [`Seat::index`].
    hands: [Vec<Tile>; 2],
    /// Undrawn tiles in draw order.
    pool: Vec<Tile>,
    /// Turns taken so far.
    turns: Vec<TurnRecord>,
    /// Every tile the game started with.
    initial: Vec<Tile>,
}

impl GameSnapshot {
    /// Returns the hand held by `seat`.
    pub fn hand(&self, seat: Seat) -> &[Tile] {
        &self.hands[seat.index()]
    }

    /// Total number of tiles across board, hands and pool.
    pub fn tile_count(&self) -> usize {
        self.board.len() + self.pool.len() + self.hands.iter().map(Vec::len).sum::<usize>()
    }
}
