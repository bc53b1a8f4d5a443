//! First-class action types for dominoes.
//!
//! A [`Selection`] is a participant's intent (which tile, which end). It is
//! validated against the hand and the open ends before anything is mutated.

use super::{End, Ends, Tile};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move choice: an index into the current hand and a target end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Selection {
    /// Zero-based index into the hand.
    pub index: usize,
    /// End of the chain the tile goes to.
    pub end: End,
}

impl Selection {
    /// Checks the selection against a hand and the current ends.
    ///
    /// Returns the selected tile on success. With an empty board every tile
    /// is accepted and the end is ignored.
    #[instrument(skip(hand))]
    pub fn check(&self, hand: &[Tile], ends: Option<Ends>) -> Result<Tile, MoveError> {
        let tile = *hand.get(self.index).ok_or(MoveError::IndexOutOfRange {
            index: self.index,
            len: hand.len(),
        })?;
        match ends {
            Some(ends) if !ends.accepts(&tile, self.end) => Err(MoveError::EndMismatch {
                tile,
                end: self.end,
                open: ends.at(self.end),
            }),
            _ => Ok(tile),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} -> {}", self.index + 1, self.end)
    }
}

/// What a participant's turn amounted to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum TurnOutcome {
    /// A tile was placed on the board.
    Played(Tile),
    /// No playable tile; one tile was drawn from the pool.
    Drew,
    /// No playable tile and the pool is empty.
    NoMoveAvailable,
}

impl TurnOutcome {
    /// True for [`TurnOutcome::Played`].
    pub fn is_played(&self) -> bool {
        matches!(self, TurnOutcome::Played(_))
    }

    /// True for [`TurnOutcome::NoMoveAvailable`].
    pub fn is_no_move(&self) -> bool {
        matches!(self, TurnOutcome::NoMoveAvailable)
    }
}

/// Error raised when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The selected index is outside the hand.
    #[display("Selection {} is out of range for a hand of {}", index + 1, len)]
    IndexOutOfRange {
        /// Zero-based index that was selected.
        index: usize,
        /// Hand size at the time of selection.
        len: usize,
    },

    /// The selected tile does not carry the value open at the chosen end.
    #[display("{} does not match the {} value {}", tile, end, open)]
    EndMismatch {
        /// Tile that was selected.
        tile: Tile,
        /// End that was targeted.
        end: End,
        /// Value currently open at that end.
        open: u8,
    },

    /// The board refused a tile that matches neither required value.
    #[display("Illegal move: {} cannot attach to {} value {}", tile, end, open)]
    IllegalMove {
        /// Tile that was offered.
        tile: Tile,
        /// End that was targeted.
        end: End,
        /// Value currently open at that end.
        open: u8,
    },
}

impl MoveError {
    /// True for selection errors a decision source recovers from by asking again.
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            MoveError::IndexOutOfRange { .. } | MoveError::EndMismatch { .. }
        )
    }
}
