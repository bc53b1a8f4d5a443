//! Game lifecycle: `Setup → InProgress(seat) → Finished(outcome)`.

use super::Seat;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The seat emptied its hand.
    Winner(Seat),
    /// Neither seat could move and the pool was exhausted.
    Stalemate,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Winner(seat) => Some(*seat),
            Outcome::Stalemate => None,
        }
    }

    /// Returns true if the game ended without a winner.
    pub fn is_stalemate(&self) -> bool {
        matches!(self, Outcome::Stalemate)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(seat) => write!(f, "Seat {} wins", seat),
            Outcome::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Authoritative game state, written only by the turn coordinator.
///
/// Transitions only move forward; `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameState {
    /// Tiles are being dealt; nobody holds the token.
    #[default]
    Setup,
    /// The given seat holds the turn token.
    InProgress(Seat),
    /// The game is over.
    Finished(Outcome),
}

impl GameState {
    /// True once an outcome has been decided.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameState::Finished(_))
    }

    /// Returns the seat holding the token, if any.
    pub fn active(&self) -> Option<Seat> {
        match self {
            GameState::InProgress(seat) => Some(*seat),
            _ => None,
        }
    }

    /// True if moving from `self` to `next` is a legal forward transition.
    pub fn can_advance_to(&self, next: &GameState) -> bool {
        match (self, next) {
            (GameState::Setup, GameState::InProgress(_)) => true,
            (GameState::InProgress(current), GameState::InProgress(seat)) => {
                *seat == current.opponent()
            }
            (GameState::InProgress(_), GameState::Finished(_)) => true,
            _ => false,
        }
    }
}
