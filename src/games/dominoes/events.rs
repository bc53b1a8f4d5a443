//! Events exposed to display sinks.

use super::{Outcome, Seat, Tile, TurnOutcome};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Messages sent from the coordinator to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Tiles are dealt and the first seat is chosen.
    GameStarted {
        /// Participant names indexed by seat.
        names: [String; 2],
        /// Seat that acts first.
        first: Seat,
        /// Board after setup.
        board: Vec<Tile>,
        /// Tiles left to draw.
        pool_size: usize,
    },
    /// A seat has been granted the token.
    TurnStarted {
        /// One-based turn number.
        turn: usize,
        /// Seat holding the token.
        seat: Seat,
        /// Name of the participant in that seat.
        name: String,
    },
    /// A seat finished its turn.
    TurnTaken {
        /// One-based turn number.
        turn: usize,
        /// Seat that acted.
        seat: Seat,
        /// Name of the participant in that seat.
        name: String,
        /// What the turn amounted to.
        outcome: TurnOutcome,
        /// Board after the turn, head first.
        board: Vec<Tile>,
        /// Tiles left in the acting seat's hand.
        hand_size: usize,
        /// Tiles left to draw.
        pool_size: usize,
    },
    /// The game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
        /// Participant names indexed by seat.
        names: [String; 2],
        /// Final board, head first.
        board: Vec<Tile>,
        /// Final hands indexed by seat.
        hands: [Vec<Tile>; 2],
    },
}

/// Receives game events as they happen.
///
/// Called synchronously by the coordinator between turns, so output from a
/// sink never interleaves with a participant's prompt.
pub trait DisplaySink: Send {
    /// Handles one event.
    fn show(&mut self, event: &GameEvent);
}

impl DisplaySink for mpsc::UnboundedSender<GameEvent> {
    fn show(&mut self, event: &GameEvent) {
        if self.send(event.clone()).is_err() {
            warn!("Event receiver dropped");
        }
    }
}
