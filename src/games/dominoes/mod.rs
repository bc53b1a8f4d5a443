//! Two-player double-six dominoes.

mod action;
mod agent;
mod board;
mod coordinator;
mod deal;
mod error;
mod events;
mod hand;
mod phases;
mod pool;
mod snapshot;
mod types;

pub mod invariants;

pub use action::{MoveError, Selection, TurnOutcome};
pub use agent::{DecisionSource, ParticipantAgent, TurnView};
pub use board::{Board, chain_is_linked, display_chain};
pub use coordinator::{GameReport, TurnCoordinator};
pub use deal::{DEFAULT_HAND_SIZE, Deal, Seeds, choose_first};
pub use error::{GameError, GameErrorKind};
pub use events::{DisplaySink, GameEvent};
pub use hand::Hand;
pub use phases::{GameState, Outcome};
pub use pool::{TilePool, shuffle};
pub use snapshot::{GameSnapshot, TurnRecord};
pub use types::{End, Ends, FULL_SET_SIZE, PIP_VALUES, SEATS, Seat, Tile, double_six};
