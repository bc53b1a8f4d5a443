//! Strictly Dominoes library - two-player double-six dominoes
//!
//! Each participant runs on its own task and only acts while holding the
//! turn token handed out by the coordinator.
//!
//! # Architecture
//!
//! - **Game**: Tiles, board, pool, and the turn coordinator
//! - **Players**: Console human and a simple computer opponent
//! - **Console**: Plain-text rendering of game events
//! - **Config**: TOML game configuration
//!
//! # Example
//!
//! ```no_run
//! use strictly_dominoes::{ConsoleDisplay, Deal, Seeds, SimpleAi, TurnCoordinator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let deal = Deal::shuffled(Seeds::resolve(Some(7), Some(7)), 10, true)?;
//! let report = TurnCoordinator::new(
//!     deal,
//!     Box::new(SimpleAi::new("Ethan")),
//!     Box::new(SimpleAi::new("Tristan")),
//! )
//! .with_sink(ConsoleDisplay::new())
//! .run()
//! .await?;
//! println!("{:?}", report.outcome());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod console;
mod game_config;
mod games;
mod players;

// Crate-level exports - Game configuration
pub use game_config::{ConfigError, ConfigErrorKind, GameConfig, PlayerConfig, PlayerKind};

// Crate-level exports - Console rendering
pub use console::ConsoleDisplay;

// Crate-level exports - Players
pub use players::{ConsoleInput, HumanPlayer, SimpleAi};

// Crate-level exports - Game types (dominoes)
pub use games::dominoes::{
    Board, DEFAULT_HAND_SIZE, Deal, DecisionSource, DisplaySink, End, Ends, FULL_SET_SIZE,
    GameError, GameErrorKind, GameEvent, GameReport, GameSnapshot, GameState, Hand, MoveError,
    Outcome, PIP_VALUES, ParticipantAgent, SEATS, Seat, Seeds, Selection, Tile, TilePool,
    TurnCoordinator, TurnOutcome, TurnRecord, TurnView, chain_is_linked, choose_first,
    display_chain, double_six, shuffle,
};

// Crate-level exports - Invariants
pub use games::dominoes::invariants;
