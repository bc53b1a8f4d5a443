//! Game-level error types.

use super::action::MoveError;
use super::{GameState, Seat};
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong during a game.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// The board or agent refused a move that should have been validated.
    #[display("{}", _0)]
    Move(MoveError),

    /// A seat was asked to act while it did not hold the token.
    #[display("Seat {} acted out of turn while state was {:?}", seat, state)]
    TurnOutOfOrder {
        /// Seat that was asked to act.
        seat: Seat,
        /// State published at the time.
        state: GameState,
    },

    /// The decision source failed to produce a selection.
    #[display("Decision source for seat {} failed: {}", seat, message)]
    Decision {
        /// Seat whose source failed.
        seat: Seat,
        /// Underlying failure.
        message: String,
    },

    /// A participant task stopped answering.
    #[display("Participant in seat {} is no longer available", _0)]
    ParticipantUnavailable(Seat),

    /// A game invariant was violated after a turn.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// The initial deal is not a valid game position.
    #[display("Invalid deal: {}", _0)]
    InvalidDeal(String),
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<MoveError> for GameErrorKind {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<MoveError> for GameError {
    #[track_caller]
    fn from(err: MoveError) -> Self {
        Self::new(GameErrorKind::Move(err))
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}
