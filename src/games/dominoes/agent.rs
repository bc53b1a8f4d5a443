//! One participant: a hand plus the decision source that plays it.

use super::action::{Selection, TurnOutcome};
use super::board::Board;
use super::error::{GameError, GameErrorKind};
use super::hand::Hand;
use super::pool::TilePool;
use super::{Ends, Seat, Tile};
use anyhow::Result;
use tracing::{debug, info, instrument};

/// What a decision source sees when asked for a move.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    /// Seat being asked.
    pub seat: Seat,
    /// Open ends of the board, `None` if it is empty.
    pub ends: Option<Ends>,
    /// Current hand, in the order selections index into.
    pub hand: &'a [Tile],
}

/// Source of move selections for one participant.
///
/// Only called when the hand holds a playable tile. Implementations must
/// return a selection that passes [`Selection::check`]; a human-backed
/// source re-prompts until it does.
#[async_trait::async_trait]
pub trait DecisionSource: Send {
    /// Chooses a tile and an end.
    async fn select(&mut self, view: TurnView<'_>) -> Result<Selection>;

    /// Returns the participant's display name.
    fn name(&self) -> &str;
}

/// A participant: owns its hand exclusively and plays it through a
/// [`DecisionSource`].
pub struct ParticipantAgent {
    seat: Seat,
    hand: Hand,
    source: Box<dyn DecisionSource>,
}

impl std::fmt::Debug for ParticipantAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticipantAgent")
            .field("seat", &self.seat)
            .field("name", &self.source.name())
            .field("hand", &self.hand)
            .finish()
    }
}

impl ParticipantAgent {
    /// Creates a participant with an empty hand.
    pub fn new(seat: Seat, source: Box<dyn DecisionSource>) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            source,
        }
    }

    /// Adds dealt tiles to the hand during setup.
    pub fn deal(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        for tile in tiles {
            self.hand.push(tile);
        }
    }

    /// Returns the seat.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Returns the participant's name.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Returns the hand.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// True if any tile in hand matches the head or the tail.
    pub fn has_playable_tile(&self, ends: Option<Ends>) -> bool {
        self.hand.has_playable_tile(ends)
    }

    /// Takes one turn: play a tile if possible, otherwise draw one, otherwise
    /// report that no move is available.
    ///
    /// The selection is checked before anything is mutated, and the tile
    /// leaves the hand only after the board has accepted it. On error both
    /// board and hand are unchanged.
    #[instrument(skip_all, fields(seat = %self.seat, name = %self.source.name()))]
    pub async fn take_turn(
        &mut self,
        board: &Board,
        pool: &TilePool,
    ) -> Result<TurnOutcome, GameError> {
        let ends = board.ends();

        if self.hand.has_playable_tile(ends) {
            let view = TurnView {
                seat: self.seat,
                ends,
                hand: self.hand.tiles(),
            };
            let selection = self.source.select(view).await.map_err(|e| {
                GameError::new(GameErrorKind::Decision {
                    seat: self.seat,
                    message: e.to_string(),
                })
            })?;

            let tile = selection.check(self.hand.tiles(), ends)?;
            let ends = board.add_piece(tile, selection.end)?;
            self.hand.take(selection.index);

            info!(%tile, %selection, %ends, remaining = self.hand.len(), "Played");
            return Ok(TurnOutcome::Played(tile));
        }

        match pool.draw() {
            Some(tile) => {
                self.hand.push(tile);
                debug!(%tile, "No playable tile, drew one");
                Ok(TurnOutcome::Drew)
            }
            None => {
                debug!("No playable tile and nothing to draw");
                Ok(TurnOutcome::NoMoveAvailable)
            }
        }
    }
}
