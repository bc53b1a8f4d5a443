//! Properties of a dominoes game that hold between any two turns.
//!
//! The coordinator takes a [`GameSnapshot`](super::GameSnapshot) after each
//! reported turn and checks [`DominoInvariants`] against it in debug builds.
//! A failed check means a turn corrupted the table, and the game stops.

/// A property of a table position.
pub trait Invariant<S> {
    /// Returns true when the position satisfies the property.
    fn holds(state: &S) -> bool;

    /// One line naming the property, used in violation reports.
    fn description() -> &'static str;
}

/// A property that failed after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// What the failed property promises.
    pub description: &'static str,
}

impl InvariantViolation {
    /// Records a failed property.
    pub fn new(description: &'static str) -> Self {
        Self { description }
    }
}

/// Tuples of invariants checked in one pass after a turn.
pub trait InvariantSet<S> {
    /// Reports every failed property, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(checks: &[(bool, &'static str)]) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = checks
        .iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(*description))
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ])
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ])
    }
}

pub mod alternating_turn;
pub mod chain_matching;
pub mod tile_conservation;

pub use alternating_turn::AlternatingTurnInvariant;
pub use chain_matching::ChainMatchingInvariant;
pub use tile_conservation::TileConservationInvariant;

/// Checked by the coordinator after every turn.
pub type DominoInvariants = (
    ChainMatchingInvariant,
    TileConservationInvariant,
    AlternatingTurnInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dominoes::{GameSnapshot, Seat, Tile, TurnOutcome, TurnRecord};

    fn snapshot(board: Vec<Tile>, turns: Vec<TurnRecord>) -> GameSnapshot {
        let hands = [vec![Tile::new(0, 0)], vec![Tile::new(1, 1)]];
        let pool = vec![Tile::new(2, 2)];
        let mut initial = board.clone();
        initial.extend(hands.iter().flatten().copied());
        initial.extend(pool.iter().copied());
        GameSnapshot::new(board, hands, pool, turns, initial)
    }

    #[test]
    fn test_set_holds_for_consistent_snapshot() {
        let turns = vec![
            TurnRecord::new(1, Seat::One, TurnOutcome::Drew),
            TurnRecord::new(2, Seat::Two, TurnOutcome::Played(Tile::new(5, 4))),
        ];
        let state = snapshot(vec![Tile::new(3, 5), Tile::new(5, 4)], turns);
        assert!(DominoInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_set_collects_every_violation() {
        let turns = vec![
            TurnRecord::new(1, Seat::One, TurnOutcome::Drew),
            TurnRecord::new(2, Seat::One, TurnOutcome::Drew),
        ];
        let state = snapshot(vec![Tile::new(3, 5), Tile::new(4, 4)], turns);
        let violations = DominoInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].description, ChainMatchingInvariant::description());
        assert_eq!(violations[1].description, AlternatingTurnInvariant::description());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (ChainMatchingInvariant, TileConservationInvariant);
        let state = snapshot(vec![Tile::new(6, 6)], Vec::new());
        assert!(TwoInvariants::check_all(&state).is_ok());
    }
}
