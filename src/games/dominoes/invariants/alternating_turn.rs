//! Alternating turn invariant: no seat acts twice in a row.

use super::super::GameSnapshot;
use super::Invariant;

/// Invariant: seats alternate and turns are numbered consecutively from one.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSnapshot> for AlternatingTurnInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        let turns = state.turns();

        let numbered = turns
            .iter()
            .enumerate()
            .all(|(i, record)| record.turn == i + 1);

        let alternating = turns
            .windows(2)
            .all(|pair| pair[1].seat == pair[0].seat.opponent());

        numbered && alternating
    }

    fn description() -> &'static str {
        "Seats alternate turns (one, two, one, ... or two, one, two, ...)"
    }
}
