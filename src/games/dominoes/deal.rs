//! Setup phase: building the pool, dealing hands and choosing who starts.
//!
//! A [`Deal`] is the complete starting position. It is produced either from
//! seeds ([`Deal::shuffled`]) or spelled out explicitly ([`Deal::new`]), and is
//! validated once before the coordinator takes it over.

use super::board::chain_is_linked;
use super::error::{GameError, GameErrorKind};
use super::pool::shuffle;
use super::{FULL_SET_SIZE, Seat, Tile, double_six};
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Tiles dealt to each hand when nothing else is configured.
pub const DEFAULT_HAND_SIZE: usize = 10;

/// Independent seeds for the pool shuffle and the first-seat coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seeds {
    /// Seeds the pool shuffle.
    pub shuffle: u64,
    /// Seeds the choice of the first seat.
    pub first_player: u64,
}

impl Seeds {
    /// Fills any missing seed from OS entropy.
    #[instrument]
    pub fn resolve(shuffle: Option<u64>, first_player: Option<u64>) -> Self {
        let mut entropy = rand::rng();
        let seeds = Self {
            shuffle: shuffle.unwrap_or_else(|| entropy.random()),
            first_player: first_player.unwrap_or_else(|| entropy.random()),
        };
        debug!(?seeds, "Seeds resolved");
        seeds
    }
}

/// Flips a seeded coin for the first seat.
#[instrument]
pub fn choose_first(seed: u64) -> Seat {
    if StdRng::seed_from_u64(seed).random_bool(0.5) {
        Seat::One
    } else {
        Seat::Two
    }
}

/// Complete starting position of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Deal {
    /// Undrawn tiles in draw order.
    pool: Vec<Tile>,
    /// Hands indexed by [`Seat::index`].
    hands: [Vec<Tile>; 2],
    /// Tiles already on the board, head first.
    board: Vec<Tile>,
    /// Seat that receives the token first.
    first: Seat,
    /// Seeds used to produce this deal, if it was shuffled.
    seeds: Option<Seeds>,
}

impl Deal {
    /// Creates an explicit deal after validating it.
    ///
    /// Rejects out-of-range pips, a tile appearing twice (in any
    /// orientation), a board chain that does not link, and an empty hand.
    #[instrument(skip(pool, hands, board))]
    pub fn new(
        pool: Vec<Tile>,
        hands: [Vec<Tile>; 2],
        board: Vec<Tile>,
        first: Seat,
    ) -> Result<Self, GameError> {
        let deal = Self {
            pool,
            hands,
            board,
            first,
            seeds: None,
        };
        deal.validate()?;
        Ok(deal)
    }

    /// Shuffles a double-six set, deals `hand_size` tiles to each seat and
    /// optionally opens the board with the next pool tile.
    ///
    /// Seat one is dealt fully before seat two, both drawing from the front
    /// of the shuffled pool.
    #[instrument]
    pub fn shuffled(
        seeds: Seeds,
        hand_size: usize,
        open_from_pool: bool,
    ) -> Result<Self, GameError> {
        let needed = 2 * hand_size + usize::from(open_from_pool);
        if hand_size == 0 || needed > FULL_SET_SIZE {
            return Err(GameError::new(GameErrorKind::InvalidDeal(format!(
                "hand size {} needs {} tiles from a set of {}",
                hand_size, needed, FULL_SET_SIZE
            ))));
        }

        let mut pool = shuffle(double_six(), seeds.shuffle).into_iter();
        let one: Vec<Tile> = pool.by_ref().take(hand_size).collect();
        let two: Vec<Tile> = pool.by_ref().take(hand_size).collect();
        let board: Vec<Tile> = if open_from_pool {
            pool.by_ref().take(1).collect()
        } else {
            Vec::new()
        };
        let first = choose_first(seeds.first_player);

        let deal = Self {
            pool: pool.collect(),
            hands: [one, two],
            board,
            first,
            seeds: Some(seeds),
        };
        info!(
            %first,
            pool = deal.pool.len(),
            opening = ?deal.board.first(),
            "Tiles dealt"
        );
        Ok(deal)
    }

    /// Every tile in the deal, in canonical form.
    pub fn all_tiles(&self) -> Vec<Tile> {
        self.board
            .iter()
            .chain(self.hands.iter().flatten())
            .chain(self.pool.iter())
            .map(|tile| tile.canonical())
            .collect()
    }

    /// Splits the deal into its parts.
    pub fn into_parts(self) -> (Vec<Tile>, [Vec<Tile>; 2], Vec<Tile>, Seat, Option<Seeds>) {
        (self.pool, self.hands, self.board, self.first, self.seeds)
    }

    #[instrument(skip(self))]
    fn validate(&self) -> Result<(), GameError> {
        let invalid = |message: String| Err(GameError::new(GameErrorKind::InvalidDeal(message)));

        let tiles = self.all_tiles();
        if let Some(tile) = tiles.iter().find(|tile| !tile.in_range()) {
            return invalid(format!("{} is outside the double-six range", tile));
        }

        let mut seen = HashSet::new();
        if let Some(tile) = tiles.iter().find(|tile| !seen.insert(**tile)) {
            return invalid(format!("{} appears more than once", tile));
        }

        if !chain_is_linked(&self.board) {
            return invalid("board tiles do not link".to_string());
        }

        if let Some(seat) = self.hands.iter().position(Vec::is_empty) {
            return invalid(format!("hand {} is empty", seat + 1));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> Seeds {
        Seeds {
            shuffle: 11,
            first_player: 3,
        }
    }

    #[test]
    fn test_shuffled_deal_uses_whole_set() {
        let deal = Deal::shuffled(seeds(), DEFAULT_HAND_SIZE, true).unwrap();
        assert_eq!(deal.hands()[0].len(), 10);
        assert_eq!(deal.hands()[1].len(), 10);
        assert_eq!(deal.board().len(), 1);
        assert_eq!(deal.pool().len(), 7);

        let mut tiles = deal.all_tiles();
        tiles.sort();
        assert_eq!(tiles, double_six());
    }

    #[test]
    fn test_shuffled_deal_is_reproducible() {
        let a = Deal::shuffled(seeds(), 7, false).unwrap();
        let b = Deal::shuffled(seeds(), 7, false).unwrap();
        assert_eq!(a, b);
        assert!(a.board().is_empty());
        assert_eq!(a.seeds(), &Some(seeds()));
    }

    #[test]
    fn test_first_seat_seed_is_independent_of_shuffle() {
        let one = Deal::shuffled(Seeds { shuffle: 1, first_player: 9 }, 5, true).unwrap();
        let two = Deal::shuffled(Seeds { shuffle: 2, first_player: 9 }, 5, true).unwrap();
        assert_eq!(one.first(), two.first());
        assert_ne!(one.pool(), two.pool());
    }

    #[test]
    fn test_both_seats_can_start() {
        let firsts: HashSet<Seat> = (0..64).map(choose_first).collect();
        assert_eq!(firsts.len(), 2);
    }

    #[test]
    fn test_oversized_hands_rejected() {
        assert!(Deal::shuffled(seeds(), 14, true).is_err());
        assert!(Deal::shuffled(seeds(), 14, false).is_ok());
        assert!(Deal::shuffled(seeds(), 0, false).is_err());
    }

    #[test]
    fn test_explicit_deal_rejects_duplicates_in_any_orientation() {
        let result = Deal::new(
            vec![Tile::new(5, 2)],
            [vec![Tile::new(2, 5)], vec![Tile::new(1, 1)]],
            Vec::new(),
            Seat::One,
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            GameErrorKind::InvalidDeal(_)
        ));
    }

    #[test]
    fn test_explicit_deal_rejects_broken_chain() {
        let result = Deal::new(
            Vec::new(),
            [vec![Tile::new(0, 0)], vec![Tile::new(1, 1)]],
            vec![Tile::new(3, 5), Tile::new(2, 5)],
            Seat::One,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_deal_rejects_bad_pips_and_empty_hands() {
        let bad_pip = Deal::new(
            Vec::new(),
            [vec![Tile::new(0, 7)], vec![Tile::new(1, 1)]],
            Vec::new(),
            Seat::One,
        );
        assert!(bad_pip.is_err());
        let empty = Deal::new(
            Vec::new(),
            [Vec::new(), vec![Tile::new(1, 1)]],
            Vec::new(),
            Seat::Two,
        );
        assert!(empty.is_err());
    }
}
