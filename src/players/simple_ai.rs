//! Simple computer player.

use crate::games::dominoes::{DecisionSource, End, Selection, TurnView};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, instrument};

/// Plays the heaviest tile that fits, trying the tail before the head.
///
/// Dumping high tiles first keeps the pip count of the hand low.
pub struct SimpleAi {
    name: String,
    think_time: Duration,
}

impl SimpleAi {
    /// Creates a new simple AI that answers immediately.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            think_time: Duration::ZERO,
        }
    }

    /// Pauses this long before each move, so a human can follow along.
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }
}

#[async_trait::async_trait]
impl DecisionSource for SimpleAi {
    #[instrument(skip_all, fields(ai = %self.name))]
    async fn select(&mut self, view: TurnView<'_>) -> Result<Selection> {
        if !self.think_time.is_zero() {
            tokio::time::sleep(self.think_time).await;
        }

        let selection = view
            .hand
            .iter()
            .enumerate()
            .flat_map(|(index, tile)| {
                [End::Tail, End::Head].map(|end| (tile.pips(), Selection::new(index, end)))
            })
            .filter(|(_, selection)| selection.check(view.hand, view.ends).is_ok())
            // max_by_key keeps the last maximum; reverse so ties go to the earliest candidate
            .rev()
            .max_by_key(|(pips, _)| *pips)
            .map(|(_, selection)| selection);

        match selection {
            Some(selection) => {
                debug!(%selection, "AI chose tile");
                Ok(selection)
            }
            None => anyhow::bail!("No valid moves available"),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dominoes::{Ends, Seat, Tile};

    fn view(hand: &[Tile], ends: Option<Ends>) -> TurnView<'_> {
        TurnView {
            seat: Seat::Two,
            ends,
            hand,
        }
    }

    #[tokio::test]
    async fn test_prefers_heaviest_playable_tile() {
        let hand = [Tile::new(1, 3), Tile::new(6, 6), Tile::new(3, 6)];
        let mut ai = SimpleAi::new("AI");
        let selection = ai
            .select(view(&hand, Some(Ends { head: 3, tail: 1 })))
            .await
            .unwrap();
        assert_eq!(selection, Selection::new(2, End::Head));
    }

    #[tokio::test]
    async fn test_ties_go_to_tail_then_earliest() {
        let hand = [Tile::new(2, 4), Tile::new(1, 5)];
        let mut ai = SimpleAi::new("AI");
        let selection = ai
            .select(view(&hand, Some(Ends { head: 2, tail: 2 })))
            .await
            .unwrap();
        assert_eq!(selection, Selection::new(0, End::Tail));
    }

    #[tokio::test]
    async fn test_empty_board_plays_heaviest() {
        let hand = [Tile::new(0, 1), Tile::new(5, 6)];
        let mut ai = SimpleAi::new("AI");
        let selection = ai.select(view(&hand, None)).await.unwrap();
        assert_eq!(selection.index, 1);
    }

    #[tokio::test]
    async fn test_no_playable_tile_is_an_error() {
        let hand = [Tile::new(0, 1)];
        let mut ai = SimpleAi::new("AI");
        assert!(ai.select(view(&hand, Some(Ends { head: 4, tail: 4 }))).await.is_err());
    }
}
