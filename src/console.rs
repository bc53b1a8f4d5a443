//! Plain-text rendering of game events.

use crate::games::dominoes::{DisplaySink, GameEvent, Outcome, TurnOutcome, display_chain};
use tracing::instrument;

/// Prints the table to stdout as the game unfolds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    /// Creates a console display.
    pub fn new() -> Self {
        Self
    }

    /// Renders one event as text, or `None` for events with nothing to show.
    #[instrument(skip_all)]
    pub fn render(event: &GameEvent) -> Option<String> {
        match event {
            GameEvent::GameStarted {
                names,
                first,
                board,
                ..
            } => Some(format!(
                "\nDominoes on the table: {}\n{} goes first!",
                display_chain(board),
                names[first.index()]
            )),
            GameEvent::TurnStarted { .. } => None,
            GameEvent::TurnTaken {
                name,
                outcome,
                board,
                ..
            } => {
                let action = match outcome {
                    TurnOutcome::Played(tile) => format!("{} played {}.", name, tile),
                    TurnOutcome::Drew => format!("{} cannot play. Drawing a piece...", name),
                    TurnOutcome::NoMoveAvailable => format!(
                        "{} cannot play and no pieces are available to draw.",
                        name
                    ),
                };
                Some(format!(
                    "{}\n\nDominoes on the table: {}",
                    action,
                    display_chain(board)
                ))
            }
            GameEvent::GameOver {
                outcome,
                names,
                board,
                hands,
            } => Some(match outcome {
                Outcome::Winner(seat) => format!(
                    "\nThe winner is {}!\nThe loser's hand: {}\nDominoes on the table: {}",
                    names[seat.index()],
                    display_chain(&hands[seat.opponent().index()]),
                    display_chain(board)
                ),
                Outcome::Stalemate => format!(
                    "\nStalemate! No more moves can be made by either player.\n\
                     Dominoes on the table: {}",
                    display_chain(board)
                ),
            }),
        }
    }
}

impl DisplaySink for ConsoleDisplay {
    fn show(&mut self, event: &GameEvent) {
        if let Some(text) = Self::render(event) {
            println!("{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dominoes::{Seat, Tile};

    fn names() -> [String; 2] {
        ["Player 1".to_string(), "Player 2".to_string()]
    }

    #[test]
    fn test_turn_shows_board() {
        let text = ConsoleDisplay::render(&GameEvent::TurnTaken {
            turn: 3,
            seat: Seat::One,
            name: "Player 1".to_string(),
            outcome: TurnOutcome::Played(Tile::new(5, 2)),
            board: vec![Tile::new(3, 5), Tile::new(5, 2)],
            hand_size: 4,
            pool_size: 2,
        })
        .unwrap();
        assert!(text.starts_with("Player 1 played [5|2]."));
        assert!(text.ends_with("Dominoes on the table: [3|5] [5|2]"));
    }

    #[test]
    fn test_win_shows_loser_hand() {
        let text = ConsoleDisplay::render(&GameEvent::GameOver {
            outcome: Outcome::Winner(Seat::Two),
            names: names(),
            board: vec![Tile::new(1, 1)],
            hands: [vec![Tile::new(0, 6), Tile::new(4, 4)], Vec::new()],
        })
        .unwrap();
        assert!(text.contains("The winner is Player 2!"));
        assert!(text.contains("The loser's hand: [0|6] [4|4]"));
    }

    #[test]
    fn test_turn_started_is_silent() {
        let event = GameEvent::TurnStarted {
            turn: 1,
            seat: Seat::One,
            name: "Player 1".to_string(),
        };
        assert_eq!(ConsoleDisplay::render(&event), None);
    }
}
