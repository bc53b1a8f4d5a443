//! Decision sources: who picks the tile each turn.

mod human;
mod simple_ai;

pub use human::{ConsoleInput, HumanPlayer};
pub use simple_ai::SimpleAi;
