//! Command-line interface for strictly_dominoes.

use clap::{Parser, Subcommand};
use strictly_dominoes::PlayerKind;

/// Strictly Dominoes - two-player double-six dominoes
#[derive(Parser, Debug)]
#[command(name = "strictly_dominoes")]
#[command(about = "Two-player double-six dominoes on the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game on the console
    Play {
        /// Path to the game config file
        #[arg(short, long, default_value = "dominoes.toml")]
        config: std::path::PathBuf,

        /// Seed for the pool shuffle
        #[arg(long)]
        shuffle_seed: Option<u64>,

        /// Seed for choosing who goes first
        #[arg(long)]
        first_seed: Option<u64>,

        /// Tiles dealt to each hand
        #[arg(long)]
        hand_size: Option<usize>,

        /// Decision source for seat one
        #[arg(long, value_enum)]
        player_one: Option<PlayerKind>,

        /// Decision source for seat two
        #[arg(long, value_enum)]
        player_two: Option<PlayerKind>,
    },

    /// Run computer-vs-computer games and tally the outcomes
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Base seed; game `i` uses `seed + i` for both the shuffle and the first seat
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Tiles dealt to each hand
        #[arg(long, default_value = "10")]
        hand_size: usize,

        /// Print every game report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}
