//! Strictly Dominoes - Unified CLI
//!
//! Play a game on the console or simulate computer-vs-computer games.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_dominoes::{
    ConsoleDisplay, Deal, GameConfig, GameReport, Outcome, PlayerKind, Seat, Seeds, SimpleAi,
    TurnCoordinator,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            shuffle_seed,
            first_seed,
            hand_size,
            player_one,
            player_two,
        } => {
            run_play(
                config,
                shuffle_seed,
                first_seed,
                hand_size,
                player_one,
                player_two,
            )
            .await
        }
        Command::Simulate {
            games,
            seed,
            hand_size,
            json,
        } => run_simulate(games, seed, hand_size, json).await,
    }
}

/// Logs go to stderr so they never interleave with the table on stdout.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Play one game on the console
#[instrument(skip_all)]
async fn run_play(
    config: PathBuf,
    shuffle_seed: Option<u64>,
    first_seed: Option<u64>,
    hand_size: Option<usize>,
    player_one: Option<PlayerKind>,
    player_two: Option<PlayerKind>,
) -> Result<()> {
    let config = GameConfig::load_or_default(&config)?
        .with_shuffle_seed(shuffle_seed)
        .with_first_player_seed(first_seed)
        .with_hand_size(hand_size)
        .with_kinds(player_one, player_two);

    let deal = config.deal()?;
    if let Some(seeds) = deal.seeds() {
        info!(
            shuffle_seed = seeds.shuffle,
            first_player_seed = seeds.first_player,
            "Starting game"
        );
    }

    let [seat_one, seat_two] = config.decision_sources();
    let report = TurnCoordinator::new(deal, seat_one, seat_two)
        .with_sink(ConsoleDisplay::new())
        .run()
        .await?;

    info!(outcome = %report.outcome(), turns = report.turns().len(), "Game finished");
    Ok(())
}

/// Play computer-vs-computer games and print a tally
#[instrument]
async fn run_simulate(games: u64, seed: u64, hand_size: usize, json: bool) -> Result<()> {
    let mut tally = Tally::default();
    let mut reports = Vec::new();

    for game in 0..games {
        let game_seed = seed.wrapping_add(game);
        let seeds = Seeds::resolve(Some(game_seed), Some(game_seed));
        let deal = Deal::shuffled(seeds, hand_size, true)?;
        let report = TurnCoordinator::new(
            deal,
            Box::new(SimpleAi::new("Player 1")),
            Box::new(SimpleAi::new("Player 2")),
        )
        .run()
        .await?;

        tally.record(&report);
        if json {
            reports.push(report);
        } else {
            println!(
                "Game {} (seed {}): {} after {} turns",
                game + 1,
                game_seed,
                report.outcome(),
                report.turns().len()
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!();
        println!("Games played: {}", games);
        println!("Player 1 wins: {}", tally.seat_one);
        println!("Player 2 wins: {}", tally.seat_two);
        println!("Stalemates: {}", tally.stalemates);
        if games > 0 {
            println!(
                "Average turns per game: {:.1}",
                tally.turns as f64 / games as f64
            );
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Tally {
    seat_one: u64,
    seat_two: u64,
    stalemates: u64,
    turns: u64,
}

impl Tally {
    fn record(&mut self, report: &GameReport) {
        match report.outcome() {
            Outcome::Winner(Seat::One) => self.seat_one += 1,
            Outcome::Winner(Seat::Two) => self.seat_two += 1,
            Outcome::Stalemate => self.stalemates += 1,
        }
        self.turns += report.turns().len() as u64;
    }
}
