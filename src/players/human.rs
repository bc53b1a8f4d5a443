//! Human player that answers prompts on the console.

use crate::games::dominoes::{DecisionSource, End, Selection, TurnView};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument, warn};

/// Line input shared by every human at the table.
///
/// Only the seat holding the turn token reads from it, so two humans can
/// share one terminal.
#[derive(Debug, Clone)]
pub struct ConsoleInput {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl ConsoleInput {
    /// Wraps a channel of input lines.
    pub fn new(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }

    /// Forwards standard input line by line from a background thread.
    ///
    /// A blocking stdin read cannot be cancelled, so it runs on a plain
    /// thread that the runtime never waits for on shutdown.
    #[instrument]
    pub fn stdin() -> Self {
        Self::forward(|| std::io::stdin().lines())
    }

    /// Forwards lines from any reader on a background thread.
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self::forward(move || reader.lines())
    }

    /// The stdin lock is not `Send`, so the line iterator is opened on the thread.
    fn forward<I>(open: impl FnOnce() -> I + Send + 'static) -> Self
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let spawned = std::thread::Builder::new()
            .name("console-input".to_string())
            .spawn(move || {
                for line in open() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to read input");
                            break;
                        }
                    }
                }
                debug!("Input closed");
            });
        if let Err(e) = spawned {
            warn!(error = %e, "Failed to start input thread");
        }
        Self::new(rx)
    }

    async fn next_line(&self) -> Result<String> {
        match self.lines.lock().await.recv().await {
            Some(line) => Ok(line.trim().to_string()),
            None => anyhow::bail!("Input channel closed"),
        }
    }
}

/// Human player prompted for a tile number and an end.
pub struct HumanPlayer {
    name: String,
    input: ConsoleInput,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: ConsoleInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        self.input.next_line().await
    }

    async fn ask_end(&self) -> Result<End> {
        loop {
            let answer = self.ask("Play at the head (h) or tail (t)? (h/t): ").await?;
            match answer.to_lowercase().as_str() {
                "h" | "head" => return Ok(End::Head),
                "t" | "tail" => return Ok(End::Tail),
                _ => println!("Please answer h or t."),
            }
        }
    }
}

#[async_trait::async_trait]
impl DecisionSource for HumanPlayer {
    #[instrument(skip_all, fields(player = %self.name))]
    async fn select(&mut self, view: TurnView<'_>) -> Result<Selection> {
        println!("\n{}'s turn. Your hand:", self.name);
        for (i, tile) in view.hand.iter().enumerate() {
            println!("{}: {}", i + 1, tile);
        }

        loop {
            let prompt = format!(
                "{}, select a domino to play by its number (1-{}): ",
                self.name,
                view.hand.len()
            );
            let Ok(number) = self.ask(&prompt).await?.parse::<usize>() else {
                println!("Invalid input. Please enter a number.");
                continue;
            };
            if number == 0 || number > view.hand.len() {
                println!("Invalid selection. Please choose a valid number.");
                continue;
            }

            let end = match view.ends {
                Some(_) => self.ask_end().await?,
                None => End::Tail,
            };

            let selection = Selection::new(number - 1, end);
            match selection.check(view.hand, view.ends) {
                Ok(tile) => {
                    debug!(%tile, %selection, "Selection accepted");
                    return Ok(selection);
                }
                Err(e) => {
                    debug!(error = %e, "Selection rejected");
                    println!("Invalid move. {}", e);
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
