//! Game configuration loaded from TOML.

use crate::games::dominoes::{DEFAULT_HAND_SIZE, Deal, DecisionSource, GameError, Seeds};
use crate::players::{ConsoleInput, HumanPlayer, SimpleAi};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Who makes the decisions for a seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Prompted on the console.
    Human,
    /// Played by [`crate::SimpleAi`].
    Computer,
}

/// One seat's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    name: String,
    /// Decision source for the seat.
    kind: PlayerKind,
}

impl PlayerConfig {
    /// Creates a seat configuration.
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Returns a copy with a different decision source.
    pub fn with_kind(mut self, kind: PlayerKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Tiles dealt to each hand.
    #[serde(default = "default_hand_size")]
    hand_size: usize,

    /// Whether the next pool tile opens the board.
    #[serde(default = "default_open_from_pool")]
    open_from_pool: bool,

    /// Seed for the pool shuffle; random when absent.
    #[serde(default)]
    shuffle_seed: Option<u64>,

    /// Seed for the first-seat coin flip; random when absent.
    #[serde(default)]
    first_player_seed: Option<u64>,

    /// Milliseconds a computer player pauses before moving.
    #[serde(default)]
    think_time_ms: u64,

    /// Seat one.
    #[serde(default = "default_player_one")]
    player_one: PlayerConfig,

    /// Seat two.
    #[serde(default = "default_player_two")]
    player_two: PlayerConfig,
}

fn default_hand_size() -> usize {
    DEFAULT_HAND_SIZE
}

fn default_open_from_pool() -> bool {
    true
}

fn default_player_one() -> PlayerConfig {
    PlayerConfig::new("Player 1", PlayerKind::Human)
}

fn default_player_two() -> PlayerConfig {
    PlayerConfig::new("Player 2", PlayerKind::Computer)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: default_hand_size(),
            open_from_pool: default_open_from_pool(),
            shuffle_seed: None,
            first_player_seed: None,
            think_time_ms: 0,
            player_one: default_player_one(),
            player_two: default_player_two(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Unreadable {
                path: path.as_ref().to_path_buf(),
                reason: e.to_string(),
            })
        })?;
        let config = Self::from_toml(&content)?;
        info!(hand_size = config.hand_size, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolves both seeds, drawing missing ones from entropy.
    pub fn seeds(&self) -> Seeds {
        Seeds::resolve(self.shuffle_seed, self.first_player_seed)
    }

    /// Shuffles and deals a fresh set according to this configuration.
    #[instrument(skip(self))]
    pub fn deal(&self) -> Result<Deal, GameError> {
        Deal::shuffled(self.seeds(), self.hand_size, self.open_from_pool)
    }

    /// Builds the decision source of each seat.
    ///
    /// Human seats share one stdin reader, created only when a human is seated.
    #[instrument(skip(self))]
    pub fn decision_sources(&self) -> [Box<dyn DecisionSource>; 2] {
        let mut input: Option<ConsoleInput> = None;
        let think_time = Duration::from_millis(self.think_time_ms);
        [&self.player_one, &self.player_two].map(|player| -> Box<dyn DecisionSource> {
            match player.kind {
                PlayerKind::Human => {
                    let input = input.get_or_insert_with(ConsoleInput::stdin).clone();
                    Box::new(HumanPlayer::new(player.name.clone(), input))
                }
                PlayerKind::Computer => {
                    Box::new(SimpleAi::new(player.name.clone()).with_think_time(think_time))
                }
            }
        })
    }

    /// Sets the pool shuffle seed.
    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.shuffle_seed = seed;
        }
        self
    }

    /// Sets the first-seat seed.
    pub fn with_first_player_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.first_player_seed = seed;
        }
        self
    }

    /// Sets the hand size.
    pub fn with_hand_size(mut self, hand_size: Option<usize>) -> Self {
        if let Some(hand_size) = hand_size {
            self.hand_size = hand_size;
        }
        self
    }

    /// Sets the decision source of each seat.
    pub fn with_kinds(mut self, one: Option<PlayerKind>, two: Option<PlayerKind>) -> Self {
        if let Some(kind) = one {
            self.player_one = self.player_one.with_kind(kind);
        }
        if let Some(kind) = two {
            self.player_two = self.player_two.with_kind(kind);
        }
        self
    }
}

/// What went wrong while loading a game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The file exists but could not be read.
    #[display("cannot read {}: {}", path.display(), reason)]
    Unreadable {
        /// File that was being loaded.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },
    /// The text is not a valid game configuration.
    #[display("invalid game config: {}", _0)]
    Invalid(String),
}

/// Game configuration could not be loaded; records where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// Cause of the failure.
    pub kind: ConfigErrorKind,
    /// Line where the error was raised.
    pub line: u32,
    /// File where the error was raised.
    pub file: &'static str,
}

impl ConfigError {
    /// Wraps a cause with the caller's location.
    #[track_caller]
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(*config.hand_size(), 10);
        assert!(*config.open_from_pool());
        assert_eq!(*config.player_two().kind(), PlayerKind::Computer);
    }

    #[test]
    fn test_parses_players_and_seeds() {
        let config = GameConfig::from_toml(
            r#"
            hand_size = 7
            shuffle_seed = 42
            first_player_seed = 5

            [player_one]
            name = "Ethan"
            kind = "computer"

            [player_two]
            name = "Tristan"
            kind = "human"
            "#,
        )
        .unwrap();
        assert_eq!(*config.hand_size(), 7);
        assert_eq!(config.player_one().name(), "Ethan");
        assert_eq!(*config.player_two().kind(), PlayerKind::Human);

        let seeds = config.seeds();
        assert_eq!(seeds.shuffle, 42);
        assert_eq!(seeds.first_player, 5);
    }

    #[test]
    fn test_deal_uses_configured_hand_size() {
        let config =
            GameConfig::from_toml("hand_size = 4\nshuffle_seed = 1\nfirst_player_seed = 2\n")
                .unwrap();
        let deal = config.deal().unwrap();
        assert_eq!(deal.hands()[0].len(), 4);
        assert_eq!(deal.hands()[1].len(), 4);
        assert_eq!(deal.board().len(), 1);
        assert_eq!(deal.pool().len(), 28 - 9);
        assert_eq!(deal, config.deal().unwrap());
    }

    #[test]
    fn test_oversized_hand_is_rejected() {
        let config = GameConfig::default().with_hand_size(Some(14));
        assert!(config.deal().is_err());
    }

    #[test]
    fn test_computer_sources_keep_names() {
        let config = GameConfig::default().with_kinds(Some(PlayerKind::Computer), None);
        let [one, two] = config.decision_sources();
        assert_eq!(one.name(), "Player 1");
        assert_eq!(two.name(), "Player 2");
    }

    #[test]
    fn test_from_file_reads_toml() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "open_from_pool = false\n\n[player_two]\nname = \"Bot\"\nkind = \"computer\""
        )
        .unwrap();
        let config = GameConfig::from_file(file.path()).unwrap();
        assert!(!*config.open_from_pool());
        assert_eq!(config.player_two().name(), "Bot");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
        let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::Unreadable { .. }));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = GameConfig::from_toml("[player_one]\nname = \"x\"\nkind = \"robot\"\n")
            .unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::Invalid(_)));
        assert!(err.file.ends_with("game_config.rs"));
    }

    #[test]
    fn test_overrides_only_apply_when_given() {
        let config = GameConfig::default()
            .with_shuffle_seed(Some(9))
            .with_first_player_seed(None)
            .with_hand_size(None)
            .with_kinds(None, Some(PlayerKind::Human));
        assert_eq!(*config.shuffle_seed(), Some(9));
        assert_eq!(*config.first_player_seed(), None);
        assert_eq!(*config.hand_size(), 10);
        assert_eq!(*config.player_two().kind(), PlayerKind::Human);
    }
}
