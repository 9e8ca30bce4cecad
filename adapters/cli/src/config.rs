use std::{fs, path::Path};

use anyhow::{Context, Result};
use escape_room_system_board_generator::{Config, DEFAULT_PRIZES, DEFAULT_TRAPS, DEFAULT_WALLS};
use serde::Deserialize;

/// Settings read from the optional TOML configuration file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    board: BoardSection,
}

/// Board table of the configuration file and of the command line flags.
/// Unset entries fall through to the next layer.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct BoardSection {
    pub(crate) walls: Option<u32>,
    pub(crate) traps: Option<u32>,
    pub(crate) prizes: Option<u32>,
    pub(crate) seed: Option<u64>,
}

impl BoardSection {
    fn or(self, fallback: Self) -> Self {
        Self {
            walls: self.walls.or(fallback.walls),
            traps: self.traps.or(fallback.traps),
            prizes: self.prizes.or(fallback.prizes),
            seed: self.seed.or(fallback.seed),
        }
    }
}

impl FileConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }
}

/// Layers command line flags over the file over the defaults. The seed is
/// only drawn from `random_seed` when neither layer sets one.
pub(crate) fn resolve(
    file: &FileConfig,
    flags: BoardSection,
    random_seed: impl FnOnce() -> u64,
) -> Config {
    let merged = flags.or(file.board);
    Config::new(
        merged.walls.unwrap_or(DEFAULT_WALLS),
        merged.traps.unwrap_or(DEFAULT_TRAPS),
        merged.prizes.unwrap_or(DEFAULT_PRIZES),
        merged.seed.unwrap_or_else(random_seed),
    )
}
