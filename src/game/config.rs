use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::deck::Symbol;
use super::error::{ConfigError, Result};

const CONFIG_ENV_VAR: &str = "FLIPMATCH_CONFIG";
const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_CATALOG: [&str; 8] = ["🐶", "🐱", "🐰", "🦊", "🐸", "🐵", "🐯", "🐼"];

/// Tuning for a game: the symbol catalog and the difficulty curve.
///
/// Every field falls back to its default when missing from the config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Ordered symbol glyphs. Level `n` deals the first `n` of them.
    pub catalog: Vec<String>,
    /// Baseline level used on start and after a time-out.
    pub min_level: u8,
    pub base_offset: u32,
    pub seconds_per_unit: u32,
    /// Length of one scheduler step: the countdown tick and the reveal pause.
    pub time_unit_ms: u64,
    pub columns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            catalog: DEFAULT_CATALOG.iter().map(|glyph| glyph.to_string()).collect(),
            min_level: 4,
            base_offset: 4,
            seconds_per_unit: 5,
            time_unit_ms: 1000,
            columns: 4,
        }
    }
}

impl GameConfig {
    pub fn max_level(&self) -> u8 {
        self.catalog.len().min(u8::MAX as usize) as u8
    }

    /// Seconds on the clock for `level`: harder levels get less time.
    ///
    /// Saturates at `u32::MAX`; `validate` rejects configs where that could
    /// happen at the baseline level.
    pub fn countdown_secs(&self, level: u8) -> u32 {
        let steps = (self.max_level() as u32)
            .saturating_add(self.base_offset)
            .saturating_sub(level as u32);
        steps.saturating_mul(self.seconds_per_unit)
    }

    fn checked_countdown_secs(&self, level: u8) -> Option<u32> {
        (self.max_level() as u32)
            .checked_add(self.base_offset)?
            .saturating_sub(level as u32)
            .checked_mul(self.seconds_per_unit)
    }

    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    pub fn glyph(&self, symbol: Symbol) -> &str {
        self.catalog
            .get(symbol.index())
            .map(String::as_str)
            .unwrap_or("?")
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.catalog.len() > u8::MAX as usize {
            return Err(ConfigError::CatalogTooLarge {
                size: self.catalog.len(),
            });
        }
        let mut seen = HashSet::new();
        for glyph in &self.catalog {
            if !seen.insert(glyph.as_str()) {
                return Err(ConfigError::DuplicateSymbol {
                    glyph: glyph.clone(),
                });
            }
        }
        if self.min_level == 0 || self.min_level as usize > self.catalog.len() {
            return Err(ConfigError::MinLevelOutOfRange {
                min_level: self.min_level,
                catalog_size: self.catalog.len(),
            });
        }
        // The baseline level gets the longest countdown.
        if self.checked_countdown_secs(self.min_level).is_none() {
            return Err(ConfigError::CountdownOverflow {
                base_offset: self.base_offset,
                seconds_per_unit: self.seconds_per_unit,
            });
        }
        if self.time_unit_ms == 0 {
            return Err(ConfigError::ZeroTimeUnit);
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        Ok(())
    }

    pub fn from_json(raw: &str, path: &Path) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads from `$FLIPMATCH_CONFIG` or `$HOME/.config/flipmatch/config.json`.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR)
        && !explicit.trim().is_empty()
    {
        return Some(PathBuf::from(explicit));
    }
    let home = std::env::var("HOME").ok()?;
    Some(
        PathBuf::from(home)
            .join(".config/flipmatch")
            .join(CONFIG_FILE_NAME),
    )
}
