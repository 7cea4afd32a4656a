//! Errors raised while loading the game configuration.
//!
//! Gameplay itself never fails: invalid selections are ignored and running out
//! of time is an ordinary state transition.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("symbol catalog is empty")]
    EmptyCatalog,

    #[error("symbol catalog has {size} entries, at most 255 are supported")]
    CatalogTooLarge { size: usize },

    #[error("symbol {glyph:?} appears more than once in the catalog")]
    DuplicateSymbol { glyph: String },

    #[error("minimum level {min_level} must be between 1 and the catalog size {catalog_size}")]
    MinLevelOutOfRange { min_level: u8, catalog_size: usize },

    #[error(
        "countdown for the baseline level does not fit in u32 seconds \
         (base_offset {base_offset}, seconds_per_unit {seconds_per_unit})"
    )]
    CountdownOverflow {
        base_offset: u32,
        seconds_per_unit: u32,
    },

    #[error("time unit must be at least one millisecond")]
    ZeroTimeUnit,

    #[error("grid must have at least one column")]
    ZeroColumns,
}
