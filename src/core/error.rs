//! Error types.
//!
//! Only configuration problems and misuse of the session lifecycle are
//! errors. Gated taps are reported as [`crate::session::TapOutcome`] values
//! and missing assets are logged, so neither shows up here.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problem detected before a board is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("grid {rows}x{cols} has an odd number of cells ({count}); cards come in pairs")]
    OddCardCount { rows: u32, cols: u32, count: u32 },

    #[error("grid {rows}x{cols} has too many cells to count")]
    GridTooLarge { rows: u32, cols: u32 },

    #[error("catalog has {available} entries but the board needs {needed} pairs")]
    InsufficientCatalog { needed: usize, available: usize },

    #[error("{name} must be between 0 and 3600 seconds (got {value})")]
    InvalidTiming { name: &'static str, value: f32 },

    #[error("{name} must be a finite, positive number (got {value})")]
    InvalidScale { name: &'static str, value: f32 },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by session lifecycle operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot start a session while a pair is being resolved")]
    ResolutionInProgress,
}

/// Why a card refused to start a flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FlipError {
    #[error("card is already flipping")]
    AlreadyFlipping,

    #[error("card is retiring")]
    Retiring,
}
