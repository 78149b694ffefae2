//! Core types: identifiers, RNG, configuration, errors.
//!
//! Everything here is independent of how a session is played. The board,
//! rules, and session modules build on these.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

pub use config::{GridSize, SessionConfig, Spacing, Timings, MAX_TIMING_SECS};
pub use error::{ConfigError, FlipError, SessionError};
pub use ids::{CardId, Epoch, IdAllocator};
pub use rng::{GameRng, GameRngState};
