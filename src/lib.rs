//! # memory-match
//!
//! Session orchestration for a memory-matching card game: a grid of
//! face-down cards is revealed two at a time, matching pairs are retired,
//! mismatches are turned back, and the session ends when every pair is
//! found.
//!
//! ## Design Principles
//!
//! 1. **Single-threaded, clock-driven**: Every delay (flip, audio settle,
//!    display pause, retirement, screen transition) is a task on a virtual
//!    clock the host advances. Nothing runs concurrently with anything else.
//!
//! 2. **Explicit collaborators**: Rendering, audio, and effects sit behind
//!    traits handed to the session at construction. No globals.
//!
//! 3. **Two independent input gates**: A tap needs both a free flip slot
//!    and no pronunciation still settling.
//!
//! 4. **Epoch-tagged tasks**: Restarting a session cancels the old one's
//!    tasks, and any stale task that still fires is dropped.
//!
//! ## Modules
//!
//! - `core`: IDs, RNG, configuration, errors
//! - `cards`: Identities, catalog, card instances and the flip protocol
//! - `board`: Board generation and the live board
//! - `rules`: Match resolution
//! - `gateways`: View, presenter, audio, and effects interfaces
//! - `session`: The orchestrator, its state, scheduler, and events

pub mod board;
pub mod cards;
pub mod core;
pub mod gateways;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardId, ConfigError, Epoch, GameRng, GridSize, SessionConfig, SessionError, Spacing, Timings,
};

pub use crate::board::{Board, BoardGenerator, GridCell, LayoutEntry, Position};

pub use crate::cards::{
    AudioClip, CardCatalog, CardIdentity, CardInstance, CardState, CatalogEntry, DisplayMode,
    PairKey,
};

pub use crate::rules::{evaluate, MatchOutcome};

pub use crate::gateways::{
    AudioPlayer, CardPresenter, EffectId, EffectsPlayer, Gateways, Screen, ViewController,
};

pub use crate::session::{
    IgnoreReason, Session, SessionEvent, SessionPhase, SessionState, TapOutcome,
};
