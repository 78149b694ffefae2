//! Session state: phase, gates, and pair bookkeeping.
//!
//! ## Gates
//!
//! A tap is accepted only when both gates are open:
//!
//! - **flip gate**: fewer than two cards are flipping or open
//!   (`flips_in_flight < 2`)
//! - **audio gate**: no pronunciation is still settling (`!audio_pending`)
//!
//! The two are timed independently and are never merged into one flag.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardId, Epoch};

/// Top-level session phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No board.
    #[default]
    Idle,
    /// Board dealt, no card revealed.
    AwaitingFirstFlip,
    /// One card revealed (or revealing).
    AwaitingSecondFlip,
    /// Two cards revealed, waiting on resolution.
    Resolving,
    /// Every pair found.
    Complete,
}

impl SessionPhase {
    /// Phases in which taps may be accepted.
    #[must_use]
    pub fn accepts_taps(self) -> bool {
        matches!(
            self,
            SessionPhase::AwaitingFirstFlip | SessionPhase::AwaitingSecondFlip
        )
    }
}

/// Mutable state of one session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) phase: SessionPhase,
    pub(crate) epoch: Epoch,
    /// Cards whose opening flip has landed, in landing order.
    pub(crate) flipped_cards: SmallVec<[CardId; 2]>,
    pub(crate) pairs_matched: u32,
    pub(crate) total_pairs: u32,
    /// Cards tapped since the last resolution.
    pub(crate) flips_in_flight: u8,
    /// A pronunciation is still settling.
    pub(crate) audio_pending: bool,
    /// A screen transition is running.
    pub(crate) input_locked: bool,
    /// The display pause for the current pair is queued.
    pub(crate) resolution_scheduled: bool,
}

impl SessionState {
    /// Idle state for the given epoch.
    #[must_use]
    pub fn idle(epoch: Epoch) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    /// Fresh state for a newly dealt board.
    #[must_use]
    pub fn dealt(epoch: Epoch, total_pairs: u32) -> Self {
        Self {
            phase: SessionPhase::AwaitingFirstFlip,
            epoch,
            total_pairs,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    #[must_use]
    pub fn flipped_cards(&self) -> &[CardId] {
        &self.flipped_cards
    }

    #[must_use]
    pub fn pairs_matched(&self) -> u32 {
        self.pairs_matched
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    #[must_use]
    pub fn flips_in_flight(&self) -> u8 {
        self.flips_in_flight
    }

    #[must_use]
    pub fn audio_pending(&self) -> bool {
        self.audio_pending
    }

    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    /// Flip gate: room for another revealed card.
    #[must_use]
    pub fn flip_gate_open(&self) -> bool {
        self.flips_in_flight < 2
    }

    /// Audio gate: no pronunciation settling.
    #[must_use]
    pub fn audio_gate_open(&self) -> bool {
        !self.audio_pending
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }
}
