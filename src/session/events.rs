//! Signals the session produces for its host.
//!
//! Events are queued as they happen and drained with
//! `Session::take_events`. They mirror what the view is told, so a host
//! can drive its own UI from them instead of (or as well as) a
//! `ViewController`.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Epoch};
use crate::gateways::Screen;
use crate::rules::MatchOutcome;

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A board was dealt.
    SessionStarted { epoch: Epoch, total_pairs: u32 },

    /// Two revealed cards were compared.
    PairResolved {
        first: CardId,
        second: CardId,
        outcome: MatchOutcome,
    },

    /// The matched-pair count changed.
    PairCountChanged { pairs_matched: u32 },

    /// Every pair was found. Fires once per session.
    SessionComplete { pairs_matched: u32 },

    /// A screen transition landed.
    ScreenShown { screen: Screen },

    /// A deferred session start failed (the error is logged too).
    StartFailed { reason: String },
}

impl SessionEvent {
    /// Check whether this is a completion event.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, SessionEvent::SessionComplete { .. })
    }
}
