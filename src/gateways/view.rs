//! Screen gateway and the single-flight transition guard.
//!
//! The app moves between three screens:
//!
//! ```text
//! Title -> Gameplay -> Result -> Title
//! ```
//!
//! Only one transition may run at a time. `ViewRouter` tracks the active
//! screen and whether a transition is in progress, and remembers what to
//! do once the running transition lands.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// App screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Title,
    Gameplay,
    Result,
}

/// Work to run when a transition lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenAction {
    /// Deal a new board.
    StartSession,
    /// Tear the board down and go idle.
    ResetSession,
}

/// Renders screen transitions.
pub trait ViewController {
    /// Animate from one screen to another over `duration`.
    fn begin_transition(&mut self, from: Screen, to: Screen, duration: Duration);

    /// Update the paired-count display.
    fn set_paired_count(&mut self, paired: u32);
}

/// Why a screen change was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TransitionRejected {
    #[error("a transition is already in progress")]
    InProgress,

    #[error("{0:?} is already showing")]
    AlreadyShowing(Screen),
}

/// A transition that has landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandedTransition {
    pub screen: Screen,
    pub on_complete: Option<ScreenAction>,
}

#[derive(Clone, Copy, Debug)]
struct PendingTransition {
    to: Screen,
    on_complete: Option<ScreenAction>,
}

/// Tracks the active screen and enforces one transition at a time.
#[derive(Clone, Debug, Default)]
pub struct ViewRouter {
    active: Screen,
    pending: Option<PendingTransition>,
}

impl ViewRouter {
    /// Start on the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen currently showing (or being left, mid-transition).
    #[must_use]
    pub fn active(&self) -> Screen {
        self.active
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Claim the transition slot. Returns the screen being left.
    ///
    /// A rejected request leaves the router untouched.
    pub fn begin(
        &mut self,
        to: Screen,
        on_complete: Option<ScreenAction>,
    ) -> Result<Screen, TransitionRejected> {
        if self.pending.is_some() {
            return Err(TransitionRejected::InProgress);
        }
        if self.active == to {
            return Err(TransitionRejected::AlreadyShowing(to));
        }
        self.pending = Some(PendingTransition { to, on_complete });
        Ok(self.active)
    }

    /// Land the running transition, if any.
    pub fn finish(&mut self) -> Option<LandedTransition> {
        let pending = self.pending.take()?;
        self.active = pending.to;
        Some(LandedTransition {
            screen: pending.to,
            on_complete: pending.on_complete,
        })
    }
}
