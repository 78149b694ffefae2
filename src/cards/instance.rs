//! Card instances - runtime card state.
//!
//! `CardInstance` is one cell of the board. It owns the open/closed state
//! and enforces the flip protocol:
//!
//! ```text
//! Closed -> Flipping -> Open -> Flipping -> Closed
//!                       Open -> Retiring -> (removed)
//! ```
//!
//! A flip is two steps. `begin_flip` starts it and `finish_flip` lands it
//! once the flip duration has elapsed. The caller owns the timing.

use serde::{Deserialize, Serialize};

use super::identity::CardIdentity;
use crate::board::{GridCell, Position};
use crate::core::{CardId, FlipError};

/// Lifecycle state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down, accepting taps.
    Closed,
    /// Mid-flip in either direction.
    Flipping,
    /// Face up.
    Open,
    /// Matched and animating off the board.
    Retiring,
}

/// Which way a flip goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipDirection {
    Opening,
    Closing,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this instance.
    pub id: CardId,

    /// Pair and face.
    pub identity: CardIdentity,

    /// Grid cell the card was dealt to.
    pub cell: GridCell,

    /// World position of the cell.
    pub position: Position,

    state: CardState,

    /// Which side is showing. Only changes when a flip lands.
    face_up: bool,
}

impl CardInstance {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, identity: CardIdentity, cell: GridCell, position: Position) -> Self {
        Self {
            id,
            identity,
            cell,
            position,
            state: CardState::Closed,
            face_up: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Check whether the face is showing (open, or retiring).
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Start a flip.
    ///
    /// Rejected while another flip is running or the card is retiring.
    pub fn begin_flip(&mut self) -> Result<FlipDirection, FlipError> {
        match self.state {
            CardState::Flipping => Err(FlipError::AlreadyFlipping),
            CardState::Retiring => Err(FlipError::Retiring),
            CardState::Closed | CardState::Open => {
                self.state = CardState::Flipping;
                Ok(if self.face_up {
                    FlipDirection::Closing
                } else {
                    FlipDirection::Opening
                })
            }
        }
    }

    /// Land a running flip, toggling the face.
    ///
    /// Returns the new state, or `None` if no flip was running.
    pub fn finish_flip(&mut self) -> Option<CardState> {
        if self.state != CardState::Flipping {
            return None;
        }
        self.face_up = !self.face_up;
        self.state = if self.face_up {
            CardState::Open
        } else {
            CardState::Closed
        };
        Some(self.state)
    }

    /// Start retiring a matched card. Only open cards can retire.
    pub fn begin_retire(&mut self) -> bool {
        if self.state != CardState::Open {
            return false;
        }
        self.state = CardState::Retiring;
        true
    }
}
