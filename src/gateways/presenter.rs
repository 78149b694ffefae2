//! Card presentation gateway.
//!
//! The presenter owns every animation curve. The session tells it what to
//! animate and for how long, then waits on its own clock for the
//! animation to be over.

use std::time::Duration;

use crate::board::Position;
use crate::cards::{CardInstance, DisplayMode, FlipDirection};
use crate::core::CardId;

/// Parameters of a flip animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipMotion {
    /// Total flip time.
    pub duration: Duration,
    /// Peak scale mid-flip.
    pub scale: f32,
    /// Peak distance towards the camera mid-flip.
    pub forward_distance: f32,
}

/// Renders cards.
pub trait CardPresenter {
    /// Show a newly dealt card, face down, after `delay`.
    fn spawn(&mut self, card: &CardInstance, delay: Duration);

    /// Play a flip animation.
    fn flip(&mut self, card: CardId, direction: FlipDirection, motion: FlipMotion);

    /// Swap the face a card shows.
    fn set_face(&mut self, card: CardId, mode: DisplayMode);

    /// First retirement phase: grow to `scale` while moving to `target`.
    fn retire_gather(&mut self, card: CardId, target: Position, scale: f32, duration: Duration);

    /// Second retirement phase: shrink away off the board.
    fn retire_depart(&mut self, card: CardId, duration: Duration);

    /// Remove a card's visuals.
    fn despawn(&mut self, card: CardId);
}
