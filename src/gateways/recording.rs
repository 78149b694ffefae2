//! Headless and recording gateway implementations.
//!
//! `NullGateway` drops every call. `Recorder` logs every call into a
//! shared list so hosts and tests can inspect what the session asked for.
//! Clones of a `Recorder` share the same log.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::audio::AudioPlayer;
use super::effects::{EffectId, EffectsPlayer};
use super::presenter::{CardPresenter, FlipMotion};
use super::view::{Screen, ViewController};
use super::Gateways;
use crate::board::Position;
use crate::cards::{CardInstance, ClipId, DisplayMode, FlipDirection};
use crate::core::CardId;

/// Ignores every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullGateway;

impl ViewController for NullGateway {
    fn begin_transition(&mut self, _from: Screen, _to: Screen, _duration: Duration) {}
    fn set_paired_count(&mut self, _paired: u32) {}
}

impl CardPresenter for NullGateway {
    fn spawn(&mut self, _card: &CardInstance, _delay: Duration) {}
    fn flip(&mut self, _card: CardId, _direction: FlipDirection, _motion: FlipMotion) {}
    fn set_face(&mut self, _card: CardId, _mode: DisplayMode) {}
    fn retire_gather(&mut self, _card: CardId, _target: Position, _scale: f32, _duration: Duration) {}
    fn retire_depart(&mut self, _card: CardId, _duration: Duration) {}
    fn despawn(&mut self, _card: CardId) {}
}

impl AudioPlayer for NullGateway {
    fn play_once(&mut self, _clip: &ClipId) {}
    fn play_segment(&mut self, _clip: &ClipId, _start: f32, _end: f32) {}
}

impl EffectsPlayer for NullGateway {
    fn play(&mut self, _effect: EffectId) {}
}

/// One call made on a gateway.
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    Transition { from: Screen, to: Screen },
    PairedCount(u32),
    Spawn { card: CardId, delay: Duration },
    Flip { card: CardId, direction: FlipDirection },
    SetFace { card: CardId, mode: DisplayMode },
    RetireGather { card: CardId, scale: f32 },
    RetireDepart { card: CardId },
    Despawn(CardId),
    PlayOnce(ClipId),
    PlaySegment { clip: ClipId, start: f32, end: f32 },
    Effect(EffectId),
}

/// Logs every call.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<GatewayCall>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway bundle whose four members all log here.
    #[must_use]
    pub fn gateways(&self) -> Gateways {
        Gateways::new(self.clone(), self.clone(), self.clone(), self.clone())
    }

    /// Copy of every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<GatewayCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Count calls matching a predicate.
    pub fn count(&self, predicate: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    fn push(&self, call: GatewayCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl ViewController for Recorder {
    fn begin_transition(&mut self, from: Screen, to: Screen, _duration: Duration) {
        self.push(GatewayCall::Transition { from, to });
    }

    fn set_paired_count(&mut self, paired: u32) {
        self.push(GatewayCall::PairedCount(paired));
    }
}

impl CardPresenter for Recorder {
    fn spawn(&mut self, card: &CardInstance, delay: Duration) {
        self.push(GatewayCall::Spawn { card: card.id, delay });
    }

    fn flip(&mut self, card: CardId, direction: FlipDirection, _motion: FlipMotion) {
        self.push(GatewayCall::Flip { card, direction });
    }

    fn set_face(&mut self, card: CardId, mode: DisplayMode) {
        self.push(GatewayCall::SetFace { card, mode });
    }

    fn retire_gather(&mut self, card: CardId, _target: Position, scale: f32, _duration: Duration) {
        self.push(GatewayCall::RetireGather { card, scale });
    }

    fn retire_depart(&mut self, card: CardId, _duration: Duration) {
        self.push(GatewayCall::RetireDepart { card });
    }

    fn despawn(&mut self, card: CardId) {
        self.push(GatewayCall::Despawn(card));
    }
}

impl AudioPlayer for Recorder {
    fn play_once(&mut self, clip: &ClipId) {
        self.push(GatewayCall::PlayOnce(clip.clone()));
    }

    fn play_segment(&mut self, clip: &ClipId, start: f32, end: f32) {
        self.push(GatewayCall::PlaySegment {
            clip: clip.clone(),
            start,
            end,
        });
    }
}

impl EffectsPlayer for Recorder {
    fn play(&mut self, effect: EffectId) {
        self.push(GatewayCall::Effect(effect));
    }
}
