//! Visual effects gateway.

use serde::{Deserialize, Serialize};

/// Effects the session can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectId {
    /// A pair was found.
    Paired,
}

/// Fire-and-forget particle playback.
pub trait EffectsPlayer {
    fn play(&mut self, effect: EffectId);
}
