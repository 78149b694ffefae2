//! Narrow interfaces to the collaborators the session drives but does not
//! own: screen chrome, card rendering, audio, and particle effects.
//!
//! The session holds one boxed implementation of each, passed in at
//! construction through [`Gateways`]. Nothing here is global.
//!
//! - `ViewController` / `ViewRouter`: Screen transitions (single-flight)
//! - `CardPresenter`: Card visuals and animation curves
//! - `AudioPlayer`: Fire-and-forget clip playback
//! - `EffectsPlayer`: Fire-and-forget visual effects
//! - `recording`: Headless and recording implementations

pub mod audio;
pub mod effects;
pub mod presenter;
pub mod recording;
pub mod view;

pub use audio::AudioPlayer;
pub use effects::{EffectId, EffectsPlayer};
pub use presenter::{CardPresenter, FlipMotion};
pub use recording::{GatewayCall, NullGateway, Recorder};
pub use view::{Screen, ScreenAction, TransitionRejected, ViewController, ViewRouter};

/// The full set of collaborators a session talks to.
pub struct Gateways {
    pub view: Box<dyn ViewController>,
    pub presenter: Box<dyn CardPresenter>,
    pub audio: Box<dyn AudioPlayer>,
    pub effects: Box<dyn EffectsPlayer>,
}

impl Gateways {
    /// Bundle four implementations.
    pub fn new(
        view: impl ViewController + 'static,
        presenter: impl CardPresenter + 'static,
        audio: impl AudioPlayer + 'static,
        effects: impl EffectsPlayer + 'static,
    ) -> Self {
        Self {
            view: Box::new(view),
            presenter: Box::new(presenter),
            audio: Box::new(audio),
            effects: Box::new(effects),
        }
    }

    /// Collaborators that ignore every call.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(NullGateway, NullGateway, NullGateway, NullGateway)
    }
}

impl std::fmt::Debug for Gateways {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateways").finish_non_exhaustive()
    }
}
