//! The session orchestrator.
//!
//! `Session` deals the board, gates input against running animations and
//! audio, resolves revealed pairs, and detects completion. It is driven
//! from a single thread by three kinds of input:
//!
//! - taps (`card_tapped`)
//! - lifecycle calls (`start_session`, `request_start`, `return_to_title`, `reset`)
//! - time (`advance`), which fires scheduled tasks in order
//!
//! ## Turn pipeline
//!
//! ```text
//! tap -> flip lands -> audio settles -> (two open) display pause -> resolve
//! ```
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::cards::CardCatalog;
//! use memory_match::core::SessionConfig;
//! use memory_match::gateways::Gateways;
//! use memory_match::session::{Session, SessionPhase, TapOutcome};
//!
//! let config = SessionConfig::new().with_grid(2, 2).with_seed(1);
//! let mut session = Session::new(config, CardCatalog::numbered(2), Gateways::headless()).unwrap();
//! session.start_session().unwrap();
//!
//! let first = session.board().ids()[0];
//! assert_eq!(session.card_tapped(first), TapOutcome::Accepted);
//! assert_eq!(session.phase(), SessionPhase::AwaitingSecondFlip);
//!
//! session.advance(Duration::from_secs(2));
//! assert_eq!(session.flipped_cards(), &[first]);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::events::SessionEvent;
use super::scheduler::{ScheduledTask, Scheduler, Task};
use super::state::{SessionPhase, SessionState};
use crate::board::{Board, BoardGenerator, GridCell, Position};
use crate::cards::{AudioClip, CardCatalog, CardInstance, CardState, DisplayMode, PairKey};
use crate::core::{
    CardId, ConfigError, Epoch, GameRng, GameRngState, IdAllocator, SessionConfig, SessionError,
};
use crate::gateways::{
    AudioPlayer, EffectId, FlipMotion, Gateways, Screen, ScreenAction, ViewRouter,
};
use crate::rules::{self, FollowUp, MatchOutcome};

/// Why a tap was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// No board, or the session is complete.
    NotPlaying,
    /// Two cards are out and waiting on resolution.
    Resolving,
    /// A screen transition is running.
    InputLocked,
    /// No such card on the board.
    UnknownCard,
    /// The card is flipping, open, or retiring.
    CardNotClosed,
    /// Two cards are already flipping or open.
    FlipLimit,
    /// A pronunciation is still settling.
    AudioPending,
}

/// Result of a tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapOutcome {
    Accepted,
    Ignored(IgnoreReason),
}

impl TapOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self == TapOutcome::Accepted
    }
}

/// Serializable view of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: CardId,
    pub pair_key: PairKey,
    pub display_mode: DisplayMode,
    pub state: CardState,
    pub cell: GridCell,
}

/// Serializable view of a session, for debugging and inspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub screen: Screen,
    pub now_millis: u64,
    /// Board RNG position. Resuming from it reproduces the next deal.
    pub rng: GameRngState,
    pub cards: Vec<CardSnapshot>,
}

/// One memory-game session and the app flow around it.
pub struct Session {
    config: SessionConfig,
    catalog: CardCatalog,
    generator: BoardGenerator,
    gateways: Gateways,
    rng: GameRng,
    ids: IdAllocator,
    board: Board,
    state: SessionState,
    scheduler: Scheduler,
    router: ViewRouter,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create an idle session on the title screen.
    ///
    /// Fails if the configuration is invalid or the catalog cannot fill
    /// the configured grid.
    pub fn new(
        config: SessionConfig,
        catalog: CardCatalog,
        gateways: Gateways,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.ensure_pairs(config.grid.pair_count() as usize)?;

        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        tracing::debug!(seed = rng.seed(), grid = ?config.grid, "session created");

        Ok(Self {
            generator: BoardGenerator::new(config.card_spacing),
            config,
            catalog,
            gateways,
            rng: rng.for_context("board"),
            ids: IdAllocator::new(),
            board: Board::new(),
            state: SessionState::idle(Epoch::default()),
            scheduler: Scheduler::new(),
            router: ViewRouter::new(),
            events: Vec::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.state.epoch
    }

    #[must_use]
    pub fn pairs_matched(&self) -> u32 {
        self.state.pairs_matched
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.state.total_pairs
    }

    #[must_use]
    pub fn flipped_cards(&self) -> &[CardId] {
        &self.state.flipped_cards
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardInstance> {
        self.board.get(id)
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.router.active()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.router.is_transitioning()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Capture a serializable view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            screen: self.router.active(),
            now_millis: self.scheduler.now().as_millis() as u64,
            rng: self.rng.state(),
            cards: self
                .board
                .iter()
                .map(|c| CardSnapshot {
                    id: c.id,
                    pair_key: c.identity.pair_key,
                    display_mode: c.identity.display_mode,
                    state: c.state(),
                    cell: c.cell,
                })
                .collect(),
        }
    }

    // === Lifecycle ===

    /// Deal a board using the configured grid.
    pub fn start_session(&mut self) -> Result<(), SessionError> {
        let grid = self.config.grid;
        self.start_session_with(grid.rows, grid.cols)
    }

    /// Deal a `rows x cols` board.
    ///
    /// Any previous board is torn down first and its pending tasks are
    /// cancelled. Refused while a pair is being resolved. On a
    /// configuration error the previous session is left as it was.
    pub fn start_session_with(&mut self, rows: u32, cols: u32) -> Result<(), SessionError> {
        if self.state.phase == SessionPhase::Resolving {
            return Err(SessionError::ResolutionInProgress);
        }

        let layout = self.generator.generate(rows, cols, &self.catalog, &mut self.rng)?;

        self.teardown();
        let epoch = self.state.epoch.next();
        let total_pairs = (layout.len() / 2) as u32;
        self.state = SessionState::dealt(epoch, total_pairs);
        self.state.input_locked = self.router.is_transitioning();

        let stagger = self.config.timings.spawn_stagger();
        for (index, entry) in layout.into_iter().enumerate() {
            if entry.identity.face.is_none() {
                tracing::warn!(pair = %entry.identity.pair_key, mode = ?entry.identity.display_mode, "no face asset; card will render blank");
            }
            let card = CardInstance::new(self.ids.alloc(), entry.identity, entry.cell, entry.position);
            self.gateways.presenter.spawn(&card, stagger * index as u32);
            self.board.insert(card);
        }

        tracing::info!(%epoch, rows, cols, total_pairs, "session started");
        self.events.push(SessionEvent::SessionStarted { epoch, total_pairs });
        Ok(())
    }

    /// Tear down the board and go idle.
    pub fn reset(&mut self) {
        self.teardown();
        let input_locked = self.router.is_transitioning();
        self.state = SessionState::idle(self.state.epoch.next());
        self.state.input_locked = input_locked;
        tracing::info!(epoch = %self.state.epoch, "session reset");
    }

    /// Cancel this session's tasks and remove its cards.
    fn teardown(&mut self) {
        let cancelled = self.scheduler.cancel_session_tasks();
        let removed = self.board.clear();
        for &id in &removed {
            self.gateways.presenter.despawn(id);
        }
        if cancelled > 0 || !removed.is_empty() {
            tracing::debug!(cancelled, removed = removed.len(), "previous board torn down");
        }
    }

    // === Screen flow ===

    /// Transition to the gameplay screen, dealing a board when it lands.
    pub fn request_start(&mut self) -> bool {
        self.show_screen(Screen::Gameplay, Some(ScreenAction::StartSession))
    }

    /// Transition back to the title screen, resetting when it lands.
    pub fn return_to_title(&mut self) -> bool {
        self.show_screen(Screen::Title, Some(ScreenAction::ResetSession))
    }

    /// Start a screen transition. Returns false if another transition is
    /// running or the screen is already showing.
    pub fn show_screen(&mut self, screen: Screen, on_complete: Option<ScreenAction>) -> bool {
        let from = match self.router.begin(screen, on_complete) {
            Ok(from) => from,
            Err(rejected) => {
                tracing::debug!(?screen, %rejected, "screen change ignored");
                return false;
            }
        };

        let duration = self.config.timings.transition();
        if screen == Screen::Gameplay {
            self.gateways.view.set_paired_count(0);
        }
        self.gateways.view.begin_transition(from, screen, duration);
        self.state.input_locked = true;
        self.scheduler.schedule(duration, None, Task::TransitionFinished);
        tracing::debug!(?from, to = ?screen, "screen transition started");
        true
    }

    fn finish_transition(&mut self) {
        let Some(landed) = self.router.finish() else {
            return;
        };
        self.state.input_locked = false;
        self.events.push(SessionEvent::ScreenShown { screen: landed.screen });

        match landed.on_complete {
            Some(ScreenAction::StartSession) => {
                if let Err(err) = self.start_session() {
                    tracing::error!(%err, "deferred session start failed");
                    self.events.push(SessionEvent::StartFailed {
                        reason: err.to_string(),
                    });
                }
            }
            Some(ScreenAction::ResetSession) => self.reset(),
            None => {}
        }
    }

    // === Input ===

    /// Handle a tap on a card.
    ///
    /// Gated taps are ignored and leave every card and counter untouched.
    pub fn card_tapped(&mut self, id: CardId) -> TapOutcome {
        let outcome = self.check_tap(id);
        match outcome {
            TapOutcome::Ignored(reason) => {
                tracing::trace!(card = %id, ?reason, "tap ignored");
                return outcome;
            }
            TapOutcome::Accepted => {}
        }

        let Some(card) = self.board.get_mut(id) else {
            return TapOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        let direction = match card.begin_flip() {
            Ok(direction) => direction,
            Err(_) => return TapOutcome::Ignored(IgnoreReason::CardNotClosed),
        };

        self.state.flips_in_flight += 1;
        self.state.audio_pending = true;
        self.state.phase = if self.state.flips_in_flight >= 2 {
            SessionPhase::Resolving
        } else {
            SessionPhase::AwaitingSecondFlip
        };

        let motion = self.flip_motion();
        self.gateways.presenter.flip(id, direction, motion);
        self.scheduler.schedule(
            motion.duration,
            Some(self.state.epoch),
            Task::FlipLanded { card: id, report: true },
        );
        tracing::debug!(card = %id, in_flight = self.state.flips_in_flight, "tap accepted");
        TapOutcome::Accepted
    }

    fn check_tap(&self, id: CardId) -> TapOutcome {
        let ignored = TapOutcome::Ignored;
        let phase = self.state.phase;
        if !phase.accepts_taps() {
            return ignored(if phase == SessionPhase::Resolving {
                IgnoreReason::Resolving
            } else {
                IgnoreReason::NotPlaying
            });
        }
        if self.state.input_locked {
            return ignored(IgnoreReason::InputLocked);
        }
        let Some(card) = self.board.get(id) else {
            return ignored(IgnoreReason::UnknownCard);
        };
        if card.state() != CardState::Closed {
            return ignored(IgnoreReason::CardNotClosed);
        }
        // Two flips in flight always means Resolving, which returned above.
        if !self.state.flip_gate_open() {
            return ignored(IgnoreReason::FlipLimit);
        }
        if !self.state.audio_gate_open() {
            return ignored(IgnoreReason::AudioPending);
        }
        TapOutcome::Accepted
    }

    fn flip_motion(&self) -> FlipMotion {
        FlipMotion {
            duration: self.config.timings.flip(),
            scale: self.config.flip_scale,
            forward_distance: self.config.flip_forward_distance,
        }
    }

    // === Time ===

    /// Advance the clock by `elapsed`, firing every task that comes due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.dispatch(task);
        }
        self.scheduler.advance_to(until);
    }

    /// Fire tasks until none are left.
    pub fn run_until_idle(&mut self) {
        while let Some(due) = self.scheduler.next_due() {
            let elapsed = due.saturating_sub(self.scheduler.now());
            self.advance(elapsed);
        }
    }

    fn dispatch(&mut self, scheduled: ScheduledTask) {
        if let Some(epoch) = scheduled.epoch {
            if epoch != self.state.epoch {
                tracing::warn!(task = %scheduled.id, %epoch, live = %self.state.epoch, "dropping stale task");
                return;
            }
        }

        match scheduled.task {
            Task::FlipLanded { card, report } => self.on_flip_landed(card, report),
            Task::AudioSettled => self.on_audio_settled(),
            Task::DisplayElapsed => self.resolve_pair(),
            Task::RetireGathered { card } => {
                self.gateways.presenter.set_face(card, DisplayMode::canonical());
                self.schedule_session(self.config.timings.display(), Task::RetireDepart { card });
            }
            Task::RetireDepart { card } => {
                let duration = self.config.timings.retire();
                self.gateways.presenter.retire_depart(card, duration);
                self.schedule_session(duration, Task::RetireFinished { card });
            }
            Task::RetireFinished { card } => {
                if self.board.remove(card).is_some() {
                    self.gateways.presenter.despawn(card);
                    tracing::debug!(card = %card, "retired card removed");
                }
            }
            Task::TransitionFinished => self.finish_transition(),
        }
    }

    fn schedule_session(&mut self, delay: Duration, task: Task) {
        self.scheduler.schedule(delay, Some(self.state.epoch), task);
    }

    fn on_flip_landed(&mut self, id: CardId, report: bool) {
        let Some(card) = self.board.get_mut(id) else {
            tracing::warn!(card = %id, "flip landed for a card no longer on the board");
            return;
        };
        let Some(new_state) = card.finish_flip() else {
            return;
        };

        if new_state == CardState::Open {
            play_pronunciation(&mut *self.gateways.audio, card.identity.audio.as_ref(), card.identity.pair_key);
        }

        if report {
            debug_assert!(self.state.flipped_cards.len() < 2, "more than two cards flipped");
            self.state.flipped_cards.push(id);
            self.schedule_session(self.config.timings.audio_settle(), Task::AudioSettled);
        }
    }

    fn on_audio_settled(&mut self) {
        self.state.audio_pending = false;
        if self.state.flipped_cards.len() == 2 && !self.state.resolution_scheduled {
            self.state.resolution_scheduled = true;
            self.schedule_session(self.config.timings.display(), Task::DisplayElapsed);
        }
    }

    fn resolve_pair(&mut self) {
        self.state.resolution_scheduled = false;
        let [first, second] = match self.state.flipped_cards.as_slice() {
            &[a, b] => [a, b],
            other => {
                tracing::warn!(flipped = other.len(), "resolution fired without two flipped cards");
                return;
            }
        };

        let resolution = match (self.board.get(first), self.board.get(second)) {
            (Some(a), Some(b)) => rules::resolve(a, b),
            _ => {
                tracing::warn!(%first, %second, "flipped card missing at resolution");
                self.finish_turn();
                return;
            }
        };

        for follow_up in resolution.follow_ups {
            self.apply_follow_up(follow_up);
        }
        tracing::debug!(%first, %second, outcome = ?resolution.outcome, "pair resolved");
        self.events.push(SessionEvent::PairResolved {
            first,
            second,
            outcome: resolution.outcome,
        });

        if resolution.outcome == MatchOutcome::Matched {
            self.gateways.effects.play(EffectId::Paired);
            self.state.pairs_matched += 1;
            let pairs_matched = self.state.pairs_matched;
            self.gateways.view.set_paired_count(pairs_matched);
            self.events.push(SessionEvent::PairCountChanged { pairs_matched });
        }

        self.finish_turn();

        // Completion is decided here, before the retirement animations end.
        if self.state.pairs_matched == self.state.total_pairs {
            self.state.phase = SessionPhase::Complete;
            let pairs_matched = self.state.pairs_matched;
            tracing::info!(epoch = %self.state.epoch, pairs_matched, "session complete");
            self.events.push(SessionEvent::SessionComplete { pairs_matched });
            self.show_screen(Screen::Result, None);
        }
    }

    /// Clear the revealed pair and reopen both gates' flip side.
    fn finish_turn(&mut self) {
        self.state.flipped_cards.clear();
        self.state.flips_in_flight = 0;
        self.state.phase = SessionPhase::AwaitingFirstFlip;
    }

    fn apply_follow_up(&mut self, follow_up: FollowUp) {
        let id = follow_up.card();
        let Some(card) = self.board.get_mut(id) else {
            return;
        };

        match follow_up {
            FollowUp::Retire(_) => {
                if !card.begin_retire() {
                    tracing::warn!(card = %id, state = ?card.state(), "matched card could not retire");
                    return;
                }
                let duration = self.config.timings.retire();
                self.gateways
                    .presenter
                    .retire_gather(id, Position::ORIGIN, self.config.retire_scale, duration);
                self.schedule_session(duration, Task::RetireGathered { card: id });
            }
            FollowUp::FlipBack(_) => match card.begin_flip() {
                Ok(direction) => {
                    let motion = self.flip_motion();
                    self.gateways.presenter.flip(id, direction, motion);
                    self.schedule_session(motion.duration, Task::FlipLanded { card: id, report: false });
                }
                Err(err) => tracing::warn!(card = %id, %err, "could not flip card back"),
            },
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("cards", &self.board.len())
            .field("screen", &self.router.active())
            .field("now", &self.scheduler.now())
            .finish_non_exhaustive()
    }
}

/// Play a card's pronunciation. A missing clip is logged and skipped.
fn play_pronunciation(audio: &mut dyn AudioPlayer, clip: Option<&AudioClip>, pair: PairKey) {
    match clip {
        Some(AudioClip {
            clip,
            segment: Some(segment),
        }) => audio.play_segment(clip, segment.start, segment.end),
        Some(AudioClip { clip, segment: None }) => audio.play_once(clip),
        None => tracing::warn!(%pair, "no pronunciation clip; skipping audio"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CatalogEntry;
    use crate::core::Timings;
    use crate::gateways::{GatewayCall, Recorder};

    fn secs(n: f32) -> Duration {
        Duration::from_secs_f32(n)
    }

    fn session_with(recorder: &Recorder, catalog: CardCatalog) -> Session {
        let config = SessionConfig::new().with_grid(2, 2).with_seed(7);
        Session::new(config, catalog, recorder.gateways()).unwrap()
    }

    /// Two card IDs of the same pair and two of the other pair.
    fn pairs(session: &Session) -> ([CardId; 2], [CardId; 2]) {
        let mut by_key: Vec<(PairKey, CardId)> = session
            .board()
            .iter()
            .map(|c| (c.identity.pair_key, c.id))
            .collect();
        by_key.sort();
        ([by_key[0].1, by_key[1].1], [by_key[2].1, by_key[3].1])
    }

    #[test]
    fn test_new_rejects_small_catalog() {
        let config = SessionConfig::new().with_grid(2, 4);
        let result = Session::new(config, CardCatalog::numbered(3), Gateways::headless());
        assert!(matches!(result, Err(ConfigError::InsufficientCatalog { .. })));
    }

    #[test]
    fn test_start_spawns_cards() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();

        assert_eq!(session.phase(), SessionPhase::AwaitingFirstFlip);
        assert_eq!(session.board().len(), 4);
        assert_eq!(session.total_pairs(), 2);
        assert_eq!(recorder.count(|c| matches!(c, GatewayCall::Spawn { .. })), 4);
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::SessionStarted { epoch: Epoch(1), total_pairs: 2 }]
        );
    }

    #[test]
    fn test_audio_gate_blocks_second_tap_until_settled() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, _], [c, _]) = pairs(&session);

        assert!(session.card_tapped(a).is_accepted());
        assert_eq!(
            session.card_tapped(c),
            TapOutcome::Ignored(IgnoreReason::AudioPending)
        );

        // Flip lands at 0.5s, audio settles at 1.5s.
        session.advance(secs(1.0));
        assert_eq!(session.flipped_cards(), &[a]);
        assert_eq!(
            session.card_tapped(c),
            TapOutcome::Ignored(IgnoreReason::AudioPending)
        );

        session.advance(secs(0.5));
        assert!(session.state().audio_gate_open());
        assert!(session.card_tapped(c).is_accepted());
        assert_eq!(session.phase(), SessionPhase::Resolving);
    }

    #[test]
    fn test_tap_on_open_card_ignored() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, _], _) = pairs(&session);

        session.card_tapped(a);
        session.advance(secs(2.0));

        assert_eq!(
            session.card_tapped(a),
            TapOutcome::Ignored(IgnoreReason::CardNotClosed)
        );
        assert_eq!(session.flipped_cards(), &[a]);
    }

    #[test]
    fn test_unknown_and_idle_taps() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));

        assert_eq!(
            session.card_tapped(CardId(0)),
            TapOutcome::Ignored(IgnoreReason::NotPlaying)
        );

        session.start_session().unwrap();
        assert_eq!(
            session.card_tapped(CardId(999)),
            TapOutcome::Ignored(IgnoreReason::UnknownCard)
        );
    }

    #[test]
    fn test_pronunciation_played_on_open_only() {
        let recorder = Recorder::new();
        let catalog = CardCatalog::new()
            .with_entry(CatalogEntry::new("a").with_audio("a.ogg"))
            .with_entry(CatalogEntry::new("b").with_audio_segment("all.ogg", 1.0, 2.0));
        let mut session = session_with(&recorder, catalog);
        session.start_session().unwrap();
        let ([a, _], [c, _]) = pairs(&session);

        session.card_tapped(a);
        session.advance(secs(1.5));
        session.card_tapped(c);
        session.run_until_idle();

        let audio: Vec<_> = recorder
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GatewayCall::PlayOnce(_) | GatewayCall::PlaySegment { .. }))
            .collect();
        assert_eq!(
            audio,
            vec![
                GatewayCall::PlayOnce(crate::cards::ClipId::new("a.ogg")),
                GatewayCall::PlaySegment {
                    clip: crate::cards::ClipId::new("all.ogg"),
                    start: 1.0,
                    end: 2.0,
                },
            ]
        );
    }

    #[test]
    fn test_retirement_phases_remove_cards() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, b], _) = pairs(&session);

        session.card_tapped(a);
        session.advance(secs(1.5));
        session.card_tapped(b);
        // b lands at 2.0, settles at 3.0, resolves at 4.0.
        session.advance(secs(2.5));

        assert_eq!(session.pairs_matched(), 1);
        assert_eq!(session.card(a).unwrap().state(), CardState::Retiring);
        assert_eq!(
            recorder.count(|c| matches!(c, GatewayCall::RetireGather { .. })),
            2
        );

        session.run_until_idle();
        assert!(session.card(a).is_none());
        assert!(session.card(b).is_none());
        assert_eq!(session.board().len(), 2);
        assert_eq!(
            recorder.count(|c| matches!(c, GatewayCall::SetFace { mode: DisplayMode::Textual, .. })),
            2
        );
        assert_eq!(recorder.count(|c| *c == GatewayCall::Despawn(a)), 1);
    }

    #[test]
    fn test_instant_timings_resolve_in_one_advance() {
        let config = SessionConfig::new()
            .with_grid(2, 2)
            .with_seed(3)
            .with_timings(Timings::instant());
        let mut session = Session::new(config, CardCatalog::numbered(2), Gateways::headless()).unwrap();
        session.start_session().unwrap();
        let ([a, b], _) = pairs(&session);

        session.card_tapped(a);
        session.advance(Duration::ZERO);
        session.card_tapped(b);
        session.advance(Duration::ZERO);

        assert_eq!(session.pairs_matched(), 1);
        assert_eq!(session.board().len(), 2);
        assert_eq!(session.pending_tasks(), 0);
    }

    #[test]
    fn test_start_refused_while_resolving() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, _], [c, _]) = pairs(&session);

        session.card_tapped(a);
        session.advance(secs(1.5));
        session.card_tapped(c);

        assert!(matches!(
            session.start_session(),
            Err(SessionError::ResolutionInProgress)
        ));
        assert_eq!(session.epoch(), Epoch(1));
    }

    #[test]
    fn test_failed_start_keeps_previous_board() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ids = session.board().ids().to_vec();

        let result = session.start_session_with(3, 3);
        assert!(matches!(result, Err(SessionError::Config(ConfigError::OddCardCount { .. }))));
        assert_eq!(session.board().ids(), ids.as_slice());
        assert_eq!(session.epoch(), Epoch(1));
    }

    #[test]
    fn test_second_flip_enters_resolving_with_flip_gate_closed() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, b], [c, _]) = pairs(&session);

        session.card_tapped(a);
        session.advance(secs(1.5));
        session.card_tapped(b);

        assert!(!session.phase().accepts_taps());
        assert!(!session.state().flip_gate_open());
        assert_eq!(
            session.card_tapped(c),
            TapOutcome::Ignored(IgnoreReason::Resolving)
        );

        session.run_until_idle();
        assert!(session.phase().accepts_taps());
        assert!(session.state().flip_gate_open());
    }

    #[test]
    fn test_snapshot_rng_replays_next_deal() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let saved = session.snapshot().rng;

        let generator = BoardGenerator::new(session.config().card_spacing);
        let expected: Vec<(GridCell, PairKey, DisplayMode)> = generator
            .generate(2, 2, &CardCatalog::numbered(2), &mut GameRng::from_state(&saved))
            .unwrap()
            .into_iter()
            .map(|e| (e.cell, e.identity.pair_key, e.identity.display_mode))
            .collect();

        session.start_session().unwrap();
        let dealt: Vec<(GridCell, PairKey, DisplayMode)> = session
            .board()
            .iter()
            .map(|c| (c.cell, c.identity.pair_key, c.identity.display_mode))
            .collect();

        assert_eq!(dealt, expected);
        assert_ne!(session.snapshot().rng, saved);
    }

    #[test]
    fn test_oversized_grid_is_config_error() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ids = session.board().ids().to_vec();

        let result = session.start_session_with(65536, 65536);
        assert!(matches!(result, Err(SessionError::Config(ConfigError::GridTooLarge { .. }))));
        assert_eq!(session.board().ids(), ids.as_slice());
    }

    #[test]
    fn test_huge_timing_rejected_at_construction() {
        let mut config = SessionConfig::new().with_grid(2, 2);
        config.timings.flip_duration = 1e30;
        let result = Session::new(config, CardCatalog::numbered(2), Gateways::headless());
        assert!(matches!(result, Err(ConfigError::InvalidTiming { name: "flip_duration", .. })));
    }

    #[test]
    fn test_reset_goes_idle() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, _], _) = pairs(&session);
        session.card_tapped(a);

        session.reset();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.board().is_empty());
        assert_eq!(session.pending_tasks(), 0);
        assert_eq!(recorder.count(|c| matches!(c, GatewayCall::Despawn(_))), 4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.cards.len(), 4);
        assert_eq!(snapshot.state.phase(), SessionPhase::AwaitingFirstFlip);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_spawns_are_staggered() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();

        let delays: Vec<Duration> = recorder
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Spawn { delay, .. } => Some(delay),
                _ => None,
            })
            .collect();
        assert_eq!(delays[0], Duration::ZERO);
        assert!(delays[1] > Duration::ZERO);
        for (i, delay) in delays.iter().enumerate() {
            assert_eq!(*delay, delays[1] * i as u32);
        }
    }

    #[test]
    fn test_deferred_start_failure_is_reported() {
        let recorder = Recorder::new();
        let mut session = session_with(&recorder, CardCatalog::numbered(2));
        session.start_session().unwrap();
        let ([a, _], [c, _]) = pairs(&session);
        session.card_tapped(a);
        session.advance(secs(1.5));
        session.card_tapped(c);
        session.take_events();

        // Lands at 2.5s, resolution is due at 4.0s.
        assert!(session.request_start());
        session.advance(secs(1.0));

        let events = session.take_events();
        assert_eq!(events[0], SessionEvent::ScreenShown { screen: Screen::Gameplay });
        assert!(matches!(events[1], SessionEvent::StartFailed { .. }));
        assert_eq!(session.epoch(), Epoch(1));
        assert!(!session.state().input_locked());
    }
}
