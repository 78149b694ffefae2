//! Match resolution.
//!
//! Decides whether two revealed cards form a pair and which follow-up
//! each card needs. The decision is pure: the session applies the
//! follow-ups.

use serde::{Deserialize, Serialize};

use crate::cards::{CardIdentity, CardInstance};
use crate::core::CardId;

/// Result of comparing two cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched,
    Mismatched,
}

impl MatchOutcome {
    #[must_use]
    pub fn is_match(self) -> bool {
        self == MatchOutcome::Matched
    }
}

/// What should happen to a card after resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowUp {
    /// Animate the card off the board.
    Retire(CardId),
    /// Turn the card face down again.
    FlipBack(CardId),
}

impl FollowUp {
    #[must_use]
    pub fn card(self) -> CardId {
        match self {
            FollowUp::Retire(id) | FollowUp::FlipBack(id) => id,
        }
    }
}

/// Decision for a revealed pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub outcome: MatchOutcome,
    pub follow_ups: [FollowUp; 2],
}

/// Compare two identities.
///
/// Cards match iff their pair keys are equal, whatever faces they show.
/// Symmetric in its arguments.
///
/// ```
/// use memory_match::cards::{CardCatalog, DisplayMode, PairKey};
/// use memory_match::rules::{evaluate, MatchOutcome};
///
/// let catalog = CardCatalog::numbered(2);
/// let a = catalog.identity(PairKey::new(0), DisplayMode::Pictorial).unwrap();
/// let b = catalog.identity(PairKey::new(0), DisplayMode::Textual).unwrap();
/// let c = catalog.identity(PairKey::new(1), DisplayMode::Textual).unwrap();
///
/// assert_eq!(evaluate(&a, &b), MatchOutcome::Matched);
/// assert_eq!(evaluate(&a, &c), MatchOutcome::Mismatched);
/// ```
#[must_use]
pub fn evaluate(a: &CardIdentity, b: &CardIdentity) -> MatchOutcome {
    if a.same_pair(b) {
        MatchOutcome::Matched
    } else {
        MatchOutcome::Mismatched
    }
}

/// Evaluate two cards and pick their follow-ups.
///
/// Follow-ups are listed in argument order.
#[must_use]
pub fn resolve(first: &CardInstance, second: &CardInstance) -> Resolution {
    let outcome = evaluate(&first.identity, &second.identity);
    let follow_up = |id| match outcome {
        MatchOutcome::Matched => FollowUp::Retire(id),
        MatchOutcome::Mismatched => FollowUp::FlipBack(id),
    };
    Resolution {
        outcome,
        follow_ups: [follow_up(first.id), follow_up(second.id)],
    }
}
