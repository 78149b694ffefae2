//! Identifier types shared across the engine.
//!
//! ## ID Layout
//!
//! Card IDs are allocated from a single counter that keeps growing across
//! sessions. A card spawned by one session can therefore never be confused
//! with a card from an earlier board, even if a stale tap or task still
//! refers to it.
//!
//! ```
//! use memory_match::core::{CardId, Epoch};
//!
//! let card = CardId::new(7);
//! assert_eq!(format!("{}", card), "Card(7)");
//!
//! let first = Epoch::default();
//! assert!(first.next() > first);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Session generation counter.
///
/// Every session-bound scheduled task is tagged with the epoch it was
/// created under. Tasks whose epoch no longer matches the live session
/// are dropped on dispatch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Epoch(pub u64);

impl Epoch {
    /// The epoch following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw epoch value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

/// Monotonic allocator for card IDs.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next card ID.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "Card(3)");
    }

    #[test]
    fn test_epoch_ordering() {
        let e0 = Epoch::default();
        let e1 = e0.next();
        assert_eq!(e0.raw(), 0);
        assert_eq!(e1.raw(), 1);
        assert!(e1 > e0);
        assert_eq!(format!("{}", e1), "Epoch(1)");
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.alloc();
        let b = ids.alloc();

        assert_eq!(a, CardId(0));
        assert_eq!(b, CardId(1));
        assert_eq!(ids.allocated(), 2);
    }

    #[test]
    fn test_card_id_serde() {
        let id = CardId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
