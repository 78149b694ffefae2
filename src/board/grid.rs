//! The live board: every card instance of the current session.

use rustc_hash::FxHashMap;

use crate::cards::CardInstance;
use crate::core::CardId;

/// Cards on the board, keyed by ID, remembered in spawn order.
#[derive(Clone, Debug, Default)]
pub struct Board {
    cards: FxHashMap<CardId, CardInstance>,
    order: Vec<CardId>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card.
    ///
    /// Panics if a card with the same ID is already on the board.
    pub fn insert(&mut self, card: CardInstance) {
        let id = card.id;
        if self.cards.insert(id, card).is_some() {
            panic!("Card {id} already on the board");
        }
        self.order.push(id);
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Take a card off the board.
    pub fn remove(&mut self, id: CardId) -> Option<CardInstance> {
        let card = self.cards.remove(&id)?;
        self.order.retain(|&c| c != id);
        Some(card)
    }

    /// Remove every card, returning their IDs in spawn order.
    pub fn clear(&mut self) -> Vec<CardId> {
        self.cards.clear();
        std::mem::take(&mut self.order)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card IDs in spawn order.
    #[must_use]
    pub fn ids(&self) -> &[CardId] {
        &self.order
    }

    /// Cards in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }
}
