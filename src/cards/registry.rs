//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition for a game. Lookup is
//! by `CardId` (hot path, zones hold ids) or by name (setup, strategies
//! and UI input).

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardKind};
use crate::core::{EngineError, Result};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_dominion::cards::{CardRegistry, CardDefinition, CardId};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.next_id();
/// registry.register(CardDefinition::treasure(id, "copper", 0, 1));
///
/// assert_eq!(registry.id_of("copper"), Some(id));
/// assert_eq!(registry.name(id), "copper");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    by_name: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next auto-numbered card should use.
    #[must_use]
    pub fn next_id(&self) -> CardId {
        CardId::new(self.next_id)
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID or name already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        if self.by_name.contains_key(&card.name) {
            panic!("Card named {} already registered", card.name);
        }
        self.next_id = self.next_id.max(card.id.raw() + 1);
        self.by_name.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition by ID, or `UnknownCard`.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition> {
        self.cards
            .get(&id)
            .ok_or_else(|| EngineError::UnknownCard(id.to_string()))
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).and_then(|id| self.cards.get(id))
    }

    /// Resolve a card name to its id.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a card name to its id, or `UnknownCard`.
    pub fn require(&self, name: &str) -> Result<CardId> {
        self.id_of(name)
            .ok_or_else(|| EngineError::UnknownCard(name.to_string()))
    }

    /// Display name for an id. Unknown ids render as `Card(n)`.
    #[must_use]
    pub fn name(&self, id: CardId) -> String {
        self.cards
            .get(&id)
            .map_or_else(|| id.to_string(), |card| card.name.clone())
    }

    /// Check whether a card has the given kind.
    #[must_use]
    pub fn is_kind(&self, id: CardId, kind: CardKind) -> bool {
        self.cards.get(&id).is_some_and(|card| card.kind == kind)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.kind == kind)
    }
}
