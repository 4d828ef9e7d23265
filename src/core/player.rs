//! Player identification and per-player card zones.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Turn order follows seat order.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! A player's four ordered zones (deck, hand, discard, revealed), the
//! per-turn action/buy counters and an optional strategy. A player without
//! a strategy is human-controlled and must be driven through discrete
//! engine calls.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::{CardId, CardKind, CardRegistry};
use crate::strategy::PlayerStrategy;

/// Seat identifier. Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_dominion::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a PlayerMap from per-seat values in turn order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A seat at the table.
///
/// Decks are drawn from the end (`deck.last()` is the top card). Zones hold
/// `CardId`s; moving a card moves its id, never copies it.
pub struct Player {
    /// Display name.
    pub name: String,
    /// Decision maker. `None` for a human-controlled player.
    pub strategy: Option<Box<dyn PlayerStrategy>>,
    /// Draw pile; the last element is the top card.
    pub deck: Vec<CardId>,
    pub hand: Vec<CardId>,
    pub discard: Vec<CardId>,
    /// Scratch zone for cards revealed by an effect before they are committed.
    pub revealed_cards: Vec<CardId>,
    /// Victory points. Bumped when victory cards are taken from the supply;
    /// authoritative only after the engine recounts at game end.
    pub points: i32,
    pub num_actions: u32,
    pub num_buys: u32,
}

impl Player {
    /// Create a player driven by a strategy.
    pub fn new(name: impl Into<String>, strategy: Box<dyn PlayerStrategy>) -> Self {
        Self::with_strategy(name, Some(strategy))
    }

    /// Create a human-controlled player.
    pub fn human(name: impl Into<String>) -> Self {
        Self::with_strategy(name, None)
    }

    fn with_strategy(name: impl Into<String>, strategy: Option<Box<dyn PlayerStrategy>>) -> Self {
        Self {
            name: name.into(),
            strategy,
            deck: Vec::new(),
            hand: Vec::new(),
            discard: Vec::new(),
            revealed_cards: Vec::new(),
            points: 0,
            num_actions: 0,
            num_buys: 0,
        }
    }

    /// True if no strategy is attached.
    #[must_use]
    pub fn is_human(&self) -> bool {
        self.strategy.is_none()
    }

    /// Total value of the treasure cards currently in hand.
    #[must_use]
    pub fn money_in_hand(&self, cards: &CardRegistry) -> u32 {
        self.hand
            .iter()
            .filter_map(|&id| cards.get(id))
            .filter(|card| card.kind == CardKind::Treasure)
            .map(|card| card.value)
            .sum()
    }

    /// Move the card at `index` from hand to discard.
    ///
    /// Returns the moved card, or `None` if the index is out of range.
    pub fn discard_card(&mut self, index: usize) -> Option<CardId> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.discard.push(card);
        Some(card)
    }

    /// Position of the first copy of `card` in hand.
    #[must_use]
    pub fn find_in_hand(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|&c| c == card)
    }

    /// Number of cards owned across hand, discard and deck.
    #[must_use]
    pub fn owned_card_count(&self) -> usize {
        self.hand.len() + self.discard.len() + self.deck.len()
    }

    /// Iterate over every card in hand, discard and deck.
    pub fn owned_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hand
            .iter()
            .chain(self.discard.iter())
            .chain(self.deck.iter())
            .copied()
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .field("deck", &self.deck)
            .field("hand", &self.hand)
            .field("discard", &self.discard)
            .field("revealed_cards", &self.revealed_cards)
            .field("points", &self.points)
            .field("num_actions", &self.num_actions)
            .field("num_buys", &self.num_buys)
            .finish()
    }
}
