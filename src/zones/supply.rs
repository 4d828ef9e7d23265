//! Supply piles.
//!
//! The `Supply` tracks how many copies of each card remain purchasable.
//! Piles only shrink. Backed by `im::OrdMap` so snapshots handed to
//! strategies or a UI are O(1) clones with a stable iteration order.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Where a gained card is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainLocation {
    /// Top of the discard pile.
    #[default]
    Discard,
    /// Top of the draw pile.
    DeckTop,
}

/// Remaining count per supply pile.
///
/// ## Example
///
/// ```
/// use rust_dominion::cards::CardId;
/// use rust_dominion::zones::Supply;
///
/// let mut supply = Supply::new();
/// supply.set_pile(CardId::new(5), 1);
///
/// assert!(supply.take(CardId::new(5)));
/// assert!(!supply.take(CardId::new(5)));
/// assert_eq!(supply.empty_piles(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    piles: OrdMap<CardId, u32>,
}

impl Supply {
    /// Create an empty supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a pile. Used during setup only.
    pub fn set_pile(&mut self, card: CardId, count: u32) {
        self.piles.insert(card, count);
    }

    /// Cards left in a pile. Cards without a pile have 0.
    #[must_use]
    pub fn remaining(&self, card: CardId) -> u32 {
        self.piles.get(&card).copied().unwrap_or(0)
    }

    /// True if the card has a pile, even an empty one.
    #[must_use]
    pub fn has_pile(&self, card: CardId) -> bool {
        self.piles.contains_key(&card)
    }

    /// Take one card from its pile. Returns `false` if the pile is empty or missing.
    pub fn take(&mut self, card: CardId) -> bool {
        match self.piles.get_mut(&card) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Number of piles with no cards left.
    #[must_use]
    pub fn empty_piles(&self) -> usize {
        self.piles.values().filter(|&&count| count == 0).count()
    }

    /// Number of piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Total cards remaining across all piles.
    #[must_use]
    pub fn total_cards(&self) -> u64 {
        self.piles.values().map(|&count| u64::from(count)).sum()
    }

    /// Iterate over (card, remaining) in card id order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, u32)> + '_ {
        self.piles.iter().map(|(&card, &count)| (card, count))
    }
}
