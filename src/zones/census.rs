//! Card counts across every zone of a game.

use rustc_hash::FxHashMap;

use crate::cards::CardId;

/// Per-card totals, used to check that no card is created or lost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    counts: FxHashMap<CardId, u64>,
}

impl Census {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one copy of each card in `cards`.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = CardId>) {
        for card in cards {
            *self.counts.entry(card).or_insert(0) += 1;
        }
    }

    /// Count `n` copies of `card`.
    pub fn add_many(&mut self, card: CardId, n: u64) {
        if n > 0 {
            *self.counts.entry(card).or_insert(0) += n;
        }
    }

    #[must_use]
    pub fn count(&self, card: CardId) -> u64 {
        self.counts.get(&card).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, u64)> + '_ {
        self.counts.iter().map(|(&card, &n)| (card, n))
    }
}
