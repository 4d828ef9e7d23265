//! The action-effect contract.
//!
//! Playing an action card calls its `ActionEffect` with mutable access to
//! the engine. The effect may draw cards, move cards, or open a sub-phase
//! that needs outside input. Whatever it does not apply directly it reports
//! back as an `EffectDelta`, which the engine merges into the turn
//! counters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardFilter, CardId};
use crate::core::{PlayerId, Result};
use crate::engine::Engine;

/// Behavior of a playable action card.
pub trait ActionEffect: Send + Sync + std::fmt::Debug {
    /// Run the card's effect for `player`.
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta>;
}

/// Bonus granted the first time a named card is played this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstPlayBonus {
    pub gold: u32,
}

/// Additive changes an effect asks the engine to apply.
///
/// `gain_bonus_cost`, `gain_filter` and `num_gain` are informational: they
/// tell a strategy resolving a trash-then-gain sub-phase what the follow-up
/// gain will allow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectDelta {
    pub actions: u32,
    pub buys: u32,
    pub gold: u32,
    /// Move the played card from the play area to the trash.
    pub send_to_trash: bool,
    /// Entries merged into the engine's first-play bonus table.
    pub first_play_bonus: SmallVec<[(CardId, FirstPlayBonus); 1]>,
    pub gain_bonus_cost: Option<u32>,
    pub gain_filter: Option<CardFilter>,
    pub num_gain: u32,
}

impl EffectDelta {
    /// A delta with no changes.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn actions(mut self, n: u32) -> Self {
        self.actions = n;
        self
    }

    #[must_use]
    pub fn buys(mut self, n: u32) -> Self {
        self.buys = n;
        self
    }

    #[must_use]
    pub fn gold(mut self, n: u32) -> Self {
        self.gold = n;
        self
    }

    #[must_use]
    pub fn trash_self(mut self) -> Self {
        self.send_to_trash = true;
        self
    }

    /// Record that a trash sub-phase will be followed by a gain.
    #[must_use]
    pub fn gain_after_trash(mut self, bonus_cost: u32, filter: CardFilter) -> Self {
        self.gain_bonus_cost = Some(bonus_cost);
        self.gain_filter = Some(filter);
        self.num_gain = 1;
        self
    }

    /// True if a trash sub-phase opened by this effect links to a gain.
    #[must_use]
    pub fn links_trash_to_gain(&self) -> bool {
        self.gain_bonus_cost.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_delta_builder() {
        let delta = EffectDelta::none().actions(2).buys(1).gold(2);

        assert_eq!(delta.actions, 2);
        assert_eq!(delta.buys, 1);
        assert_eq!(delta.gold, 2);
        assert!(!delta.send_to_trash);
        assert!(!delta.links_trash_to_gain());
    }

    #[test]
    fn test_gain_after_trash() {
        let delta = EffectDelta::none().gain_after_trash(3, CardFilter::Kind(CardKind::Treasure));

        assert!(delta.links_trash_to_gain());
        assert_eq!(delta.gain_bonus_cost, Some(3));
        assert_eq!(delta.num_gain, 1);
    }
}
