//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: name, cost,
//! kind and the kind-specific payload (treasure value, victory points,
//! action effect). Zones never hold definitions, only `CardId`s that point
//! back into the `CardRegistry`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::Player;
use crate::effects::ActionEffect;

/// Unique identifier for a card definition.
///
/// Copies of the same card share an id. Moving a card between zones moves
/// the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Treasure,
    Victory,
    Action,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardKind::Treasure => "treasure",
            CardKind::Victory => "victory",
            CardKind::Action => "action",
        };
        f.write_str(name)
    }
}

/// Restriction on which cards a sub-phase accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFilter {
    /// Any card.
    Any,
    /// Only cards of this kind.
    Kind(CardKind),
}

impl CardFilter {
    /// Check whether a card kind passes the filter.
    #[must_use]
    pub fn accepts(self, kind: CardKind) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::Kind(k) => k == kind,
        }
    }
}

impl std::fmt::Display for CardFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFilter::Any => f.write_str("any"),
            CardFilter::Kind(kind) => kind.fmt(f),
        }
    }
}

/// Bonus victory points computed from the owner's cards at game end.
pub type PointsEffect = fn(&Player) -> i32;

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_dominion::cards::{CardDefinition, CardId, CardKind};
///
/// let silver = CardDefinition::treasure(CardId::new(1), "silver", 3, 2);
/// assert_eq!(silver.kind, CardKind::Treasure);
/// assert_eq!(silver.value, 2);
/// ```
#[derive(Clone, Debug)]
pub struct CardDefinition {
    pub id: CardId,
    /// Unique lowercase name, the card's lookup key.
    pub name: String,
    pub cost: u32,
    pub kind: CardKind,
    /// Money produced when played (treasures).
    pub value: u32,
    /// Printed victory points (victory cards; negative for curses).
    pub points: i32,
    /// Extra points derived from the owner's cards (e.g. gardens).
    pub points_effect: Option<PointsEffect>,
    /// What happens when the card is played (actions).
    pub effect: Option<Arc<dyn ActionEffect>>,
    pub is_attack: bool,
    pub is_reaction: bool,
}

impl CardDefinition {
    fn base(id: CardId, name: impl Into<String>, cost: u32, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind,
            value: 0,
            points: 0,
            points_effect: None,
            effect: None,
            is_attack: false,
            is_reaction: false,
        }
    }

    /// Create a treasure card.
    #[must_use]
    pub fn treasure(id: CardId, name: impl Into<String>, cost: u32, value: u32) -> Self {
        Self {
            value,
            ..Self::base(id, name, cost, CardKind::Treasure)
        }
    }

    /// Create a victory card.
    #[must_use]
    pub fn victory(id: CardId, name: impl Into<String>, cost: u32, points: i32) -> Self {
        Self {
            points,
            ..Self::base(id, name, cost, CardKind::Victory)
        }
    }

    /// Create an action card without an effect.
    #[must_use]
    pub fn action(id: CardId, name: impl Into<String>, cost: u32) -> Self {
        Self::base(id, name, cost, CardKind::Action)
    }

    /// Attach an action effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: impl ActionEffect + 'static) -> Self {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Attach a bonus-points rule (builder pattern).
    #[must_use]
    pub fn with_points_effect(mut self, effect: PointsEffect) -> Self {
        self.points_effect = Some(effect);
        self
    }

    #[must_use]
    pub fn attack(mut self) -> Self {
        self.is_attack = true;
        self
    }

    #[must_use]
    pub fn reaction(mut self) -> Self {
        self.is_reaction = true;
        self
    }

    /// True if the card can be played in the action phase.
    #[must_use]
    pub fn is_playable_action(&self) -> bool {
        self.kind == CardKind::Action && self.effect.is_some()
    }

    /// Victory points this card is worth to `owner`.
    #[must_use]
    pub fn victory_points(&self, owner: &Player) -> i32 {
        if self.kind != CardKind::Victory {
            return 0;
        }
        self.points + self.points_effect.map_or(0, |effect| effect(owner))
    }
}
