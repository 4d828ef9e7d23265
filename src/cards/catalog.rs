//! The standard card catalog and kingdom lists.
//!
//! `standard_cards()` builds a fresh registry holding every card the engine
//! knows about. Ids are assigned in catalog order, so they are stable
//! across games.

use super::definition::{CardDefinition, CardFilter, CardKind};
use super::registry::CardRegistry;
use crate::effects::{
    gardens_points, Adventurer, Bonus, Bureaucrat, Cellar, Chancellor, CouncilRoom, GainUpTo,
    Library, Merchant, Moneylender, Spy, Thief, TrashForGain, TrashUpTo, Witch,
};

/// Kingdom cards eligible for random selection.
pub const BASE_KINGDOM: &[&str] = &[
    "adventurer",
    "bureaucrat",
    "cellar",
    "chancellor",
    "chapel",
    "council room",
    "feast",
    "festival",
    "gardens",
    "laboratory",
    "market",
    "mine",
    "library",
    "moneylender",
    "remodel",
    "smithy",
    "spy",
    "thief",
    "village",
    "witch",
    "woodcutter",
    "workshop",
];

/// Implemented kingdom cards that may be requested but are never drawn at random.
pub const EXTRA_KINGDOM: &[&str] = &["merchant"];

/// Number of kingdom piles in every game.
pub const KINGDOM_PILES: usize = 10;

/// True if `name` may be pinned into the kingdom.
#[must_use]
pub fn is_implemented_kingdom(name: &str) -> bool {
    BASE_KINGDOM.contains(&name) || EXTRA_KINGDOM.contains(&name)
}

/// Build the registry of every known card.
#[must_use]
pub fn standard_cards() -> CardRegistry {
    let mut registry = CardRegistry::new();
    let mut add = |build: &dyn Fn(super::CardId) -> CardDefinition| {
        let card = build(registry.next_id());
        registry.register(card);
    };

    // treasures
    add(&|id| CardDefinition::treasure(id, "copper", 0, 1));
    add(&|id| CardDefinition::treasure(id, "silver", 3, 2));
    add(&|id| CardDefinition::treasure(id, "gold", 6, 3));

    // victory
    add(&|id| CardDefinition::victory(id, "estate", 2, 1));
    add(&|id| CardDefinition::victory(id, "duchy", 5, 3));
    add(&|id| CardDefinition::victory(id, "province", 8, 6));
    add(&|id| CardDefinition::victory(id, "curse", 0, -1));
    add(&|id| CardDefinition::victory(id, "gardens", 4, 0).with_points_effect(gardens_points));

    // plain bonuses
    add(&|id| CardDefinition::action(id, "smithy", 4).with_effect(Bonus::cards(3)));
    add(&|id| CardDefinition::action(id, "laboratory", 5).with_effect(Bonus::cards(2).with_actions(1)));
    add(&|id| CardDefinition::action(id, "village", 3).with_effect(Bonus::cards(1).with_actions(2)));
    add(&|id| {
        CardDefinition::action(id, "festival", 5)
            .with_effect(Bonus::cards(0).with_actions(2).with_buys(1).with_gold(2))
    });
    add(&|id| CardDefinition::action(id, "woodcutter", 3).with_effect(Bonus::cards(0).with_buys(1).with_gold(2)));
    add(&|id| {
        CardDefinition::action(id, "market", 5)
            .with_effect(Bonus::cards(1).with_actions(1).with_buys(1).with_gold(1))
    });
    add(&|id| CardDefinition::action(id, "merchant", 3).with_effect(Merchant));
    add(&|id| CardDefinition::action(id, "council room", 5).with_effect(CouncilRoom));
    add(&|id| CardDefinition::action(id, "witch", 5).with_effect(Witch).attack());

    // sub-phase cards
    add(&|id| CardDefinition::action(id, "chapel", 2).with_effect(TrashUpTo(4)));
    add(&|id| {
        CardDefinition::action(id, "remodel", 4).with_effect(TrashForGain {
            filter: CardFilter::Any,
            bonus: 2,
        })
    });
    add(&|id| {
        CardDefinition::action(id, "mine", 5).with_effect(TrashForGain {
            filter: CardFilter::Kind(CardKind::Treasure),
            bonus: 3,
        })
    });
    add(&|id| CardDefinition::action(id, "moneylender", 4).with_effect(Moneylender));
    add(&|id| {
        CardDefinition::action(id, "workshop", 3).with_effect(GainUpTo {
            max_cost: 4,
            trash_self: false,
        })
    });
    add(&|id| {
        CardDefinition::action(id, "feast", 4).with_effect(GainUpTo {
            max_cost: 5,
            trash_self: true,
        })
    });
    add(&|id| CardDefinition::action(id, "cellar", 2).with_effect(Cellar));
    add(&|id| CardDefinition::action(id, "library", 5).with_effect(Library));
    add(&|id| CardDefinition::action(id, "chancellor", 3).with_effect(Chancellor));
    add(&|id| CardDefinition::action(id, "spy", 4).with_effect(Spy).attack());
    add(&|id| CardDefinition::action(id, "thief", 4).with_effect(Thief).attack());
    add(&|id| CardDefinition::action(id, "adventurer", 6).with_effect(Adventurer));
    add(&|id| CardDefinition::action(id, "bureaucrat", 4).with_effect(Bureaucrat).attack());

    // known but not playable
    add(&|id| CardDefinition::action(id, "moat", 2).reaction());
    add(&|id| CardDefinition::action(id, "militia", 4).attack());

    registry
}
