//! Effects that open a sub-phase and wait for a resolution.
//!
//! Each effect does its immediate work, then pushes a sub-phase frame with
//! an optional continuation. The continuation is data, interpreted by the
//! engine when the sub-phase ends, so chains like trash-then-gain are just
//! a continuation that opens the next frame.

use smallvec::SmallVec;

use super::effect::{ActionEffect, EffectDelta};
use crate::cards::{CardFilter, CardKind};
use crate::core::{PlayerId, Result};
use crate::engine::{Continuation, DiscardState, Engine, GainState, SubPhase, TrashState};
use crate::zones::GainLocation;

/// Sentinel for "any number of cards".
pub const UNLIMITED: u32 = u32::MAX;

/// Chapel: trash up to N cards of any kind.
#[derive(Clone, Copy, Debug)]
pub struct TrashUpTo(pub u32);

impl ActionEffect for TrashUpTo {
    fn apply(&self, engine: &mut Engine, _player: PlayerId) -> Result<EffectDelta> {
        engine.change_phase_using_action_card(
            SubPhase::Trash(TrashState {
                remaining: self.0,
                filter: CardFilter::Any,
                name: None,
            }),
            None,
        )?;
        Ok(EffectDelta::none())
    }
}

/// Remodel and mine: trash one card, then gain one costing up to `bonus` more.
#[derive(Clone, Copy, Debug)]
pub struct TrashForGain {
    pub filter: CardFilter,
    pub bonus: u32,
}

impl ActionEffect for TrashForGain {
    fn apply(&self, engine: &mut Engine, _player: PlayerId) -> Result<EffectDelta> {
        let trash_len = engine.trash().len();
        engine.change_phase_using_action_card(
            SubPhase::Trash(TrashState {
                remaining: 1,
                filter: self.filter,
                name: None,
            }),
            Some(Continuation::GainAfterTrash {
                trash_len,
                bonus: self.bonus,
                filter: self.filter,
            }),
        )?;
        Ok(EffectDelta::none().gain_after_trash(self.bonus, self.filter))
    }
}

/// Moneylender: trash a copper; if one was trashed, +3 treasure.
#[derive(Clone, Copy, Debug, Default)]
pub struct Moneylender;

impl ActionEffect for Moneylender {
    fn apply(&self, engine: &mut Engine, _player: PlayerId) -> Result<EffectDelta> {
        let copper = engine.cards().require("copper")?;
        let trash_len = engine.trash().len();
        engine.change_phase_using_action_card(
            SubPhase::Trash(TrashState {
                remaining: 1,
                filter: CardFilter::Kind(CardKind::Treasure),
                name: Some(copper),
            }),
            Some(Continuation::PayoutIfTrashed { trash_len, gold: 3 }),
        )?;
        Ok(EffectDelta::none())
    }
}

/// Workshop (and feast, with `trash_self`): gain a card costing up to N.
#[derive(Clone, Copy, Debug)]
pub struct GainUpTo {
    pub max_cost: u32,
    pub trash_self: bool,
}

impl ActionEffect for GainUpTo {
    fn apply(&self, engine: &mut Engine, _player: PlayerId) -> Result<EffectDelta> {
        engine.change_phase_using_action_card(
            SubPhase::Gain(GainState {
                remaining: 1,
                max_cost: self.max_cost,
                filter: CardFilter::Any,
                location: GainLocation::Discard,
            }),
            None,
        )?;
        let delta = EffectDelta::none();
        Ok(if self.trash_self { delta.trash_self() } else { delta })
    }
}

/// Cellar: discard any number of cards, then draw one per card discarded.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cellar;

impl ActionEffect for Cellar {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        let discard_len = engine.player(player).discard.len();
        engine.change_phase_using_action_card(
            SubPhase::Discard(DiscardState {
                remaining: UNLIMITED,
                filter: CardFilter::Any,
                range: None,
            }),
            Some(Continuation::DrawPerDiscard {
                player,
                discard_len,
            }),
        )?;
        Ok(EffectDelta::none())
    }
}

/// Library: draw up to 7 cards, then optionally discard the action cards drawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct Library;

/// Hand size library draws up to.
const LIBRARY_HAND_SIZE: usize = 7;

impl ActionEffect for Library {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        let start = engine.player(player).hand.len();
        engine.draw_cards(player, LIBRARY_HAND_SIZE.saturating_sub(start));
        engine.change_phase_using_action_card(
            SubPhase::Discard(DiscardState {
                remaining: UNLIMITED,
                filter: CardFilter::Kind(CardKind::Action),
                range: Some(start..LIBRARY_HAND_SIZE.max(start)),
            }),
            None,
        )?;
        Ok(EffectDelta::none())
    }
}

/// Chancellor: +2 treasure; may put the whole deck into the discard pile.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chancellor;

impl ActionEffect for Chancellor {
    fn apply(&self, engine: &mut Engine, _player: PlayerId) -> Result<EffectDelta> {
        engine.change_phase_using_action_card(SubPhase::DiscardDeck, None)?;
        Ok(EffectDelta::none().gold(2))
    }
}

/// Spy: +1 card, +1 action; every player reveals their top card, which the
/// spy's owner sends back to the deck or into the discard pile.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spy;

impl ActionEffect for Spy {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        engine.draw_cards(player, 1);
        for seat in engine.player_ids() {
            engine.reveal_card(seat);
        }
        engine.change_phase_using_action_card(SubPhase::Spy, Some(Continuation::ResolveSpy))?;
        Ok(EffectDelta::none().actions(1))
    }
}

/// Thief: each other player reveals 2 cards; the thief picks one treasure
/// per victim to trash or steal and the rest are discarded.
#[derive(Clone, Copy, Debug, Default)]
pub struct Thief;

impl ActionEffect for Thief {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        for other in engine.other_players(player) {
            engine.reveal_card(other);
            engine.reveal_card(other);
        }
        engine.change_phase_using_action_card(
            SubPhase::Thief,
            Some(Continuation::ResolveThief { thief: player }),
        )?;
        Ok(EffectDelta::none())
    }
}

/// Adventurer: reveal until 2 treasures turn up (or the cards run out).
/// Treasures go to hand, the rest are discarded.
#[derive(Clone, Copy, Debug, Default)]
pub struct Adventurer;

impl ActionEffect for Adventurer {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        let mut treasures = 0;
        while treasures < 2 {
            let Some(card) = engine.reveal_card(player) else {
                log::debug!("{} ran out of cards while revealing for adventurer", player);
                break;
            };
            if engine.cards().is_kind(card, CardKind::Treasure) {
                treasures += 1;
            }
        }
        engine.change_phase_using_action_card(
            SubPhase::Adventurer,
            Some(Continuation::ResolveAdventurer { player }),
        )?;
        Ok(EffectDelta::none())
    }
}

/// Bureaucrat: gain a silver onto the deck; each other player reveals the
/// first victory card in hand and puts it on their deck.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bureaucrat;

impl ActionEffect for Bureaucrat {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        let silver = engine.cards().require("silver")?;
        if engine.supply().remaining(silver) > 0 {
            engine.gain_card(silver, player, GainLocation::DeckTop)?;
        } else {
            log::debug!("silver pile empty, bureaucrat gains nothing");
        }

        let mut victims: SmallVec<[PlayerId; 6]> = SmallVec::new();
        for other in engine.other_players(player) {
            let position = {
                let cards = engine.cards();
                engine
                    .player(other)
                    .hand
                    .iter()
                    .position(|&c| cards.is_kind(c, CardKind::Victory))
            };
            if let Some(index) = position {
                let target = engine.player_mut(other);
                let card = target.hand.remove(index);
                target.revealed_cards.push(card);
                victims.push(other);
            }
        }

        engine.change_phase_using_action_card(
            SubPhase::Bureaucrat,
            Some(Continuation::ResolveBureaucrat { victims }),
        )?;
        Ok(EffectDelta::none())
    }
}
