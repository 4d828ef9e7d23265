//! Decision makers for automated seats.
//!
//! A `PlayerStrategy` answers every question `Engine::do_turn` asks during a
//! turn: which action to play, which treasures to lay down, what to buy, and
//! how to resolve each sub-phase a card opens. Only the action and buy
//! decisions are required; everything else has a simple default.
//!
//! ## Reference AIs
//!
//! - `BigMoney`, `SmartBigMoney`, `PointsOnly`: no actions, money and points
//! - `BigMoneySmithy`, `SmartSmithy`, `SmartDuchy`: play actions, buy smithies

mod big_money;
mod smithy;

pub use big_money::{BigMoney, PointsOnly, SmartBigMoney};
pub use smithy::{BigMoneySmithy, SmartDuchy, SmartSmithy};

use smallvec::SmallVec;

use crate::cards::{CardFilter, CardId, CardKind, CardRegistry};
use crate::core::{Player, PlayerId, PlayerMap};
use crate::engine::{DiscardState, GainState, SpyChoice, ThiefAction, ThiefChoice, TrashState};
use crate::zones::Supply;

/// Read-only view of the table handed to a strategy.
#[derive(Clone, Copy)]
pub struct TurnView<'a> {
    /// Seat being decided for.
    pub seat: PlayerId,
    pub player: &'a Player,
    pub players: &'a PlayerMap<Player>,
    pub supply: &'a Supply,
    pub cards: &'a CardRegistry,
    pub treasure_pot: u32,
}

impl<'a> TurnView<'a> {
    /// Id of a catalog card.
    #[must_use]
    pub fn card(&self, name: &str) -> Option<CardId> {
        self.cards.id_of(name)
    }

    /// Cards left in a supply pile; 0 if the card has no pile.
    #[must_use]
    pub fn supply_count(&self, name: &str) -> u32 {
        self.card(name).map_or(0, |card| self.supply.remaining(card))
    }

    /// Treasure in hand plus the treasure pot.
    #[must_use]
    pub fn money(&self) -> u32 {
        self.player.money_in_hand(self.cards) + self.treasure_pot
    }

    /// First card in hand with a playable action effect.
    #[must_use]
    pub fn first_action(&self) -> Option<CardId> {
        self.player
            .hand
            .iter()
            .copied()
            .find(|&card| self.cards.get(card).is_some_and(|c| c.is_playable_action()))
    }

    /// Cost of a card, 0 if unknown.
    #[must_use]
    pub fn cost(&self, card: CardId) -> u32 {
        self.cards.get(card).map_or(0, |c| c.cost)
    }

    /// Every seat with cards in its revealed zone.
    pub fn revealed(&self) -> impl Iterator<Item = (PlayerId, &'a [CardId])> + 'a {
        self.players
            .iter()
            .filter(|(_, p)| !p.revealed_cards.is_empty())
            .map(|(id, p)| (id, p.revealed_cards.as_slice()))
    }

    fn is_junk(&self, card: CardId) -> bool {
        self.cards
            .get(card)
            .is_some_and(|c| c.kind == CardKind::Victory || c.points < 0)
    }
}

/// Decision policy for an automated player.
pub trait PlayerStrategy: Send {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Action card to play next, or `None` to stop playing actions.
    fn action_turn(&mut self, view: &TurnView<'_>) -> Option<CardId>;

    /// Card the strategy wants to buy with everything in hand.
    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId>;

    /// Storage for the goal chosen in `play_treasures`.
    fn goal_slot(&mut self) -> &mut Option<CardId>;

    /// Pick the buy goal, then return hand indices of treasures to play,
    /// stopping once their value covers the goal's cost.
    fn play_treasures(&mut self, view: &TurnView<'_>) -> Vec<usize> {
        let goal = self.buy_goal(view);
        *self.goal_slot() = goal;
        let Some(cost) = goal.map(|card| view.cost(card)) else {
            return Vec::new();
        };
        if let Some(card) = goal {
            log::debug!("{} aims to buy {}", view.player.name, view.cards.name(card));
        }

        let mut total = 0;
        let mut picks = Vec::new();
        for (index, &card) in view.player.hand.iter().enumerate() {
            if let Some(def) = view.cards.get(card) {
                if def.kind == CardKind::Treasure {
                    total += def.value;
                    picks.push(index);
                }
            }
            if total >= cost {
                break;
            }
        }
        picks
    }

    /// Card to buy after treasures are played.
    fn buy_turn(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        *self.goal_slot()
    }

    /// Card to gain in a gain sub-phase.
    fn gain_card(&mut self, view: &TurnView<'_>, state: &GainState) -> Option<CardId> {
        let silver = view.card("silver")?;
        (state.max_cost >= 3 && state.filter.accepts(CardKind::Treasure)).then_some(silver)
    }

    /// Hand index to trash before a linked gain: the cheapest card allowed
    /// by `trash_filter`.
    fn trash_card_for_gain(
        &mut self,
        view: &TurnView<'_>,
        _gain_bonus_cost: u32,
        trash_filter: CardFilter,
        _gain_filter: CardFilter,
    ) -> Vec<usize> {
        view.player
            .hand
            .iter()
            .enumerate()
            .filter_map(|(index, &card)| view.cards.get(card).map(|def| (index, def)))
            .filter(|(_, def)| trash_filter.accepts(def.kind))
            .min_by_key(|(_, def)| def.cost)
            .map(|(index, _)| vec![index])
            .unwrap_or_default()
    }

    /// Hand indices to trash: curses and coppers, up to the limit.
    fn trash_cards(&mut self, view: &TurnView<'_>, state: &TrashState) -> Vec<usize> {
        let copper = view.card("copper");
        view.player
            .hand
            .iter()
            .enumerate()
            .filter(|&(_, &card)| {
                view.cards.get(card).is_some_and(|def| {
                    let wanted = (def.kind == CardKind::Victory && def.points < 0) || Some(card) == copper;
                    wanted
                        && state.filter.accepts(def.kind)
                        && state.name.map_or(true, |name| name == card)
                })
            })
            .map(|(index, _)| index)
            .take(state.remaining as usize)
            .collect()
    }

    /// Hand indices to discard: victory cards and curses inside the
    /// allowed range.
    fn discard_cards(&mut self, view: &TurnView<'_>, state: &DiscardState) -> Vec<usize> {
        view.player
            .hand
            .iter()
            .enumerate()
            .filter(|&(index, &card)| {
                state.range.as_ref().map_or(true, |range| range.contains(&index))
                    && view.is_junk(card)
                    && view.cards.get(card).is_some_and(|def| state.filter.accepts(def.kind))
            })
            .map(|(index, _)| index)
            .take(state.remaining as usize)
            .collect()
    }

    /// Whether to put the whole deck into the discard pile.
    fn discard_deck(&mut self, _view: &TurnView<'_>) -> bool {
        true
    }

    /// Keep good cards on our own deck, leave junk on everyone else's.
    fn spy_choices(&mut self, view: &TurnView<'_>) -> SmallVec<[(PlayerId, SpyChoice); 6]> {
        view.revealed()
            .map(|(seat, revealed)| {
                let junk = revealed.iter().all(|&card| view.is_junk(card));
                let keep = if seat == view.seat { !junk } else { junk };
                (seat, if keep { SpyChoice::Deck } else { SpyChoice::Discard })
            })
            .collect()
    }

    /// Take each victim's best revealed treasure: steal silver and better,
    /// trash copper.
    fn thief_choices(&mut self, view: &TurnView<'_>) -> SmallVec<[(PlayerId, ThiefChoice); 6]> {
        view.revealed()
            .filter(|&(seat, _)| seat != view.seat)
            .filter_map(|(seat, revealed)| {
                let (index, value) = revealed
                    .iter()
                    .enumerate()
                    .filter_map(|(index, &card)| {
                        view.cards
                            .get(card)
                            .filter(|def| def.kind == CardKind::Treasure)
                            .map(|def| (index, def.value))
                    })
                    .max_by_key(|&(_, value)| value)?;
                let action = if value >= 2 {
                    ThiefAction::Gain
                } else {
                    ThiefAction::Trash
                };
                Some((seat, ThiefChoice { index, action }))
            })
            .collect()
    }
}

/// One player per reference AI, named for display.
pub fn ai_roster() -> Vec<Player> {
    let strategies: Vec<Box<dyn PlayerStrategy>> = vec![
        Box::<BigMoney>::default(),
        Box::<SmartBigMoney>::default(),
        Box::<BigMoneySmithy>::default(),
        Box::<SmartSmithy>::default(),
        Box::<SmartDuchy>::default(),
        Box::<PointsOnly>::default(),
    ];
    strategies
        .into_iter()
        .map(|strategy| Player::new(strategy.name(), strategy))
        .collect()
}
