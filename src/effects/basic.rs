//! Effects that resolve immediately, without a sub-phase.

use super::effect::{ActionEffect, EffectDelta, FirstPlayBonus};
use crate::core::{Player, PlayerId, Result};
use crate::engine::Engine;
use crate::zones::GainLocation;

/// Fixed "+N" bonuses: smithy, laboratory, village, festival, woodcutter, market.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bonus {
    pub cards: usize,
    pub actions: u32,
    pub buys: u32,
    pub gold: u32,
}

impl Bonus {
    #[must_use]
    pub const fn cards(cards: usize) -> Self {
        Self {
            cards,
            actions: 0,
            buys: 0,
            gold: 0,
        }
    }

    #[must_use]
    pub const fn with_actions(mut self, actions: u32) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub const fn with_buys(mut self, buys: u32) -> Self {
        self.buys = buys;
        self
    }

    #[must_use]
    pub const fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }
}

impl ActionEffect for Bonus {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        engine.draw_cards(player, self.cards);
        Ok(EffectDelta::none()
            .actions(self.actions)
            .buys(self.buys)
            .gold(self.gold))
    }
}

/// +1 card, +1 action; the first silver played this turn makes +1 more.
#[derive(Clone, Copy, Debug, Default)]
pub struct Merchant;

impl ActionEffect for Merchant {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        engine.draw_cards(player, 1);
        let silver = engine.cards().require("silver")?;

        let mut delta = EffectDelta::none().actions(1);
        delta.first_play_bonus.push((silver, FirstPlayBonus { gold: 1 }));
        Ok(delta)
    }
}

/// +4 cards, +1 buy; each other player draws a card.
#[derive(Clone, Copy, Debug, Default)]
pub struct CouncilRoom;

impl ActionEffect for CouncilRoom {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        for other in engine.other_players(player) {
            engine.draw_card(other);
        }
        engine.draw_cards(player, 4);
        Ok(EffectDelta::none().buys(1))
    }
}

/// +2 cards; each other player gains a curse while curses remain.
#[derive(Clone, Copy, Debug, Default)]
pub struct Witch;

impl ActionEffect for Witch {
    fn apply(&self, engine: &mut Engine, player: PlayerId) -> Result<EffectDelta> {
        engine.draw_cards(player, 2);

        let curse = engine.cards().require("curse")?;
        for other in engine.other_players(player) {
            if engine.supply().remaining(curse) == 0 {
                log::debug!("curse pile empty, {} gains nothing", other);
                break;
            }
            engine.gain_card(curse, other, GainLocation::Discard)?;
        }
        Ok(EffectDelta::none())
    }
}

/// Gardens: one point per 10 cards owned, rounded down.
pub fn gardens_points(player: &Player) -> i32 {
    (player.owned_card_count() / 10) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_bonus_builder() {
        let market = Bonus::cards(1).with_actions(1).with_buys(1).with_gold(1);

        assert_eq!(market.cards, 1);
        assert_eq!(market.actions, 1);
        assert_eq!(market.buys, 1);
        assert_eq!(market.gold, 1);
    }

    #[test]
    fn test_gardens_points() {
        let mut player = Player::human("gardener");
        player.deck = vec![CardId::new(0); 19];
        assert_eq!(gardens_points(&player), 1);

        player.hand.push(CardId::new(0));
        assert_eq!(gardens_points(&player), 2);
    }
}
