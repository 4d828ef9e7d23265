//! The main turn cycle: draw, action, buy, cleanup.

use super::game::{Engine, HAND_SIZE};
use super::phase::{Phase, Step};
use crate::cards::{CardId, CardKind};
use crate::core::{EngineError, PlayerId, Result};
use crate::effects::EffectDelta;

impl Engine {
    /// Fail with `GameOver` once the game has ended.
    pub(crate) fn require_running(&self) -> Result<()> {
        if self.is_game_over {
            Err(EngineError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Fail with `GameOver` after the game has ended, and with
    /// `IllegalPhase` unless the observable phase is `expected`.
    pub(crate) fn require_phase(&self, expected: Phase, operation: &'static str) -> Result<()> {
        self.require_running()?;
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(EngineError::IllegalPhase { operation, phase })
        }
    }

    /// Start the current player's turn: draw a card and reset the turn counters.
    ///
    /// Legal only in the draw phase. Moves to the action phase.
    pub fn draw_phase(&mut self) -> Result<()> {
        self.require_phase(Phase::Draw, "start a turn")?;

        if self.turn.index() == 0 {
            self.round += 1;
            log::debug!("starting round {}", self.round);
        }

        let turn = self.turn;
        self.draw_card(turn);
        let player = &mut self.players[turn];
        player.num_buys = 1;
        player.num_actions = 1;
        self.treasure_pot = 0;
        self.first_play_bonus.clear();
        self.step = Step::Action;
        log::debug!("{} begins turn in round {}", player.name, self.round);
        Ok(())
    }

    /// Play an action card from `player`'s hand.
    ///
    /// Takes the card rather than a hand index: the first copy of `card` in
    /// hand is played, so callers never pass a position.
    ///
    /// The card moves to the play area, any pending first-play bonus for it
    /// is paid, its effect runs and the returned delta is applied. Playing
    /// costs one action. If the effect opened a sub-phase, the phase is no
    /// longer `Action` on return and the sub-phase must be resolved before
    /// the next card is played.
    pub fn play_action_card(&mut self, player: PlayerId, card: CardId) -> Result<EffectDelta> {
        self.require_phase(Phase::Action, "play an action card")?;
        self.check_player(player)?;

        let definition = self.cards.lookup(card)?;
        let index = self.players[player]
            .find_in_hand(card)
            .ok_or_else(|| EngineError::CardNotInHand {
                card: definition.name.clone(),
                player: self.players[player].name.clone(),
            })?;
        if definition.kind != CardKind::Action {
            return Err(EngineError::WrongCardType {
                card: definition.name.clone(),
                expected: CardKind::Action.to_string(),
            });
        }
        let effect = definition
            .effect
            .clone()
            .ok_or_else(|| EngineError::NotPlayable {
                card: definition.name.clone(),
            })?;
        if self.players[player].num_actions == 0 {
            return Err(EngineError::NoActionsRemaining);
        }

        self.players[player].hand.remove(index);
        self.play_area.push(card);
        if let Some(bonus) = self.first_play_bonus.remove(&card) {
            self.treasure_pot += bonus.gold;
        }

        let delta = effect.apply(self, player)?;

        let seat = &mut self.players[player];
        seat.num_actions += delta.actions;
        seat.num_buys += delta.buys;
        self.treasure_pot += delta.gold;
        for &(name, bonus) in &delta.first_play_bonus {
            self.first_play_bonus.insert(name, bonus);
        }
        if delta.send_to_trash {
            if let Some(position) = self.play_area.iter().rposition(|&c| c == card) {
                self.play_area.remove(position);
                self.trash.push(card);
            }
        }
        seat.num_actions = seat.num_actions.saturating_sub(1);

        log::debug!(
            "{} played {} (actions {}, buys {}, pot {})",
            seat.name,
            self.cards.name(card),
            seat.num_actions,
            seat.num_buys,
            self.treasure_pot
        );
        Ok(delta)
    }

    /// Finish playing actions. Legal only in the action phase.
    pub fn end_action_phase(&mut self) -> Result<()> {
        self.require_phase(Phase::Action, "end the action phase")?;
        self.step = Step::Buy;
        Ok(())
    }

    /// Play the treasure at `index` in the current player's hand.
    ///
    /// The card goes straight to the discard pile and its value (plus any
    /// first-play bonus) is added to the treasure pot.
    pub fn play_treasure_card(&mut self, index: usize) -> Result<()> {
        self.require_phase(Phase::Buy, "play a treasure")?;

        let turn = self.turn;
        let hand = &self.players[turn].hand;
        let card = *hand.get(index).ok_or(EngineError::HandIndexOutOfRange {
            index,
            len: hand.len(),
        })?;
        let definition = self.cards.lookup(card)?;
        if definition.kind != CardKind::Treasure {
            return Err(EngineError::WrongCardType {
                card: definition.name.clone(),
                expected: CardKind::Treasure.to_string(),
            });
        }
        let value = definition.value;

        let player = &mut self.players[turn];
        player.hand.remove(index);
        player.discard.push(card);
        if let Some(bonus) = self.first_play_bonus.remove(&card) {
            self.treasure_pot += bonus.gold;
        }
        self.treasure_pot += value;
        log::trace!(
            "{} played {}, pot now {}",
            player.name,
            self.cards.name(card),
            self.treasure_pot
        );
        Ok(())
    }

    /// Buy a card with the treasure pot into `player`'s discard pile.
    pub fn buy_card(&mut self, card: CardId, player: PlayerId) -> Result<()> {
        self.require_phase(Phase::Buy, "buy a card")?;
        self.check_player(player)?;

        let definition = self.cards.lookup(card)?;
        if self.treasure_pot < definition.cost {
            return Err(EngineError::InsufficientTreasure {
                card: definition.name.clone(),
                cost: definition.cost,
                available: self.treasure_pot,
            });
        }
        if self.players[player].num_buys == 0 {
            return Err(EngineError::NoBuysRemaining);
        }
        if self.supply.remaining(card) == 0 {
            return Err(EngineError::PileEmpty {
                card: definition.name.clone(),
            });
        }
        let cost = definition.cost;

        self.take_card(card, player)?;
        self.treasure_pot -= cost;
        let seat = &mut self.players[player];
        seat.discard.push(card);
        seat.num_buys -= 1;
        log::debug!(
            "{} bought {} in round {} (pot now {})",
            seat.name,
            self.cards.name(card),
            self.round,
            self.treasure_pot
        );
        Ok(())
    }

    /// Clean up and pass the turn.
    ///
    /// Zeroes the counters, discards the play area and hand, draws a fresh
    /// hand, then either ends the game or advances to the next seat. Legal
    /// only in the buy phase.
    pub fn end_turn(&mut self) -> Result<()> {
        self.require_phase(Phase::Buy, "end the turn")?;
        self.step = Step::Cleanup;

        let turn = self.turn;
        let player = &mut self.players[turn];
        player.num_actions = 0;
        player.num_buys = 0;
        player.discard.append(&mut self.play_area);
        let mut hand = std::mem::take(&mut player.hand);
        player.discard.append(&mut hand);
        log::trace!("{} cleaned up", player.name);

        self.draw_cards(turn, HAND_SIZE);

        if self.check_game_end() {
            self.is_game_over = true;
            self.calculate_game_end();
        } else {
            self.turn = turn.next(self.num_players());
        }
        self.step = Step::Draw;
        Ok(())
    }

    /// True once an end condition holds.
    ///
    /// The province pile running out always ends the game. Three empty
    /// piles and a round limit end it only when enabled.
    #[must_use]
    pub fn check_game_end(&self) -> bool {
        let provinces_gone = self
            .cards
            .id_of("province")
            .is_some_and(|province| self.supply.remaining(province) == 0);
        let three_piles = self.three_pile_ending && self.supply.empty_piles() >= 3;
        let last_seat = self.turn.index() + 1 == self.num_players();
        let out_of_rounds = self
            .max_rounds
            .is_some_and(|limit| last_seat && self.round >= limit);
        provinces_gone || three_piles || out_of_rounds
    }

    /// Recount every player's points from hand, discard and deck and
    /// record everyone tied for the best score as a winner.
    ///
    /// Safe to call repeatedly; without intervening changes the result is
    /// identical.
    pub fn calculate_game_end(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.points = player
                .owned_cards()
                .filter_map(|card| self.cards.get(card))
                .map(|card| card.victory_points(player))
                .sum();
        }

        let best = self
            .players
            .iter()
            .map(|(_, player)| player.points)
            .max()
            .unwrap_or(0);
        self.winners = self
            .players
            .iter()
            .filter(|(_, player)| player.points == best)
            .map(|(id, _)| id)
            .collect();

        log::info!(
            "game over after {} rounds, best score {}, winners: {}",
            self.round,
            best,
            self.winner_names().join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineOptions;

    fn human_game() -> Engine {
        Engine::new(
            EngineOptions::new()
                .num_players(2)
                .human_player(0, "tester")
                .supply_cards(["village", "smithy"])
                .seed(21),
        )
        .unwrap()
    }

    #[test]
    fn test_draw_phase_resets_counters() {
        let mut engine = human_game();
        let p0 = PlayerId::new(0);

        engine.draw_phase().unwrap();

        assert_eq!(engine.phase(), Phase::Action);
        assert_eq!(engine.round(), 1);
        assert_eq!(engine.player(p0).hand.len(), 6);
        assert_eq!(engine.player(p0).num_actions, 1);
        assert_eq!(engine.player(p0).num_buys, 1);
        assert_eq!(engine.treasure_pot(), 0);
    }

    #[test]
    fn test_treasures_and_buy() {
        let mut engine = human_game();
        let p0 = PlayerId::new(0);
        let gold = engine.cards().require("gold").unwrap();
        let silver = engine.cards().require("silver").unwrap();

        engine.draw_phase().unwrap();
        engine.player_mut(p0).hand = vec![gold, gold];
        engine.end_action_phase().unwrap();

        engine.play_treasure_card(1).unwrap();
        engine.play_treasure_card(0).unwrap();
        assert_eq!(engine.treasure_pot(), 6);
        assert_eq!(engine.player(p0).discard, vec![gold, gold]);

        engine.buy_card(silver, p0).unwrap();
        assert_eq!(engine.treasure_pot(), 3);
        assert_eq!(engine.player(p0).num_buys, 0);
        assert_eq!(engine.player(p0).discard.last(), Some(&silver));

        assert_eq!(engine.buy_card(silver, p0), Err(EngineError::NoBuysRemaining));
    }

    #[test]
    fn test_buy_requires_treasure() {
        let mut engine = human_game();
        let p0 = PlayerId::new(0);
        let province = engine.cards().require("province").unwrap();

        engine.draw_phase().unwrap();
        engine.end_action_phase().unwrap();

        let before = engine.supply().remaining(province);
        let err = engine.buy_card(province, p0).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientTreasure { cost: 8, .. }));
        assert_eq!(engine.supply().remaining(province), before);
    }

    #[test]
    fn test_play_treasure_rejects_non_treasure() {
        let mut engine = human_game();
        let p0 = PlayerId::new(0);
        let estate = engine.cards().require("estate").unwrap();

        engine.draw_phase().unwrap();
        engine.player_mut(p0).hand = vec![estate];
        engine.end_action_phase().unwrap();

        assert!(matches!(
            engine.play_treasure_card(0),
            Err(EngineError::WrongCardType { .. })
        ));
        assert!(matches!(
            engine.play_treasure_card(4),
            Err(EngineError::HandIndexOutOfRange { index: 4, len: 1 })
        ));
        assert_eq!(engine.player(p0).hand, vec![estate]);
    }

    #[test]
    fn test_end_turn_cleans_up() {
        let mut engine = human_game();
        let p0 = PlayerId::new(0);
        let village = engine.cards().require("village").unwrap();

        engine.player_mut(p0).hand.push(village);
        engine.draw_phase().unwrap();
        engine.play_action_card(p0, village).unwrap();
        engine.end_action_phase().unwrap();
        engine.end_turn().unwrap();

        let player = engine.player(p0);
        assert_eq!(player.hand.len(), HAND_SIZE);
        assert_eq!(player.num_actions, 0);
        assert_eq!(player.num_buys, 0);
        assert!(engine.play_area().is_empty());
        assert_eq!(engine.turn(), PlayerId::new(1));
        assert_eq!(engine.phase(), Phase::Draw);
        assert_eq!(player.owned_card_count(), 11);
    }

    #[test]
    fn test_calculate_game_end_is_idempotent() {
        let mut engine = human_game();
        let province = engine.cards().require("province").unwrap();
        engine.player_mut(PlayerId::new(1)).discard.push(province);

        engine.calculate_game_end();
        let points: Vec<_> = engine.players().map(|(_, p)| p.points).collect();
        let winners = engine.winners().to_vec();

        engine.calculate_game_end();
        let again: Vec<_> = engine.players().map(|(_, p)| p.points).collect();

        assert_eq!(points, vec![3, 9]);
        assert_eq!(points, again);
        assert_eq!(winners, engine.winners());
        assert_eq!(winners, vec![PlayerId::new(1)]);
    }

    #[test]
    fn test_ties_share_the_win() {
        let mut engine = human_game();
        engine.calculate_game_end();

        assert_eq!(engine.winners(), &[PlayerId::new(0), PlayerId::new(1)]);
    }
}
