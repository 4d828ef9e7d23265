//! Automated turns: drive the phase operations from a seat's strategy.

use super::game::Engine;
use super::phase::{Phase, Resolution, SubPhase};
use crate::cards::CardFilter;
use crate::core::{EngineError, PlayerId, Result};
use crate::effects::EffectDelta;
use crate::strategy::{PlayerStrategy, TurnView};

impl Engine {
    fn turn_view(&self, seat: PlayerId) -> TurnView<'_> {
        TurnView {
            seat,
            player: &self.players[seat],
            players: &self.players,
            supply: &self.supply,
            cards: &self.cards,
            treasure_pot: self.treasure_pot,
        }
    }

    /// Play one whole turn for the current seat using its strategy.
    ///
    /// Does nothing once the game is over. Fails with `HumanTurn` for a
    /// seat without a strategy, and with `IllegalPhase` unless called at
    /// the start of a turn.
    pub fn do_turn(&mut self) -> Result<()> {
        if self.is_game_over {
            log::warn!("game is over, nothing to do");
            return Ok(());
        }

        let seat = self.turn;
        if self.human_player == Some(seat) || self.players[seat].is_human() {
            return Err(EngineError::HumanTurn(self.players[seat].name.clone()));
        }
        self.require_phase(Phase::Draw, "automate a turn")?;

        let Some(mut strategy) = self.players[seat].strategy.take() else {
            return Err(EngineError::HumanTurn(self.players[seat].name.clone()));
        };
        let result = self.run_turn(seat, strategy.as_mut());
        self.players[seat].strategy = Some(strategy);
        result
    }

    /// Run `do_turn` until the game ends. Returns the winners.
    pub fn play_game(&mut self) -> Result<Vec<PlayerId>> {
        while !self.is_game_over {
            self.do_turn()?;
        }
        Ok(self.winners.clone())
    }

    fn run_turn(&mut self, seat: PlayerId, strategy: &mut dyn PlayerStrategy) -> Result<()> {
        self.draw_phase()?;

        while self.players[seat].num_actions > 0 {
            let Some(card) = strategy.action_turn(&self.turn_view(seat)) else {
                break;
            };
            let delta = self.play_action_card(seat, card)?;
            self.resolve_sub_phases(seat, strategy, &delta)?;
        }
        self.end_action_phase()?;

        while self.players[seat].num_buys > 0 {
            let mut treasures = strategy.play_treasures(&self.turn_view(seat));
            treasures.sort_unstable_by(|a, b| b.cmp(a));
            treasures.dedup();
            for index in treasures {
                self.play_treasure_card(index)?;
            }

            let Some(card) = strategy.buy_turn(&self.turn_view(seat)) else {
                log::debug!("{} does not buy anything this turn", self.players[seat].name);
                break;
            };
            if self.supply.remaining(card) == 0 {
                log::warn!(
                    "{} wants {} but the pile is empty",
                    self.players[seat].name,
                    self.cards.name(card)
                );
                break;
            }
            let cost = self.cards.lookup(card)?.cost;
            if cost > self.treasure_pot {
                log::warn!(
                    "{} cannot afford {} with {} treasure",
                    self.players[seat].name,
                    self.cards.name(card),
                    self.treasure_pot
                );
                break;
            }
            self.buy_card(card, seat)?;
        }

        self.end_turn()
    }

    /// Answer sub-phases until the game is back in the action phase.
    fn resolve_sub_phases(
        &mut self,
        seat: PlayerId,
        strategy: &mut dyn PlayerStrategy,
        delta: &EffectDelta,
    ) -> Result<()> {
        while let Some(sub_phase) = self.sub_phase().cloned() {
            let resolution = match sub_phase {
                SubPhase::Gain(state) => {
                    let choice = strategy.gain_card(&self.turn_view(seat), &state);
                    match choice {
                        Some(card) if self.supply.remaining(card) == 0 => {
                            log::warn!("cannot gain {}, pile empty", self.cards.name(card));
                        }
                        Some(card) => self.gain_card_with_check(card, seat)?,
                        None => log::debug!("{} gains nothing", self.players[seat].name),
                    }
                    Resolution::None
                }
                SubPhase::Trash(state) => {
                    let view = self.turn_view(seat);
                    let indices = if delta.links_trash_to_gain() {
                        strategy.trash_card_for_gain(
                            &view,
                            delta.gain_bonus_cost.unwrap_or(0),
                            state.filter,
                            delta.gain_filter.unwrap_or(CardFilter::Any),
                        )
                    } else {
                        strategy.trash_cards(&view, &state)
                    };
                    self.trash_cards(seat, &indices, false)?;
                    Resolution::None
                }
                SubPhase::Discard(state) => {
                    let indices = strategy.discard_cards(&self.turn_view(seat), &state);
                    self.discard_cards(seat, &indices)?;
                    Resolution::None
                }
                SubPhase::DiscardDeck => {
                    if strategy.discard_deck(&self.turn_view(seat)) {
                        self.discard_deck(seat)?;
                    }
                    Resolution::None
                }
                SubPhase::Spy => Resolution::Spy(strategy.spy_choices(&self.turn_view(seat))),
                SubPhase::Thief => {
                    Resolution::Thief(strategy.thief_choices(&self.turn_view(seat)))
                }
                SubPhase::Adventurer | SubPhase::Bureaucrat => Resolution::None,
            };
            self.end_action_card_phase(resolution)?;
        }
        Ok(())
    }
}
