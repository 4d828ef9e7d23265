//! Sub-phases opened by action cards, and the continuation interpreter
//! that runs when one ends.
//!
//! ## Lifecycle
//!
//! 1. An effect calls `change_phase_using_action_card` with the sub-phase
//!    parameters and an optional `Continuation`.
//! 2. The player answers through the matching operation (`trash_cards`,
//!    `discard_cards`, `gain_card_with_check`, `discard_deck`).
//! 3. `end_action_card_phase` pops the frame and runs the continuation,
//!    which may open the next frame.
//!
//! Every operation validates its whole input before mutating, so a rejected
//! call leaves the game untouched.

use rustc_hash::FxHashSet;

use super::game::Engine;
use super::phase::{
    Continuation, DiscardState, GainState, Phase, PhaseFrame, Resolution, SpyChoice, SubPhase,
    ThiefAction, TrashState,
};
use crate::cards::{CardFilter, CardId, CardKind};
use crate::core::{EngineError, PlayerId, Result};
use crate::effects::interactive::UNLIMITED;
use crate::zones::GainLocation;

impl Engine {
    /// Open a sub-phase on top of the action phase.
    ///
    /// Called by card effects while they are being played. `then` runs when
    /// the sub-phase ends.
    pub fn change_phase_using_action_card(
        &mut self,
        sub_phase: SubPhase,
        then: Option<Continuation>,
    ) -> Result<()> {
        self.require_phase(Phase::Action, "open a sub-phase")?;
        self.push_frame(sub_phase, then);
        Ok(())
    }

    fn push_frame(&mut self, sub_phase: SubPhase, then: Option<Continuation>) {
        log::trace!("entering {} sub-phase", sub_phase.phase());
        self.frames.push(PhaseFrame { sub_phase, then });
    }

    /// Close the active sub-phase and run its continuation.
    ///
    /// Spy requires `Resolution::Spy`. Thief accepts `Resolution::Thief` or
    /// `Resolution::None` (nothing taken). Other sub-phases take `None`.
    pub fn end_action_card_phase(&mut self, resolution: Resolution) -> Result<()> {
        self.require_running()?;
        let phase = self.phase();
        let frame = self.frames.last().ok_or(EngineError::IllegalPhase {
            operation: "end a sub-phase",
            phase,
        })?;
        self.validate_resolution(frame.then.as_ref(), phase, &resolution)?;

        let Some(frame) = self.frames.pop() else {
            return Ok(());
        };
        log::trace!("leaving {} sub-phase", frame.sub_phase.phase());
        if let Some(then) = frame.then {
            self.run_continuation(then, resolution)?;
        }
        Ok(())
    }

    fn validate_resolution(
        &self,
        then: Option<&Continuation>,
        phase: Phase,
        resolution: &Resolution,
    ) -> Result<()> {
        match (then, resolution) {
            (Some(Continuation::ResolveSpy), Resolution::Spy(choices)) => {
                for &(player, _) in choices {
                    self.check_player(player)?;
                }
                Ok(())
            }
            (Some(Continuation::ResolveSpy), _) => Err(EngineError::MissingResolution { phase }),
            (Some(&Continuation::ResolveThief { thief }), Resolution::Thief(choices)) => {
                let mut seen = FxHashSet::default();
                for &(victim, choice) in choices {
                    self.check_player(victim)?;
                    if victim == thief {
                        return Err(EngineError::InvalidResolution(format!(
                            "{victim} cannot steal from themselves"
                        )));
                    }
                    if !seen.insert(victim) {
                        return Err(EngineError::InvalidResolution(format!(
                            "more than one choice for {victim}"
                        )));
                    }
                    let revealed = &self.players[victim].revealed_cards;
                    let card = *revealed.get(choice.index).ok_or_else(|| {
                        EngineError::InvalidResolution(format!(
                            "{victim} revealed {} cards, index {} chosen",
                            revealed.len(),
                            choice.index
                        ))
                    })?;
                    if !self.cards.is_kind(card, CardKind::Treasure) {
                        return Err(EngineError::WrongCardType {
                            card: self.cards.name(card),
                            expected: CardKind::Treasure.to_string(),
                        });
                    }
                }
                Ok(())
            }
            (_, Resolution::None) => Ok(()),
            (_, other) => Err(EngineError::InvalidResolution(format!(
                "{phase} phase does not take {other:?}"
            ))),
        }
    }

    fn run_continuation(&mut self, then: Continuation, resolution: Resolution) -> Result<()> {
        match then {
            Continuation::GainAfterTrash {
                trash_len,
                bonus,
                filter,
            } => match self.trash.get(trash_len).copied() {
                Some(trashed) => {
                    let cost = self.cards.lookup(trashed)?.cost;
                    self.push_frame(
                        SubPhase::Gain(GainState {
                            remaining: 1,
                            max_cost: cost + bonus,
                            filter,
                            location: GainLocation::Discard,
                        }),
                        None,
                    );
                }
                None => log::debug!("nothing trashed, skipping the follow-up gain"),
            },
            Continuation::PayoutIfTrashed { trash_len, gold } => {
                if self.trash.len() > trash_len {
                    self.treasure_pot += gold;
                }
            }
            Continuation::DrawPerDiscard {
                player,
                discard_len,
            } => {
                let discarded = self.players[player].discard.len().saturating_sub(discard_len);
                self.draw_cards(player, discarded);
            }
            Continuation::ResolveSpy => {
                let choices = match resolution {
                    Resolution::Spy(choices) => choices,
                    _ => Default::default(),
                };
                for player in self.player_ids() {
                    let choice = choices
                        .iter()
                        .find(|(p, _)| *p == player)
                        .map_or(SpyChoice::Discard, |&(_, choice)| choice);
                    let seat = &mut self.players[player];
                    let revealed = std::mem::take(&mut seat.revealed_cards);
                    match choice {
                        SpyChoice::Deck => seat.deck.extend(revealed),
                        SpyChoice::Discard => seat.discard.extend(revealed),
                    }
                }
            }
            Continuation::ResolveThief { thief } => {
                let choices = match resolution {
                    Resolution::Thief(choices) => choices,
                    _ => Default::default(),
                };
                for victim in self.other_players(thief) {
                    let mut revealed = std::mem::take(&mut self.players[victim].revealed_cards);
                    if let Some(&(_, choice)) = choices.iter().find(|(p, _)| *p == victim) {
                        let card = revealed.remove(choice.index);
                        match choice.action {
                            ThiefAction::Trash => self.trash.push(card),
                            ThiefAction::Gain => self.players[thief].discard.push(card),
                        }
                        log::debug!(
                            "{} took {} from {} ({:?})",
                            self.players[thief].name,
                            self.cards.name(card),
                            self.players[victim].name,
                            choice.action
                        );
                    }
                    self.players[victim].discard.append(&mut revealed);
                }
            }
            Continuation::ResolveAdventurer { player } => {
                let revealed = std::mem::take(&mut self.players[player].revealed_cards);
                let (treasures, rest): (Vec<CardId>, Vec<CardId>) = revealed
                    .into_iter()
                    .partition(|&card| self.cards.is_kind(card, CardKind::Treasure));
                let seat = &mut self.players[player];
                seat.hand.extend(treasures);
                seat.discard.extend(rest);
            }
            Continuation::ResolveBureaucrat { victims } => {
                for victim in victims {
                    let seat = &mut self.players[victim];
                    let revealed = std::mem::take(&mut seat.revealed_cards);
                    seat.deck.extend(revealed);
                }
            }
        }
        Ok(())
    }

    fn top_sub_phase_mut(&mut self) -> Option<&mut SubPhase> {
        self.frames.last_mut().map(|frame| &mut frame.sub_phase)
    }

    fn trash_state(&self) -> Option<TrashState> {
        match self.sub_phase() {
            Some(SubPhase::Trash(state)) => Some(*state),
            _ => None,
        }
    }

    fn gain_state(&self) -> Option<GainState> {
        match self.sub_phase() {
            Some(SubPhase::Gain(state)) => Some(*state),
            _ => None,
        }
    }

    fn discard_state(&self) -> Option<DiscardState> {
        match self.sub_phase() {
            Some(SubPhase::Discard(state)) => Some(state.clone()),
            _ => None,
        }
    }

    /// Check hand indices for range and duplicates. Returns them sorted
    /// highest first, ready for removal.
    fn checked_indices(&self, player: PlayerId, indices: &[usize]) -> Result<Vec<usize>> {
        self.check_player(player)?;
        let len = self.players[player].hand.len();
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(EngineError::DuplicateIndex { index: pair[0] });
            }
        }
        if let Some(&index) = sorted.first() {
            if index >= len {
                return Err(EngineError::HandIndexOutOfRange { index, len });
            }
        }
        Ok(sorted)
    }

    fn check_filter(&self, card: CardId, filter: CardFilter) -> Result<()> {
        let definition = self.cards.lookup(card)?;
        if filter.accepts(definition.kind) {
            Ok(())
        } else {
            Err(EngineError::WrongCardType {
                card: definition.name.clone(),
                expected: filter.to_string(),
            })
        }
    }

    /// Trash the cards at `indices` in `player`'s hand.
    ///
    /// Checks the active trash sub-phase's count, type and name limits.
    /// With `no_verify` the phase and those limits are skipped; only the
    /// indices are checked. Fails with `GameOver` either way once the game
    /// has ended.
    pub fn trash_cards(&mut self, player: PlayerId, indices: &[usize], no_verify: bool) -> Result<()> {
        self.require_running()?;
        let state = self.trash_state();
        if !no_verify {
            self.require_phase(Phase::Trash, "trash cards")?;
        }
        let sorted = self.checked_indices(player, indices)?;

        if let (Some(state), false) = (state, no_verify) {
            if sorted.len() as u64 > u64::from(state.remaining) {
                return Err(EngineError::TooManyCards {
                    max: state.remaining,
                    requested: sorted.len(),
                });
            }
            for &index in &sorted {
                let card = self.players[player].hand[index];
                self.check_filter(card, state.filter)?;
                if let Some(name) = state.name {
                    if card != name {
                        return Err(EngineError::WrongCardName {
                            card: self.cards.name(card),
                            expected: self.cards.name(name),
                        });
                    }
                }
            }
        }

        for &index in &sorted {
            let card = self.players[player].hand.remove(index);
            log::debug!("{} trashed {}", self.players[player].name, self.cards.name(card));
            self.trash.push(card);
        }
        if let Some(SubPhase::Trash(state)) = self.top_sub_phase_mut() {
            state.remaining = state.remaining.saturating_sub(sorted.len() as u32);
        }
        Ok(())
    }

    /// Discard the cards at `indices` in `player`'s hand within the active
    /// discard sub-phase's limits.
    pub fn discard_cards(&mut self, player: PlayerId, indices: &[usize]) -> Result<()> {
        self.require_phase(Phase::Discard, "discard cards")?;
        let Some(state) = self.discard_state() else {
            return Ok(());
        };
        let sorted = self.checked_indices(player, indices)?;

        if state.remaining != UNLIMITED && sorted.len() as u64 > u64::from(state.remaining) {
            return Err(EngineError::TooManyCards {
                max: state.remaining,
                requested: sorted.len(),
            });
        }
        for &index in &sorted {
            if let Some(range) = &state.range {
                if !range.contains(&index) {
                    return Err(EngineError::DiscardOutOfRange {
                        index,
                        start: range.start,
                        end: range.end,
                    });
                }
            }
            self.check_filter(self.players[player].hand[index], state.filter)?;
        }

        for &index in &sorted {
            self.players[player].discard_card(index);
        }
        let count = sorted.len();
        if let Some(SubPhase::Discard(state)) = self.top_sub_phase_mut() {
            if state.remaining != UNLIMITED {
                state.remaining = state.remaining.saturating_sub(count as u32);
            }
            if let Some(range) = &mut state.range {
                range.end = range.end.saturating_sub(count).max(range.start);
            }
        }
        log::trace!("{} discarded {} cards", self.players[player].name, count);
        Ok(())
    }

    /// Gain `card` within the active gain sub-phase's cost and type limits.
    pub fn gain_card_with_check(&mut self, card: CardId, player: PlayerId) -> Result<()> {
        self.require_phase(Phase::Gain, "gain a card")?;
        self.check_player(player)?;
        let Some(state) = self.gain_state() else {
            return Ok(());
        };
        if state.remaining == 0 {
            return Err(EngineError::NoGainsRemaining);
        }
        let definition = self.cards.lookup(card)?;
        if definition.cost > state.max_cost {
            return Err(EngineError::GainCostExceeded {
                card: definition.name.clone(),
                cost: definition.cost,
                max_cost: state.max_cost,
            });
        }
        self.check_filter(card, state.filter)?;
        if self.supply.remaining(card) == 0 {
            return Err(EngineError::PileEmpty {
                card: definition.name.clone(),
            });
        }

        self.gain_card(card, player, state.location)?;
        if let Some(SubPhase::Gain(state)) = self.top_sub_phase_mut() {
            state.remaining -= 1;
        }
        Ok(())
    }

    /// Put `player`'s whole deck into their discard pile.
    pub fn discard_deck(&mut self, player: PlayerId) -> Result<()> {
        self.require_phase(Phase::DiscardDeck, "discard the deck")?;
        self.check_player(player)?;
        let seat = &mut self.players[player];
        let mut deck = std::mem::take(&mut seat.deck);
        log::debug!("{} discarded their deck of {} cards", seat.name, deck.len());
        seat.discard.append(&mut deck);
        Ok(())
    }

    /// Cards still trashable in the active trash sub-phase, else 0.
    #[must_use]
    pub fn num_trash(&self) -> u32 {
        self.trash_state().map_or(0, |state| state.remaining)
    }

    /// Gains left in the active gain sub-phase, else 0.
    #[must_use]
    pub fn num_gain(&self) -> u32 {
        self.gain_state().map_or(0, |state| state.remaining)
    }

    /// Discards left in the active discard sub-phase, else 0.
    #[must_use]
    pub fn num_discard(&self) -> u32 {
        self.discard_state().map_or(0, |state| state.remaining)
    }

    /// Cost limit of the active gain sub-phase, else 0.
    #[must_use]
    pub fn max_gain_cost(&self) -> u32 {
        self.gain_state().map_or(0, |state| state.max_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineOptions;

    fn in_action_phase() -> (Engine, PlayerId) {
        let mut engine = Engine::new(
            EngineOptions::new()
                .num_players(2)
                .human_player(0, "tester")
                .seed(3),
        )
        .unwrap();
        engine.draw_phase().unwrap();
        (engine, PlayerId::new(0))
    }

    fn id(engine: &Engine, name: &str) -> CardId {
        engine.cards().require(name).unwrap()
    }

    #[test]
    fn test_accessors_neutral_without_sub_phase() {
        let (engine, _) = in_action_phase();

        assert_eq!(engine.num_trash(), 0);
        assert_eq!(engine.num_gain(), 0);
        assert_eq!(engine.num_discard(), 0);
        assert_eq!(engine.max_gain_cost(), 0);
        assert!(engine.sub_phase().is_none());
    }

    #[test]
    fn test_trash_respects_count_and_name() {
        let (mut engine, p0) = in_action_phase();
        let copper = id(&engine, "copper");
        let estate = id(&engine, "estate");
        engine.player_mut(p0).hand = vec![estate, copper, copper];
        engine
            .change_phase_using_action_card(
                SubPhase::Trash(TrashState {
                    remaining: 1,
                    filter: CardFilter::Kind(CardKind::Treasure),
                    name: Some(copper),
                }),
                None,
            )
            .unwrap();

        assert!(matches!(
            engine.trash_cards(p0, &[1, 2], false),
            Err(EngineError::TooManyCards { max: 1, requested: 2 })
        ));
        assert!(matches!(
            engine.trash_cards(p0, &[0], false),
            Err(EngineError::WrongCardType { .. })
        ));
        assert_eq!(engine.player(p0).hand.len(), 3);

        engine.trash_cards(p0, &[2], false).unwrap();
        assert_eq!(engine.trash(), &[copper]);
        assert_eq!(engine.num_trash(), 0);
    }

    #[test]
    fn test_trash_rejects_bad_indices() {
        let (mut engine, p0) = in_action_phase();
        engine
            .change_phase_using_action_card(
                SubPhase::Trash(TrashState {
                    remaining: 4,
                    filter: CardFilter::Any,
                    name: None,
                }),
                None,
            )
            .unwrap();

        assert_eq!(
            engine.trash_cards(p0, &[1, 1], false),
            Err(EngineError::DuplicateIndex { index: 1 })
        );
        assert_eq!(
            engine.trash_cards(p0, &[0, 9], false),
            Err(EngineError::HandIndexOutOfRange { index: 9, len: 6 })
        );
        assert!(engine.trash().is_empty());
    }

    #[test]
    fn test_trash_without_verification() {
        let (mut engine, p0) = in_action_phase();

        engine.trash_cards(p0, &[0, 1], true).unwrap();
        assert_eq!(engine.trash().len(), 2);
        assert_eq!(engine.player(p0).hand.len(), 4);
        assert!(matches!(
            engine.trash_cards(p0, &[0], false),
            Err(EngineError::IllegalPhase { .. })
        ));
    }

    #[test]
    fn test_trash_then_gain_chain() {
        let (mut engine, p0) = in_action_phase();
        let estate = id(&engine, "estate");
        engine.player_mut(p0).hand = vec![estate];
        let trash_len = engine.trash().len();
        engine
            .change_phase_using_action_card(
                SubPhase::Trash(TrashState {
                    remaining: 1,
                    filter: CardFilter::Any,
                    name: None,
                }),
                Some(Continuation::GainAfterTrash {
                    trash_len,
                    bonus: 2,
                    filter: CardFilter::Any,
                }),
            )
            .unwrap();

        engine.trash_cards(p0, &[0], false).unwrap();
        engine.end_action_card_phase(Resolution::None).unwrap();

        assert_eq!(engine.phase(), Phase::Gain);
        assert_eq!(engine.max_gain_cost(), 4);
        assert_eq!(engine.num_gain(), 1);

        let gold = id(&engine, "gold");
        assert!(matches!(
            engine.gain_card_with_check(gold, p0),
            Err(EngineError::GainCostExceeded { cost: 6, max_cost: 4, .. })
        ));
        let silver = id(&engine, "silver");
        engine.gain_card_with_check(silver, p0).unwrap();
        assert_eq!(engine.num_gain(), 0);
        assert_eq!(
            engine.gain_card_with_check(silver, p0),
            Err(EngineError::NoGainsRemaining)
        );

        engine.end_action_card_phase(Resolution::None).unwrap();
        assert_eq!(engine.phase(), Phase::Action);
    }

    #[test]
    fn test_skipped_trash_skips_gain() {
        let (mut engine, _) = in_action_phase();
        engine
            .change_phase_using_action_card(
                SubPhase::Trash(TrashState {
                    remaining: 1,
                    filter: CardFilter::Any,
                    name: None,
                }),
                Some(Continuation::GainAfterTrash {
                    trash_len: 0,
                    bonus: 2,
                    filter: CardFilter::Any,
                }),
            )
            .unwrap();

        engine.end_action_card_phase(Resolution::None).unwrap();
        assert_eq!(engine.phase(), Phase::Action);
    }

    #[test]
    fn test_discard_range_shrinks() {
        let (mut engine, p0) = in_action_phase();
        let village = id(&engine, "village");
        let copper = id(&engine, "copper");
        engine.player_mut(p0).hand = vec![village, copper, village, village];
        engine
            .change_phase_using_action_card(
                SubPhase::Discard(DiscardState {
                    remaining: UNLIMITED,
                    filter: CardFilter::Kind(CardKind::Action),
                    range: Some(2..4),
                }),
                None,
            )
            .unwrap();

        assert!(matches!(
            engine.discard_cards(p0, &[0]),
            Err(EngineError::DiscardOutOfRange { index: 0, start: 2, end: 4 })
        ));
        engine.discard_cards(p0, &[3]).unwrap();
        match engine.sub_phase() {
            Some(SubPhase::Discard(state)) => assert_eq!(state.range, Some(2..3)),
            other => panic!("unexpected sub-phase {other:?}"),
        }
        assert_eq!(engine.num_discard(), UNLIMITED);
        assert_eq!(engine.player(p0).hand, vec![village, copper, village]);
    }

    #[test]
    fn test_spy_requires_resolution() {
        let (mut engine, _) = in_action_phase();
        engine
            .change_phase_using_action_card(SubPhase::Spy, Some(Continuation::ResolveSpy))
            .unwrap();

        assert_eq!(
            engine.end_action_card_phase(Resolution::None),
            Err(EngineError::MissingResolution { phase: Phase::Spy })
        );
        assert_eq!(engine.phase(), Phase::Spy);
    }

    #[test]
    fn test_mismatched_resolution() {
        let (mut engine, _) = in_action_phase();
        engine
            .change_phase_using_action_card(SubPhase::DiscardDeck, None)
            .unwrap();

        let result = engine.end_action_card_phase(Resolution::Spy(Default::default()));
        assert!(matches!(result, Err(EngineError::InvalidResolution(_))));
        assert_eq!(engine.phase(), Phase::DiscardDeck);
    }

    #[test]
    fn test_end_without_sub_phase() {
        let (mut engine, _) = in_action_phase();

        assert!(matches!(
            engine.end_action_card_phase(Resolution::None),
            Err(EngineError::IllegalPhase { phase: Phase::Action, .. })
        ));
    }
}
