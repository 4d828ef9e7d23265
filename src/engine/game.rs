//! The engine aggregate: construction, accessors and card movement
//! primitives shared by the phase operations and card effects.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::phase::{PhaseFrame, Phase, Step, SubPhase};
use crate::cards::catalog::{is_implemented_kingdom, standard_cards, BASE_KINGDOM, KINGDOM_PILES};
use crate::cards::{CardId, CardKind, CardRegistry};
use crate::core::{EngineError, EngineOptions, GameRng, Player, PlayerId, PlayerMap, Result};
use crate::effects::FirstPlayBonus;
use crate::strategy::ai_roster;
use crate::zones::{Census, GainLocation, Supply};

/// Cards dealt to each player at setup.
pub const STARTING_COPPERS: usize = 7;
pub const STARTING_ESTATES: usize = 3;
/// Cards drawn at cleanup.
pub const HAND_SIZE: usize = 5;

/// A single game of the deck-builder.
///
/// The engine owns every zone and counter. Human-driven play goes through
/// the discrete phase operations (`draw_phase`, `play_action_card`,
/// `buy_card`, ...); automated seats go through `do_turn`.
///
/// ## Example
///
/// ```
/// use rust_dominion::core::EngineOptions;
/// use rust_dominion::engine::{Engine, Phase};
///
/// let mut engine = Engine::new(EngineOptions::new().num_players(2).seed(1)).unwrap();
/// assert_eq!(engine.phase(), Phase::Draw);
///
/// let winners = engine.play_game().unwrap();
/// assert!(engine.is_game_over());
/// assert!(!winners.is_empty());
/// ```
pub struct Engine {
    pub(crate) cards: CardRegistry,
    pub(crate) supply: Supply,
    /// Supply as dealt at setup, before starting decks were taken.
    pub(crate) initial_supply: Supply,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) trash: Vec<CardId>,
    pub(crate) play_area: Vec<CardId>,
    pub(crate) turn: PlayerId,
    pub(crate) step: Step,
    pub(crate) frames: Vec<PhaseFrame>,
    pub(crate) round: u32,
    pub(crate) treasure_pot: u32,
    pub(crate) first_play_bonus: FxHashMap<CardId, FirstPlayBonus>,
    pub(crate) is_game_over: bool,
    pub(crate) winners: Vec<PlayerId>,
    pub(crate) rng: GameRng,
    pub(crate) human_player: Option<PlayerId>,
    pub(crate) three_pile_ending: bool,
    pub(crate) max_rounds: Option<u32>,
}

impl Engine {
    /// Build a game: catalog, supply, players, starting decks and opening hands.
    pub fn new(options: EngineOptions) -> Result<Self> {
        options.validate()?;

        let mut rng = options.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let cards = standard_cards();
        let supply = build_supply(&cards, options.num_players, &options.supply_cards, &mut rng)?;
        let human_player = options.human_player_index.map(|i| PlayerId::new(i as u8));
        let three_pile_ending = options.three_pile_ending;
        let max_rounds = options.max_rounds;
        let players = seat_players(options, &mut rng)?;

        let mut engine = Self {
            cards,
            initial_supply: supply.clone(),
            supply,
            players,
            trash: Vec::new(),
            play_area: Vec::new(),
            turn: PlayerId::new(0),
            step: Step::Draw,
            frames: Vec::new(),
            round: 0,
            treasure_pot: 0,
            first_play_bonus: FxHashMap::default(),
            is_game_over: false,
            winners: Vec::new(),
            rng,
            human_player,
            three_pile_ending,
            max_rounds,
        };
        engine.deal_starting_decks()?;
        engine.deal_hands();
        log::debug!(
            "setup complete: {} players, seed {}",
            engine.num_players(),
            engine.rng.seed()
        );
        Ok(engine)
    }

    fn deal_starting_decks(&mut self) -> Result<()> {
        let estate = self.cards.require("estate")?;
        let copper = self.cards.require("copper")?;

        for player in self.player_ids() {
            for _ in 0..STARTING_ESTATES {
                self.gain_card(estate, player, GainLocation::DeckTop)?;
            }
            for _ in 0..STARTING_COPPERS {
                self.gain_card(copper, player, GainLocation::DeckTop)?;
            }
            let deck = &mut self.players[player].deck;
            self.rng.shuffle(deck);
        }
        Ok(())
    }

    fn deal_hands(&mut self) {
        for player in self.player_ids() {
            self.draw_cards(player, HAND_SIZE);
        }
    }

    // === Accessors ===

    /// The observable phase: the top sub-phase if one is open, else the turn step.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.frames
            .last()
            .map_or_else(|| self.step.phase(), |frame| frame.sub_phase.phase())
    }

    /// The active sub-phase, if any.
    #[must_use]
    pub fn sub_phase(&self) -> Option<&SubPhase> {
        self.frames.last().map(|frame| &frame.sub_phase)
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn treasure_pot(&self) -> u32 {
        self.treasure_pot
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    #[must_use]
    pub fn trash(&self) -> &[CardId] {
        &self.trash
    }

    #[must_use]
    pub fn play_area(&self) -> &[CardId] {
        &self.play_area
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.player_count()
    }

    pub fn player_ids(&self) -> SmallVec<[PlayerId; 6]> {
        self.players.player_ids().collect()
    }

    /// Every seat except `player`, in turn order.
    pub fn other_players(&self, player: PlayerId) -> SmallVec<[PlayerId; 6]> {
        self.players.player_ids().filter(|&p| p != player).collect()
    }

    /// Panics if the seat does not exist.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Panics if the seat does not exist.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    /// Seat of the human player, if one was configured.
    #[must_use]
    pub fn human_player(&self) -> Option<PlayerId> {
        self.human_player
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Players tied for the best score. Empty until the game ends or
    /// `calculate_game_end` is called.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    /// Names of the winning players.
    #[must_use]
    pub fn winner_names(&self) -> Vec<String> {
        self.winners
            .iter()
            .map(|&p| self.players[p].name.clone())
            .collect()
    }

    /// Pending first-play bonus for a card.
    #[must_use]
    pub fn first_play_bonus(&self, card: CardId) -> Option<FirstPlayBonus> {
        self.first_play_bonus.get(&card).copied()
    }

    pub(crate) fn check_player(&self, player: PlayerId) -> Result<()> {
        if player.index() < self.num_players() {
            Ok(())
        } else {
            Err(EngineError::UnknownPlayer(player))
        }
    }

    // === Card movement ===

    /// Draw the top card of `player`'s deck into their hand.
    ///
    /// An empty deck is refilled by shuffling the discard pile. Returns
    /// `None` when both are empty; running out near the end is expected.
    pub fn draw_card(&mut self, player: PlayerId) -> Option<CardId> {
        let card = self.pop_deck(player)?;
        self.players[player].hand.push(card);
        log::trace!("{} drew {}", self.players[player].name, self.cards.name(card));
        Some(card)
    }

    /// Like `draw_card`, but the card goes to the player's revealed zone.
    pub fn reveal_card(&mut self, player: PlayerId) -> Option<CardId> {
        let card = self.pop_deck(player)?;
        self.players[player].revealed_cards.push(card);
        log::trace!("{} revealed {}", self.players[player].name, self.cards.name(card));
        Some(card)
    }

    /// Draw up to `n` cards. Returns how many were actually drawn.
    pub fn draw_cards(&mut self, player: PlayerId, n: usize) -> usize {
        (0..n).take_while(|_| self.draw_card(player).is_some()).count()
    }

    fn pop_deck(&mut self, player: PlayerId) -> Option<CardId> {
        let seat = &mut self.players[player];
        if seat.deck.is_empty() {
            if seat.discard.is_empty() {
                return None;
            }
            seat.deck = std::mem::take(&mut seat.discard);
            self.rng.shuffle(&mut seat.deck);
            log::trace!("{} reshuffled {} cards", seat.name, seat.deck.len());
        }
        seat.deck.pop()
    }

    /// Take one card from the supply for `player`.
    ///
    /// Victory cards bump the player's running point total.
    pub fn take_card(&mut self, card: CardId, player: PlayerId) -> Result<CardId> {
        self.check_player(player)?;
        let definition = self.cards.lookup(card)?;
        if !self.supply.take(card) {
            return Err(EngineError::PileEmpty {
                card: definition.name.clone(),
            });
        }
        if definition.kind == CardKind::Victory {
            self.players[player].points += definition.points;
        }
        Ok(card)
    }

    /// Take a card from the supply and place it for `player`. Only checks
    /// that the pile has cards left.
    pub fn gain_card(&mut self, card: CardId, player: PlayerId, location: GainLocation) -> Result<CardId> {
        self.take_card(card, player)?;
        let seat = &mut self.players[player];
        match location {
            GainLocation::Discard => seat.discard.push(card),
            GainLocation::DeckTop => seat.deck.push(card),
        }
        log::debug!("{} gained {}", seat.name, self.cards.name(card));
        Ok(card)
    }

    // === Conservation ===

    /// Count every card in every zone: player zones, play area, trash and supply.
    #[must_use]
    pub fn census(&self) -> Census {
        let mut census = Census::new();
        for (_, player) in self.players.iter() {
            census.add_cards(player.owned_cards());
            census.add_cards(player.revealed_cards.iter().copied());
        }
        census.add_cards(self.play_area.iter().copied());
        census.add_cards(self.trash.iter().copied());
        for (card, count) in self.supply.iter() {
            census.add_many(card, u64::from(count));
        }
        census
    }

    /// Per-card totals fixed at setup. `census()` always equals this.
    #[must_use]
    pub fn initial_census(&self) -> Census {
        let mut census = Census::new();
        for (card, count) in self.initial_supply.iter() {
            census.add_many(card, u64::from(count));
        }
        census
    }

    /// The supply as it was before starting decks were dealt.
    #[must_use]
    pub fn initial_supply(&self) -> &Supply {
        &self.initial_supply
    }
}

/// Base piles plus 10 kingdom piles.
fn build_supply(
    cards: &CardRegistry,
    num_players: usize,
    pinned: &[String],
    rng: &mut GameRng,
) -> Result<Supply> {
    if pinned.len() > KINGDOM_PILES {
        return Err(EngineError::TooManyKingdomPiles(pinned.len()));
    }

    let n = num_players as u32;
    let victory_count = if num_players == 2 { 8 } else { 12 };

    let mut supply = Supply::new();
    let mut pile = |name: &str, count: u32| -> Result<()> {
        supply.set_pile(cards.require(name)?, count);
        Ok(())
    };
    pile("copper", 60 + 7 * n)?;
    pile("silver", 40)?;
    pile("gold", 30)?;
    pile("estate", victory_count + 3 * n)?;
    pile("duchy", victory_count)?;
    pile("province", victory_count)?;
    pile("curse", (n - 1) * 10)?;

    let mut kingdom: Vec<&str> = Vec::with_capacity(KINGDOM_PILES);
    for name in pinned {
        if !is_implemented_kingdom(name) || kingdom.contains(&name.as_str()) {
            return Err(EngineError::UnimplementedKingdomCard(name.clone()));
        }
        kingdom.push(name.as_str());
    }
    let pool: Vec<&str> = BASE_KINGDOM
        .iter()
        .copied()
        .filter(|name| !kingdom.contains(name))
        .collect();
    kingdom.extend(rng.sample(&pool, KINGDOM_PILES - kingdom.len()));

    for name in kingdom {
        let card = cards
            .by_name(name)
            .ok_or_else(|| EngineError::UnimplementedKingdomCard(name.to_string()))?;
        let count = match card.kind {
            CardKind::Victory => victory_count,
            _ => 10,
        };
        supply.set_pile(card.id, count);
    }
    Ok(supply)
}

/// Fill seats: injected players first, then the human seat, then AI players
/// drawn from the roster without replacement.
fn seat_players(options: EngineOptions, rng: &mut GameRng) -> Result<PlayerMap<Player>> {
    let EngineOptions {
        num_players,
        human_player_index,
        human_player_name,
        players: injected,
        ..
    } = options;

    let mut injected = injected.into_iter();
    let mut roster = ai_roster();
    let mut human_name = human_player_name;
    let mut seats = Vec::with_capacity(num_players);

    for index in 0..num_players {
        let player = if let Some(player) = injected.next() {
            player
        } else if human_player_index == Some(index) {
            let name = human_name.take().ok_or(EngineError::MissingHumanName)?;
            Player::human(name)
        } else {
            rng.take_random(&mut roster)
                .ok_or(EngineError::InvalidPlayerCount(num_players))?
        };
        seats.push(player);
    }
    Ok(PlayerMap::from_vec(seats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(players: usize) -> Engine {
        Engine::new(EngineOptions::new().num_players(players).seed(11)).unwrap()
    }

    #[test]
    fn test_supply_sizes() {
        for n in 2..=6 {
            let engine = engine(n);
            let initial = engine.initial_supply();
            let id = |name| engine.cards().id_of(name).unwrap();
            let v = if n == 2 { 8 } else { 12 };

            assert_eq!(initial.remaining(id("copper")), 60 + 7 * n as u32);
            assert_eq!(initial.remaining(id("silver")), 40);
            assert_eq!(initial.remaining(id("gold")), 30);
            assert_eq!(initial.remaining(id("estate")), v + 3 * n as u32);
            assert_eq!(initial.remaining(id("duchy")), v);
            assert_eq!(initial.remaining(id("province")), v);
            assert_eq!(initial.remaining(id("curse")), (n as u32 - 1) * 10);
            assert_eq!(initial.len(), 17);

            assert_eq!(engine.supply().remaining(id("copper")), 60);
            assert_eq!(engine.supply().remaining(id("estate")), v);
        }
    }

    #[test]
    fn test_starting_hands() {
        let engine = engine(4);

        for (_, player) in engine.players() {
            assert_eq!(player.hand.len(), HAND_SIZE);
            assert_eq!(player.deck.len(), 5);
            assert_eq!(player.owned_card_count(), 10);
            assert_eq!(player.points, 3);
            assert!(!player.is_human());
        }
        assert_eq!(engine.phase(), Phase::Draw);
        assert_eq!(engine.turn(), PlayerId::new(0));
    }

    #[test]
    fn test_pinned_kingdom() {
        let engine = Engine::new(
            EngineOptions::new()
                .num_players(3)
                .supply_cards(["merchant", "gardens"])
                .seed(5),
        )
        .unwrap();
        let id = |name| engine.cards().id_of(name).unwrap();

        assert_eq!(engine.supply().remaining(id("merchant")), 10);
        assert_eq!(engine.supply().remaining(id("gardens")), 12);
    }

    #[test]
    fn test_unimplemented_kingdom_card() {
        let result = Engine::new(EngineOptions::new().supply_cards(["militia"]).seed(1));
        assert_eq!(
            result.err(),
            Some(EngineError::UnimplementedKingdomCard("militia".into()))
        );

        let result = Engine::new(EngineOptions::new().supply_cards(["throne room"]).seed(1));
        assert!(matches!(result, Err(EngineError::UnimplementedKingdomCard(_))));
    }

    #[test]
    fn test_same_seed_same_setup() {
        let a = engine(3);
        let b = engine(3);

        let names = |e: &Engine| e.players().map(|(_, p)| p.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.supply(), b.supply());
        for (id, player) in a.players() {
            assert_eq!(player.hand, b.player(id).hand);
        }
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut engine = engine(2);
        let p0 = PlayerId::new(0);

        let player = engine.player_mut(p0);
        let deck = std::mem::take(&mut player.deck);
        player.discard = deck;

        assert!(engine.draw_card(p0).is_some());
        assert_eq!(engine.player(p0).deck.len(), 4);
        assert!(engine.player(p0).discard.is_empty());
    }

    #[test]
    fn test_draw_from_nothing() {
        let mut engine = engine(2);
        let p0 = PlayerId::new(0);
        engine.player_mut(p0).deck.clear();

        assert_eq!(engine.draw_card(p0), None);
        assert_eq!(engine.draw_cards(p0, 3), 0);
        assert_eq!(engine.player(p0).hand.len(), HAND_SIZE);
    }

    #[test]
    fn test_census_matches_setup() {
        let engine = engine(5);
        assert_eq!(engine.census(), engine.initial_census());
    }
}
