//! Strategy tests through `do_turn`.
//!
//! These tests verify:
//! - Every reference AI can finish a game
//! - Sub-phases opened during an automated turn are answered by the
//!   strategy's defaults
//! - Strategy errors surface from `do_turn`

use std::sync::{Arc, Mutex};

use rust_dominion::strategy::{BigMoney, BigMoneySmithy};
use rust_dominion::{
    ai_roster, CardId, Engine, EngineError, EngineOptions, Player, PlayerId, PlayerStrategy,
    TurnView,
};

/// Plays one named action card whenever it is in hand and never buys.
struct Scripted {
    action: &'static str,
    goal: Option<CardId>,
}

impl Scripted {
    fn player(action: &'static str) -> Player {
        Player::new(action, Box::new(Scripted { action, goal: None }))
    }
}

impl PlayerStrategy for Scripted {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    fn action_turn(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        view.card(self.action)
            .filter(|card| view.player.hand.contains(card))
    }

    fn buy_goal(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}

/// Delegates to another strategy and records the actions it plays.
struct Recorded<S> {
    inner: S,
    played: Arc<Mutex<Vec<CardId>>>,
}

impl<S: PlayerStrategy> PlayerStrategy for Recorded<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn action_turn(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let card = self.inner.action_turn(view);
        if let Some(card) = card {
            self.played.lock().unwrap().push(card);
        }
        card
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        self.inner.buy_goal(view)
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        self.inner.goal_slot()
    }
}

/// Two-seat game: `first` against big money, with `card` pinned and one
/// copy pushed into seat 0's hand.
fn game_with(first: Player, card: &str) -> Engine {
    let mut engine = Engine::new(
        EngineOptions::new()
            .num_players(2)
            .with_player(first)
            .with_player(Player::new("money", Box::<BigMoney>::default()))
            .supply_cards([card])
            .seed(404),
    )
    .unwrap();
    let id = engine.cards().require(card).unwrap();
    engine.player_mut(PlayerId(0)).hand.push(id);
    engine
}

fn owned(engine: &Engine, player: PlayerId, name: &str) -> usize {
    let id = engine.cards().require(name).unwrap();
    engine.player(player).owned_cards().filter(|&c| c == id).count()
}

/// Test that each reference AI finishes a game against big money.
#[test]
fn test_every_reference_ai_finishes() {
    for index in 0..ai_roster().len() {
        let ai = ai_roster().into_iter().nth(index).unwrap();
        let name = ai.name.clone();
        let mut engine = Engine::new(
            EngineOptions::new()
                .num_players(2)
                .with_player(ai)
                .with_player(Player::new("money", Box::<BigMoney>::default()))
                .supply_cards(["smithy"])
                .seed(index as u64),
        )
        .unwrap();

        let winners = engine.play_game().unwrap();

        assert!(!winners.is_empty(), "{name} game has no winner");
        assert_eq!(engine.census(), engine.initial_census(), "{name} lost cards");
    }
}

/// Test that an automated smithy player plays the smithy it holds.
#[test]
fn test_smithy_played_in_automated_turn() {
    let played = Arc::new(Mutex::new(Vec::new()));
    let strategy = Recorded {
        inner: BigMoneySmithy::default(),
        played: Arc::clone(&played),
    };
    let mut engine = game_with(Player::new("smithy", Box::new(strategy)), "smithy");
    let smithy = engine.cards().require("smithy").unwrap();

    engine.do_turn().unwrap();

    assert_eq!(*played.lock().unwrap(), vec![smithy]);
    assert_eq!(engine.turn(), PlayerId(1));
    assert!(engine.play_area().is_empty());
}

/// Test that the default trash choice in a chapel turn only trashes coppers.
#[test]
fn test_chapel_turn_trashes_copper() {
    let mut engine = game_with(Scripted::player("chapel"), "chapel");
    let copper = engine.cards().require("copper").unwrap();

    engine.do_turn().unwrap();

    let trash = engine.trash();
    assert!(!trash.is_empty());
    assert!(trash.len() <= 4);
    assert!(trash.iter().all(|&c| c == copper));
    assert_eq!(owned(&engine, PlayerId(0), "copper"), 7 - trash.len());
}

/// Test that mine trashes a copper and gains a silver through the chain.
#[test]
fn test_mine_turn_upgrades_copper() {
    let mut engine = game_with(Scripted::player("mine"), "mine");
    let copper = engine.cards().require("copper").unwrap();

    engine.do_turn().unwrap();

    assert_eq!(engine.trash(), &[copper]);
    assert_eq!(owned(&engine, PlayerId(0), "silver"), 1);
    assert_eq!(owned(&engine, PlayerId(0), "copper"), 6);
    assert_eq!(engine.num_gain(), 0);
}

/// Test that remodel trashes the cheapest card and skips a worthless gain.
#[test]
fn test_remodel_turn_without_gain() {
    let mut engine = game_with(Scripted::player("remodel"), "remodel");
    let copper = engine.cards().require("copper").unwrap();

    engine.do_turn().unwrap();

    assert_eq!(engine.trash(), &[copper]);
    assert_eq!(engine.player(PlayerId(0)).owned_card_count(), 10);
}

/// Test that the default thief choice steals gold.
#[test]
fn test_thief_turn_steals_gold() {
    let mut engine = game_with(Scripted::player("thief"), "thief");
    let copper = engine.cards().require("copper").unwrap();
    let gold = engine.cards().require("gold").unwrap();
    engine.player_mut(PlayerId(1)).deck.extend([copper, gold]);

    engine.do_turn().unwrap();

    assert_eq!(owned(&engine, PlayerId(0), "gold"), 1);
    assert_eq!(owned(&engine, PlayerId(1), "gold"), 0);
    assert!(engine.trash().is_empty());
    assert!(engine.player(PlayerId(1)).revealed_cards.is_empty());
    assert_eq!(engine.player(PlayerId(1)).discard, vec![copper]);
}

/// Test that picking a card with no effect fails the automated turn.
#[test]
fn test_unplayable_choice_surfaces_error() {
    let mut engine = game_with(Scripted::player("moat"), "smithy");
    let moat = engine.cards().require("moat").unwrap();
    engine.player_mut(PlayerId(0)).hand.push(moat);

    assert!(matches!(
        engine.do_turn(),
        Err(EngineError::NotPlayable { .. })
    ));
    assert!(engine.player(PlayerId(0)).strategy.is_some());
}
