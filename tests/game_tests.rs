//! Whole-game tests.
//!
//! These tests verify:
//! - Setup builds the expected supply and starting decks
//! - Manually driven and strategy-driven games reach the end
//! - No card is created or lost while a game runs
//! - Seeded games replay identically
//! - Custom strategies plug into `do_turn`

use proptest::prelude::*;
use rust_dominion::{
    CardId, CardKind, Engine, EngineError, EngineOptions, Phase, Player, PlayerId, PlayerStrategy,
    TurnView,
};

/// Buys province, gold or silver from the money in hand.
#[derive(Default)]
struct SimpleTestStrategy {
    goal: Option<CardId>,
}

impl PlayerStrategy for SimpleTestStrategy {
    fn name(&self) -> &'static str {
        "Simple Test"
    }

    fn action_turn(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        if money >= 8 && view.supply_count("province") > 0 {
            view.card("province")
        } else if money >= 6 {
            view.card("gold")
        } else if money >= 3 {
            view.card("silver")
        } else {
            None
        }
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}

/// Never plays or buys anything.
#[derive(Default)]
struct DoNothingStrategy {
    goal: Option<CardId>,
}

impl PlayerStrategy for DoNothingStrategy {
    fn name(&self) -> &'static str {
        "Do Nothing"
    }

    fn action_turn(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn buy_goal(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}

fn simple_player(name: &str) -> Player {
    Player::new(name, Box::new(SimpleTestStrategy::default()))
}

/// Run `do_turn` with a turn cap, checking card conservation and that no
/// supply pile grows after every turn.
fn play_checked(engine: &mut Engine, max_turns: usize) {
    let initial = engine.initial_census();
    for _ in 0..max_turns {
        if engine.is_game_over() {
            return;
        }
        let before = engine.supply().clone();
        engine.do_turn().unwrap();
        assert_eq!(engine.census(), initial);
        for (card, count) in before.iter() {
            assert!(engine.supply().remaining(card) <= count);
        }
    }
    assert!(engine.is_game_over(), "game did not end in {max_turns} turns");
}

/// Test that setup builds 17 piles and a 10-card deck per player.
#[test]
fn test_setup() {
    for num_players in 2..=6 {
        let engine = Engine::new(EngineOptions::new().num_players(num_players).seed(3)).unwrap();

        assert_eq!(engine.supply().len(), 17);
        assert_eq!(engine.num_players(), num_players);
        for (_, player) in engine.players() {
            assert_eq!(player.owned_card_count(), 10);
            assert_eq!(player.hand.len(), 5);
            assert_eq!(player.deck.len(), 5);
            assert!(player.discard.is_empty());
        }
        assert_eq!(engine.phase(), Phase::Draw);
        assert_eq!(engine.turn(), PlayerId(0));
        assert_eq!(engine.census(), engine.initial_census());
    }
}

/// Test that pre-built players take the first seats in order.
#[test]
fn test_injected_players() {
    let engine = Engine::new(
        EngineOptions::new()
            .num_players(3)
            .with_player(simple_player("first"))
            .with_player(simple_player("second"))
            .seed(8),
    )
    .unwrap();

    assert_eq!(engine.player(PlayerId(0)).name, "first");
    assert_eq!(engine.player(PlayerId(1)).name, "second");
    assert!(engine.player(PlayerId(2)).strategy.is_some());
}

/// Test a game driven entirely through the phase operations.
#[test]
fn test_manual_big_money_game() {
    let mut engine = Engine::new(
        EngineOptions::new()
            .num_players(2)
            .human_player(0, "test human")
            .seed(99),
    )
    .unwrap();
    let province = engine.cards().require("province").unwrap();
    let gold = engine.cards().require("gold").unwrap();
    let silver = engine.cards().require("silver").unwrap();

    let mut turns = 0;
    while !engine.is_game_over() {
        assert!(turns < 1000, "manual game did not end");
        turns += 1;

        let seat = engine.turn();
        engine.draw_phase().unwrap();
        engine.end_action_phase().unwrap();

        let treasures: Vec<usize> = {
            let cards = engine.cards();
            engine
                .player(seat)
                .hand
                .iter()
                .enumerate()
                .filter(|&(_, &c)| cards.is_kind(c, CardKind::Treasure))
                .map(|(i, _)| i)
                .collect()
        };
        for index in treasures.into_iter().rev() {
            engine.play_treasure_card(index).unwrap();
        }

        let pot = engine.treasure_pot();
        let target = if pot >= 8 {
            Some(province)
        } else if pot >= 6 {
            Some(gold)
        } else if pot >= 3 {
            Some(silver)
        } else {
            None
        };
        if let Some(card) = target.filter(|&c| engine.supply().remaining(c) > 0) {
            engine.buy_card(card, seat).unwrap();
        }
        engine.end_turn().unwrap();
    }

    assert_eq!(engine.supply().remaining(province), 0);
    assert!(!engine.winners().is_empty());
    assert_eq!(engine.census(), engine.initial_census());
}

/// Test that a strategy-driven game terminates with winners.
#[test]
fn test_simple_strategies_finish() {
    let mut engine = Engine::new(
        EngineOptions::new()
            .num_players(2)
            .with_player(simple_player("one"))
            .with_player(simple_player("two"))
            .seed(21),
    )
    .unwrap();

    play_checked(&mut engine, 2000);

    let province = engine.cards().require("province").unwrap();
    assert_eq!(engine.supply().remaining(province), 0);
    let best = engine.players().map(|(_, p)| p.points).max().unwrap();
    for &winner in engine.winners() {
        assert_eq!(engine.player(winner).points, best);
    }
}

/// Test gardens scoring from the owner's card count.
#[test]
fn test_gardens_scoring() {
    let mut engine = Engine::new(
        EngineOptions::new()
            .num_players(2)
            .with_player(Player::new("idle", Box::new(DoNothingStrategy::default())))
            .with_player(simple_player("buyer"))
            .supply_cards(["gardens"])
            .seed(6),
    )
    .unwrap();
    let gardens = engine.cards().require("gardens").unwrap();
    engine
        .player_mut(PlayerId(0))
        .hand
        .extend([gardens, gardens, gardens]);

    engine.calculate_game_end();

    let idle = engine.player(PlayerId(0));
    assert_eq!(idle.owned_card_count(), 13);
    assert_eq!(idle.points, 6);
}

/// Test that an idle player never changes their deck size.
#[test]
fn test_do_nothing_player_keeps_deck() {
    let mut engine = Engine::new(
        EngineOptions::new()
            .num_players(2)
            .with_player(Player::new("idle", Box::new(DoNothingStrategy::default())))
            .with_player(simple_player("buyer"))
            .seed(31),
    )
    .unwrap();

    play_checked(&mut engine, 2000);

    assert_eq!(engine.player(PlayerId(0)).owned_card_count(), 10);
    assert_eq!(engine.winners(), &[PlayerId(1)]);
}

/// Test that `do_turn` refuses the human seat and the human can then play.
#[test]
fn test_human_seat_in_automated_game() {
    let mut engine = Engine::new(
        EngineOptions::new()
            .num_players(3)
            .human_player(1, "carol")
            .seed(17),
    )
    .unwrap();

    engine.do_turn().unwrap();
    assert_eq!(engine.turn(), PlayerId(1));
    assert_eq!(
        engine.do_turn(),
        Err(EngineError::HumanTurn("carol".into()))
    );

    engine.draw_phase().unwrap();
    engine.end_action_phase().unwrap();
    engine.end_turn().unwrap();
    assert_eq!(engine.turn(), PlayerId(2));

    engine.do_turn().unwrap();
    assert_eq!(engine.turn(), PlayerId(0));
    assert_eq!(engine.round(), 1);
}

/// Test that a seeded game replays identically.
#[test]
fn test_seeded_games_replay() {
    let run = || {
        let mut engine = Engine::new(EngineOptions::new().num_players(4).seed(1234)).unwrap();
        let winners = engine.play_game().unwrap();
        (winners, engine.public_view())
    };

    assert_eq!(run(), run());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Any seeded table of reference AIs finishes without losing cards.
    #[test]
    fn prop_ai_games_finish(seed in any::<u64>(), num_players in 2usize..=6) {
        let mut engine = Engine::new(
            EngineOptions::new().num_players(num_players).seed(seed),
        ).unwrap();

        play_checked(&mut engine, 5000);

        prop_assert!(engine.is_game_over());
        prop_assert!(!engine.winners().is_empty());
        let best = engine.players().map(|(_, p)| p.points).max().unwrap();
        for &winner in engine.winners() {
            prop_assert_eq!(engine.player(winner).points, best);
        }
    }
}
