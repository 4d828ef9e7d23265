//! Serializable snapshot of everything a table-side UI may show.
//!
//! ## PublicView
//!
//! Observable information for all players:
//! - Phase, active sub-phase, turn, round
//! - Treasure pot and the current player's action/buy counters
//! - Supply counts by card name
//! - Zone sizes per player (hands, decks and discards stay private)
//! - Game-over flag and winners
//!
//! A UI reads `phase` to decide which controls are legal.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::engine::{Engine, Phase, SubPhase};

/// What everyone at the table can see about one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub hand_size: usize,
    pub deck_size: usize,
    pub discard_size: usize,
    pub points: i32,
}

/// Public game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    pub phase: Phase,
    pub sub_phase: Option<SubPhase>,
    pub turn: PlayerId,
    pub round: u32,
    pub treasure_pot: u32,
    /// Counters of the player whose turn it is.
    pub num_actions: u32,
    pub num_buys: u32,
    /// (card name, cards left), in card id order.
    pub supply: Vec<(String, u32)>,
    pub players: Vec<PlayerSummary>,
    pub play_area: Vec<String>,
    pub trash_size: usize,
    pub is_game_over: bool,
    pub winners: Vec<String>,
}

impl Engine {
    /// Snapshot the public state.
    #[must_use]
    pub fn public_view(&self) -> PublicView {
        let current = self.player(self.turn());
        PublicView {
            phase: self.phase(),
            sub_phase: self.sub_phase().cloned(),
            turn: self.turn(),
            round: self.round(),
            treasure_pot: self.treasure_pot(),
            num_actions: current.num_actions,
            num_buys: current.num_buys,
            supply: self
                .supply()
                .iter()
                .map(|(card, count)| (self.cards().name(card), count))
                .collect(),
            players: self
                .players()
                .map(|(id, player)| PlayerSummary {
                    id,
                    name: player.name.clone(),
                    is_human: player.is_human(),
                    hand_size: player.hand.len(),
                    deck_size: player.deck.len(),
                    discard_size: player.discard.len(),
                    points: player.points,
                })
                .collect(),
            play_area: self
                .play_area()
                .iter()
                .map(|&card| self.cards().name(card))
                .collect(),
            trash_size: self.trash().len(),
            is_game_over: self.is_game_over(),
            winners: self.winner_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineOptions;

    #[test]
    fn test_public_view_at_setup() {
        let engine = Engine::new(
            EngineOptions::new()
                .num_players(3)
                .human_player(1, "alice")
                .seed(8),
        )
        .unwrap();
        let view = engine.public_view();

        assert_eq!(view.phase, Phase::Draw);
        assert_eq!(view.sub_phase, None);
        assert_eq!(view.round, 0);
        assert_eq!(view.supply.len(), 17);
        assert_eq!(view.players.len(), 3);
        assert!(view.players[1].is_human);
        assert_eq!(view.players[1].name, "alice");
        assert!(view.players.iter().all(|p| p.hand_size == 5 && p.deck_size == 5));
        assert!(!view.is_game_over);
        assert!(view.winners.is_empty());
    }

    #[test]
    fn test_public_view_serializes() {
        let engine = Engine::new(EngineOptions::new().num_players(2).seed(8)).unwrap();
        let json = serde_json::to_value(engine.public_view()).unwrap();

        assert_eq!(json["phase"], "draw");
        assert_eq!(json["players"].as_array().map(Vec::len), Some(2));
    }
}
