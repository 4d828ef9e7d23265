//! Game construction options.
//!
//! `EngineOptions` is a builder consumed by `Engine::new`. Everything has a
//! default, so `EngineOptions::new()` describes a fully automated
//! five-player game with a random kingdom.
//!
//! ```
//! use rust_dominion::core::EngineOptions;
//!
//! let options = EngineOptions::new()
//!     .num_players(3)
//!     .human_player(0, "alice")
//!     .supply_cards(["chapel", "witch"])
//!     .seed(7);
//!
//! assert_eq!(options.num_players, 3);
//! assert_eq!(options.supply_cards, vec!["chapel", "witch"]);
//! ```

use super::player::Player;
use super::{EngineError, Result};
use crate::cards::KINGDOM_PILES;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table (one seat per reference AI).
pub const MAX_PLAYERS: usize = 6;

/// Options for building an `Engine`.
#[derive(Debug)]
pub struct EngineOptions {
    /// Number of seats. Defaults to 5.
    pub num_players: usize,
    /// Seat of the human-controlled player, if any.
    pub human_player_index: Option<usize>,
    /// Name of the human-controlled player. Required with `human_player_index`.
    pub human_player_name: Option<String>,
    /// Pre-built players for the first seats, in turn order.
    pub players: Vec<Player>,
    /// Kingdom piles that must be in the supply (at most `KINGDOM_PILES`).
    pub supply_cards: Vec<String>,
    /// RNG seed. Seeded from entropy when `None`.
    pub seed: Option<u64>,
    /// Also end the game once any three supply piles are empty.
    pub three_pile_ending: bool,
    /// End the game after this many full rounds.
    pub max_rounds: Option<u32>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            num_players: 5,
            human_player_index: None,
            human_player_name: None,
            players: Vec::new(),
            supply_cards: Vec::new(),
            seed: None,
            three_pile_ending: false,
            max_rounds: None,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_players(mut self, count: usize) -> Self {
        self.num_players = count;
        self
    }

    /// Seat a human player at `index`.
    pub fn human_player(mut self, index: usize, name: impl Into<String>) -> Self {
        self.human_player_index = Some(index);
        self.human_player_name = Some(name.into());
        self
    }

    /// Seat a human player without naming them. Fails at build time.
    pub fn human_player_index(mut self, index: usize) -> Self {
        self.human_player_index = Some(index);
        self
    }

    /// Append a pre-built player for the next unfilled seat.
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn supply_cards<I, S>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supply_cards = cards.into_iter().map(Into::into).collect();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn three_pile_ending(mut self, enabled: bool) -> Self {
        self.three_pile_ending = enabled;
        self
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Check option consistency before any setup work is done.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(EngineError::InvalidPlayerCount(self.num_players));
        }
        if self.players.len() > self.num_players {
            return Err(EngineError::InvalidPlayerCount(self.players.len()));
        }
        if let Some(index) = self.human_player_index {
            if index >= self.num_players {
                return Err(EngineError::UnknownPlayer(super::PlayerId(index as u8)));
            }
            if index >= self.players.len() && self.human_player_name.is_none() {
                return Err(EngineError::MissingHumanName);
            }
        }
        if self.supply_cards.len() > KINGDOM_PILES {
            return Err(EngineError::TooManyKingdomPiles(self.supply_cards.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EngineOptions::new();

        assert_eq!(options.num_players, 5);
        assert!(options.human_player_index.is_none());
        assert!(!options.three_pile_ending);
        assert!(options.max_rounds.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_player_count() {
        assert_eq!(
            EngineOptions::new().num_players(1).validate(),
            Err(EngineError::InvalidPlayerCount(1))
        );
        assert_eq!(
            EngineOptions::new().num_players(7).validate(),
            Err(EngineError::InvalidPlayerCount(7))
        );
    }

    #[test]
    fn test_human_without_name() {
        let options = EngineOptions::new().num_players(2).human_player_index(0);
        assert_eq!(options.validate(), Err(EngineError::MissingHumanName));
    }

    #[test]
    fn test_too_many_kingdom_piles() {
        let names: Vec<String> = (0..=KINGDOM_PILES).map(|i| format!("card{i}")).collect();
        let options = EngineOptions::new().supply_cards(names.clone());
        assert_eq!(
            options.validate(),
            Err(EngineError::TooManyKingdomPiles(KINGDOM_PILES + 1))
        );

        let full = EngineOptions::new().supply_cards(names.into_iter().take(KINGDOM_PILES));
        assert!(full.validate().is_ok());
    }
}
