//! Engine error taxonomy.
//!
//! Every guarded engine operation validates its inputs before touching
//! state, so an `Err` return leaves the game exactly as it was.
//!
//! ## Categories
//!
//! - **Illegal phase**: an operation was called outside the phase it
//!   belongs to, or after the game ended. A UI contract violation, never a
//!   game condition.
//! - **Insufficient resources**: not enough actions, buys, treasure or gains.
//! - **Bad selection**: hand/revealed indices or cards that do not satisfy
//!   the active sub-phase's restrictions.
//! - **Configuration**: rejected at `Engine::new`, fatal to construction.

use thiserror::Error;

use super::PlayerId;
use crate::engine::Phase;

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot {operation} in {phase} phase")]
    IllegalPhase { operation: &'static str, phase: Phase },

    #[error("no actions remaining")]
    NoActionsRemaining,

    #[error("no buys remaining")]
    NoBuysRemaining,

    #[error("no gains remaining in this gain phase")]
    NoGainsRemaining,

    #[error("card {card} is not in {player}'s hand")]
    CardNotInHand { card: String, player: String },

    #[error("hand index {index} out of range (hand has {len} cards)")]
    HandIndexOutOfRange { index: usize, len: usize },

    #[error("duplicate hand index {index}")]
    DuplicateIndex { index: usize },

    #[error("insufficient treasure: {card} costs {cost}, pot holds {available}")]
    InsufficientTreasure {
        card: String,
        cost: u32,
        available: u32,
    },

    #[error("cannot take {card}, pile empty")]
    PileEmpty { card: String },

    #[error("unknown card {0}")]
    UnknownCard(String),

    #[error("card {card} has no playable effect")]
    NotPlayable { card: String },

    #[error("expected a {expected} card, got {card}")]
    WrongCardType { card: String, expected: String },

    #[error("can only select cards named {expected}, got {card}")]
    WrongCardName { card: String, expected: String },

    #[error("can select at most {max} cards, tried {requested}")]
    TooManyCards { max: u32, requested: usize },

    #[error("index {index} outside discard range [{start}, {end})")]
    DiscardOutOfRange { index: usize, start: usize, end: usize },

    #[error("may gain a card costing up to {max_cost}, {card} costs {cost}")]
    GainCostExceeded {
        card: String,
        cost: u32,
        max_cost: u32,
    },

    #[error("{phase} phase requires a resolution")]
    MissingResolution { phase: Phase },

    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("cannot automate turn for {0}, no strategy attached")]
    HumanTurn(String),

    #[error("game is over")]
    GameOver,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player count must be between 2 and 6, got {0}")]
    InvalidPlayerCount(usize),

    #[error("cannot have more than 10 kingdom piles, got {0}")]
    TooManyKingdomPiles(usize),

    #[error("kingdom card {0} is not implemented")]
    UnimplementedKingdomCard(String),

    #[error("a human player name is required when a human player index is set")]
    MissingHumanName,
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
