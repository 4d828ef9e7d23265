//! # rust-dominion
//!
//! A deck-building card game engine: supply piles, per-player decks, an
//! action/buy turn cycle and a catalog of kingdom cards whose effects can
//! pause the turn to ask for a choice.
//!
//! ## Design Principles
//!
//! 1. **One Engine, Two Drivers**: Human seats call the discrete phase
//!    operations directly; automated seats go through `Engine::do_turn`,
//!    which asks the seat's `PlayerStrategy` at every decision point.
//!
//! 2. **Explicit Phases**: Every operation is legal in exactly one phase and
//!    fails with `EngineError::IllegalPhase` elsewhere. Card effects that
//!    need input push a sub-phase frame; its follow-up work is data, run
//!    when the frame ends.
//!
//! 3. **Validate, Then Mutate**: A rejected call leaves the game unchanged.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, errors, options and public snapshots
//! - `cards`: Card definitions, registry and the standard catalog
//! - `zones`: Supply piles and card census
//! - `effects`: Action card effects
//! - `engine`: Setup, phase state machine and the turn orchestrator
//! - `strategy`: The strategy contract and reference AIs
//!
//! ## Example
//!
//! ```
//! use rust_dominion::{Engine, EngineOptions};
//!
//! let mut engine = Engine::new(EngineOptions::new().num_players(3).seed(7)).unwrap();
//! engine.play_game().unwrap();
//!
//! assert!(engine.is_game_over());
//! println!("winners: {:?}", engine.winner_names());
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod engine;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    EngineError, EngineOptions, GameRng, Player, PlayerId, PlayerMap, PlayerSummary, PublicView,
    Result,
};

pub use crate::cards::{CardDefinition, CardFilter, CardId, CardKind, CardRegistry};

pub use crate::zones::{Census, GainLocation, Supply};

pub use crate::effects::{ActionEffect, EffectDelta, FirstPlayBonus};

pub use crate::engine::{
    Engine, Phase, Resolution, SpyChoice, SubPhase, ThiefAction, ThiefChoice,
};

pub use crate::strategy::{ai_roster, PlayerStrategy, TurnView};
