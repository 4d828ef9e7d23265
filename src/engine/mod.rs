//! The game engine: setup, the phase state machine and automated turns.
//!
//! - `game`: the `Engine` aggregate, setup and card movement primitives
//! - `phase`: phase, sub-phase and continuation types
//! - `turn`: draw, action, buy and cleanup operations
//! - `subphase`: card-injected sub-phases and their resolution
//! - `orchestrator`: `do_turn` and `play_game` for strategy-driven seats

mod game;
mod orchestrator;
mod phase;
mod subphase;
mod turn;

pub use game::{Engine, HAND_SIZE, STARTING_COPPERS, STARTING_ESTATES};
pub use phase::{
    Continuation, DiscardState, GainState, Phase, PhaseFrame, Resolution, SpyChoice, Step,
    SubPhase, ThiefAction, ThiefChoice, TrashState,
};
