//! Core engine types: players, RNG, errors, configuration and snapshots.
//!
//! These are the building blocks shared by the card catalog, the phase
//! state machine and the strategies.

pub mod player;
pub mod rng;
pub mod error;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use error::{EngineError, Result};
pub use config::{EngineOptions, MAX_PLAYERS, MIN_PLAYERS};
pub use state::{PlayerSummary, PublicView};
