//! Action card effects.
//!
//! - `ActionEffect`: the trait every playable action card implements
//! - `EffectDelta`: additive changes an effect reports back to the engine
//! - `basic`: effects that resolve on the spot (+cards, +actions, attacks
//!   that need no choice)
//! - `interactive`: effects that open a sub-phase and finish through a
//!   continuation once the player has chosen
//!
//! Effects are small structs, so one implementation can back several cards
//! (`Bonus` covers smithy, village, market and friends).

mod effect;
pub mod basic;
pub mod interactive;

pub use effect::{ActionEffect, EffectDelta, FirstPlayBonus};
pub use basic::{gardens_points, Bonus, CouncilRoom, Merchant, Witch};
pub use interactive::{
    Adventurer, Bureaucrat, Cellar, Chancellor, GainUpTo, Library, Moneylender, Spy, Thief,
    TrashForGain, TrashUpTo, UNLIMITED,
};
