//! Card system: definitions, registry and the standard catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions, held by every zone
//! - `CardKind`: Treasure, victory or action
//! - `CardFilter`: Restriction used by trash, gain and discard sub-phases
//! - `CardDefinition`: Static card data plus the card's effect
//! - `CardRegistry`: Lookup by id or by name

pub mod definition;
pub mod registry;
pub mod catalog;

pub use definition::{CardDefinition, CardFilter, CardId, CardKind, PointsEffect};
pub use registry::CardRegistry;
pub use catalog::{standard_cards, BASE_KINGDOM, EXTRA_KINGDOM, KINGDOM_PILES};
