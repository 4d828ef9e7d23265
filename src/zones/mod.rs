//! Shared card zones.
//!
//! Player-owned zones (deck, hand, discard, revealed) live on `Player`.
//! This module holds the shared ones.
//!
//! ## Key Types
//!
//! - `Supply`: Remaining count per purchasable pile
//! - `GainLocation`: Where a gained card lands
//! - `Census`: Per-card totals across every zone, for conservation checks

pub mod supply;
pub mod census;

pub use supply::{GainLocation, Supply};
pub use census::Census;
