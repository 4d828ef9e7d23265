//! Phase state machine types.
//!
//! A turn walks `Draw -> Action -> Buy -> Cleanup -> Draw`. While in the
//! action step, a played card may push a sub-phase frame that waits for
//! outside input. Frames stack, so the observable `Phase` is the top frame's
//! phase when one exists, and the turn step otherwise.
//!
//! ## Frames and continuations
//!
//! Each frame carries its sub-phase parameters and an optional
//! `Continuation`: the follow-up work to run when the frame ends. A
//! continuation may push another frame, which is how trash-then-gain cards
//! chain. Once the stack is empty the game is back in the action phase and
//! every sub-phase parameter reads as neutral.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Range;

use crate::cards::{CardFilter, CardId};
use crate::core::PlayerId;
use crate::zones::GainLocation;

/// The observable phase. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Draw,
    Action,
    Buy,
    Cleanup,
    Gain,
    Trash,
    Discard,
    DiscardDeck,
    Spy,
    Thief,
    Adventurer,
    Bureaucrat,
}

impl Phase {
    /// Every phase, in declaration order.
    pub const ALL: [Phase; 12] = [
        Phase::Draw,
        Phase::Action,
        Phase::Buy,
        Phase::Cleanup,
        Phase::Gain,
        Phase::Trash,
        Phase::Discard,
        Phase::DiscardDeck,
        Phase::Spy,
        Phase::Thief,
        Phase::Adventurer,
        Phase::Bureaucrat,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Draw => "draw",
            Phase::Action => "action",
            Phase::Buy => "buy",
            Phase::Cleanup => "cleanup",
            Phase::Gain => "gain",
            Phase::Trash => "trash",
            Phase::Discard => "discard",
            Phase::DiscardDeck => "discard-deck",
            Phase::Spy => "spy",
            Phase::Thief => "thief",
            Phase::Adventurer => "adventurer",
            Phase::Bureaucrat => "bureaucrat",
        }
    }

    /// True for phases opened by an action card.
    #[must_use]
    pub fn is_sub_phase(self) -> bool {
        !matches!(self, Phase::Draw | Phase::Action | Phase::Buy | Phase::Cleanup)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The base turn step, underneath any sub-phase frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Draw,
    Action,
    Buy,
    Cleanup,
}

impl Step {
    #[must_use]
    pub fn phase(self) -> Phase {
        match self {
            Step::Draw => Phase::Draw,
            Step::Action => Phase::Action,
            Step::Buy => Phase::Buy,
            Step::Cleanup => Phase::Cleanup,
        }
    }
}

/// Parameters of a gain sub-phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GainState {
    pub remaining: u32,
    pub max_cost: u32,
    pub filter: CardFilter,
    pub location: GainLocation,
}

/// Parameters of a trash sub-phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashState {
    /// Cards that may still be trashed.
    pub remaining: u32,
    pub filter: CardFilter,
    /// Only this card may be trashed, if set.
    pub name: Option<CardId>,
}

/// Parameters of a discard sub-phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardState {
    /// Cards that may still be discarded (`u32::MAX` for any number).
    pub remaining: u32,
    pub filter: CardFilter,
    /// Only hand indices inside this range may be discarded, if set.
    pub range: Option<Range<usize>>,
}

/// A card-injected sub-phase with its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubPhase {
    Gain(GainState),
    Trash(TrashState),
    Discard(DiscardState),
    DiscardDeck,
    Spy,
    Thief,
    Adventurer,
    Bureaucrat,
}

impl SubPhase {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            SubPhase::Gain(_) => Phase::Gain,
            SubPhase::Trash(_) => Phase::Trash,
            SubPhase::Discard(_) => Phase::Discard,
            SubPhase::DiscardDeck => Phase::DiscardDeck,
            SubPhase::Spy => Phase::Spy,
            SubPhase::Thief => Phase::Thief,
            SubPhase::Adventurer => Phase::Adventurer,
            SubPhase::Bureaucrat => Phase::Bureaucrat,
        }
    }
}

/// Deferred follow-up work run when a sub-phase ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    /// If a card was trashed since `trash_len`, open a gain for a card
    /// costing up to its cost plus `bonus`.
    GainAfterTrash {
        trash_len: usize,
        bonus: u32,
        filter: CardFilter,
    },
    /// If a card was trashed since `trash_len`, add `gold` to the pot.
    PayoutIfTrashed { trash_len: usize, gold: u32 },
    /// Draw one card per card added to the discard pile since `discard_len`.
    DrawPerDiscard { player: PlayerId, discard_len: usize },
    /// Put each revealed card back on the deck or into the discard pile.
    ResolveSpy,
    /// Trash or steal the chosen treasures, discard everything else revealed.
    ResolveThief { thief: PlayerId },
    /// Treasures revealed go to hand, the rest to discard.
    ResolveAdventurer { player: PlayerId },
    /// Each victim's revealed victory card goes on top of their deck.
    ResolveBureaucrat { victims: SmallVec<[PlayerId; 6]> },
}

/// One entry on the sub-phase stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseFrame {
    pub sub_phase: SubPhase,
    pub then: Option<Continuation>,
}

/// Spy decision for one player's revealed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpyChoice {
    Deck,
    Discard,
}

/// What the thief does with the chosen treasure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThiefAction {
    Trash,
    Gain,
}

/// Thief decision for one victim: which revealed card, and what to do with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThiefChoice {
    pub index: usize,
    pub action: ThiefAction,
}

/// Input supplied when ending a sub-phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    None,
    /// Per-player spy choices. Players left out discard their card.
    Spy(SmallVec<[(PlayerId, SpyChoice); 6]>),
    /// Per-victim thief choices. Victims left out lose nothing.
    Thief(SmallVec<[(PlayerId, ThiefChoice); 6]>),
}
