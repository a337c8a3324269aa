//! Events emitted by the games.
//!
//! The engine never renders anything. Each transition returns the events a
//! presentation layer needs, in the order they happened.

use serde::{Deserialize, Serialize};

use super::audio::AudioCue;
use crate::cards::Slot;
use crate::economy::LedgerSnapshot;
use crate::race::{Lane, RacerId};
use crate::round::RoundSummary;

/// Something that happened during a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entry cost charged, round in flight.
    RoundStarted { round: u64, entry_cost: i64 },

    /// A freshly shuffled deck is face down.
    DeckDealt { slots: usize },

    SlotRevealed { index: usize, slot: Slot },

    RacerSelected { racer: RacerId },

    /// Positions after the ticks just run, in roster order.
    RaceProgress { lanes: Vec<Lane> },

    RaceFinished { winner: RacerId, selected: RacerId },

    /// Outcome applied; the round is idle again.
    RoundResolved(RoundSummary),

    RoundCancelled { round: u64 },

    LevelUp { level: u32 },

    /// Shown at most once per session.
    LowFundsPrompt { credits: i64 },

    CreditsPurchased { sku: String, credits: i64 },

    /// Fresh display values.
    LedgerUpdated {
        ledger: LedgerSnapshot,
        fraction: f64,
        /// A new round is affordable and nothing is in flight.
        can_play: bool,
    },

    Cue(AudioCue),
}

impl GameEvent {
    /// The audio cue carried by this event, if any.
    #[must_use]
    pub fn cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::Cue(cue) => Some(*cue),
            _ => None,
        }
    }
}
