//! # arcade-engine
//!
//! Session economy and round engine for two token-arcade mini-games:
//! "Magic Cards" (flip one card from a shuffled deck) and "Racer Betting"
//! (back a racer in a live, tick-driven race).
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: Games take `Command`s and return
//!    `GameEvent`s. Rendering, animation and modal dialogs live elsewhere.
//!
//! 2. **Deterministic**: All randomness flows through a seeded `GameRng`,
//!    so a seed and a command sequence replay exactly.
//!
//! 3. **Explicit State**: The ledger and round phase are owned values
//!    passed by reference; there are no globals.
//!
//! ## Architecture
//!
//! A command requests a round → the `RoundEngine` checks the phase and the
//! ledger → the entry cost is charged → a resolver (deck or race) produces an
//! `Outcome` → the engine applies it to the `Ledger` and re-arms.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors, outcomes
//! - `economy`: Ledger, level curves, credit packs and payments
//! - `round`: Round phase state machine and history
//! - `cards`: Deck composition, shuffle and reveal
//! - `race`: Racer field and fixed-timestep simulation
//! - `events`: Commands, events and audio cues
//! - `rules`: `RoundRules` trait implemented by each game
//! - `games`: `CardsGame` and `RaceGame`

pub mod core;
pub mod economy;
pub mod round;
pub mod cards;
pub mod race;
pub mod events;
pub mod rules;
pub mod games;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ArcadeError, Result, PaymentError, SoundError,
    GameRng, GameRngState,
    CardsConfig, EconomyConfig, LevelCurve, RaceConfig, TieBreak,
    Outcome, OutcomeKind,
};

pub use crate::economy::{
    Ledger, LedgerSnapshot, LevelProgress,
    CreditPack, PackCatalog, PaymentProvider, PurchaseReceipt, SimulatedPayments,
};

pub use crate::round::{LevelCheck, RoundEngine, RoundPhase, RoundRecord, RoundSummary};

pub use crate::cards::{Deck, DeckComposition, Slot, SlotKind};

pub use crate::race::{RaceSim, Racer, RacerField, RacerId};

pub use crate::events::{play_cues, AudioCue, AudioSink, Command, CommandKind, GameEvent, NullAudio};

pub use crate::rules::RoundRules;

pub use crate::games::{CardsGame, RaceGame};
