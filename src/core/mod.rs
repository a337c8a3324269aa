//! Core engine types: RNG, configuration, errors, outcomes.
//!
//! These are shared by both game variants. Variants configure behaviour via
//! `CardsConfig` / `RaceConfig` rather than modifying the core.

pub mod rng;
pub mod config;
pub mod error;
pub mod outcome;

pub use rng::{GameRng, GameRngState};
pub use config::{CardsConfig, EconomyConfig, LevelCurve, RaceConfig, TieBreak};
pub use error::{ArcadeError, PaymentError, Result, SoundError};
pub use outcome::{Outcome, OutcomeKind};
