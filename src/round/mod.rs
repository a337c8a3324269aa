//! Round lifecycle shared by both game variants.
//!
//! A round is one paid play attempt: the entry cost is charged on start, a
//! resolver produces exactly one `Outcome`, and the engine applies it to the
//! ledger before re-arming for the next round.

mod engine;
mod phase;

pub use engine::{LevelCheck, RoundEngine, RoundRecord, RoundStart, RoundSummary};
pub use phase::RoundPhase;
