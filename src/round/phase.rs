//! Round phases.

use serde::{Deserialize, Serialize};

/// Where the current round is in its lifecycle.
///
/// `Idle → Armed → Resolving → Idle`. The card game resolves straight from
/// `Armed` when a slot is picked; the race game moves to `Resolving` as soon
/// as the entry cost is paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round in flight. A new one may be started.
    #[default]
    Idle,
    /// Entry cost paid, waiting for the player's pick.
    Armed,
    /// Outcome is being produced.
    Resolving,
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Armed => "armed",
            RoundPhase::Resolving => "resolving",
        };
        f.write_str(name)
    }
}
