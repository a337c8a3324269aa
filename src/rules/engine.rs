//! Rules trait for game variants.
//!
//! Variants implement `RoundRules` to define:
//! - Which commands are legal in the current phase
//! - How a command changes the session
//! - How purchases are gated

use crate::core::Result;
use crate::economy::{Ledger, PaymentProvider};
use crate::events::{Command, CommandKind, GameEvent};
use crate::round::RoundPhase;

/// Rules trait.
///
/// ## Implementation Notes
///
/// - `legal_commands`: Return empty if nothing can be done right now
/// - `apply`: Must leave the session untouched when it returns `Err`
/// - `apply`: Must be deterministic for a given seed and command sequence
pub trait RoundRules {
    /// The session ledger.
    fn ledger(&self) -> &Ledger;

    /// Phase of the current round.
    fn phase(&self) -> RoundPhase;

    /// Credits charged per round.
    fn entry_cost(&self) -> i64;

    /// Commands accepted in the current state.
    fn legal_commands(&self) -> Vec<CommandKind>;

    /// The single state-transition function.
    fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>>;

    /// Buy the credit pack `sku` through `provider`.
    fn purchase(&mut self, provider: &mut dyn PaymentProvider, sku: &str) -> Result<Vec<GameEvent>>;

    // === Convenience Methods ===

    /// A new round can be started right now.
    fn can_play(&self) -> bool {
        self.phase() == RoundPhase::Idle && self.ledger().can_afford(self.entry_cost())
    }

    fn is_legal(&self, kind: CommandKind) -> bool {
        self.legal_commands().contains(&kind)
    }

    /// Current display values.
    fn ledger_event(&self) -> GameEvent {
        GameEvent::LedgerUpdated {
            ledger: self.ledger().snapshot(),
            fraction: self.ledger().fraction(),
            can_play: self.can_play(),
        }
    }

    /// Apply commands in order, stopping at the first error.
    fn apply_all<I>(&mut self, commands: I) -> Result<Vec<GameEvent>>
    where
        I: IntoIterator<Item = Command>,
        Self: Sized,
    {
        let mut events = Vec::new();
        for command in commands {
            events.extend(self.apply(command)?);
        }
        Ok(events)
    }
}
