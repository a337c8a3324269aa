//! Error types for the arcade engine.
//!
//! Every failure is terminal for the attempted operation only: the session
//! state is left as it was before the call. Nothing here is retried.

use thiserror::Error;

use crate::round::RoundPhase;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ArcadeError>;

/// Errors surfaced by ledger, round and game operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArcadeError {
    /// Entry cost exceeds available credits. The round was not started.
    #[error("insufficient funds: need {required} credits, have {available}")]
    InsufficientFunds { required: i64, available: i64 },

    /// Operation is not valid in the current round phase.
    #[error("cannot {operation} while round is {phase}")]
    InvalidPhaseTransition {
        phase: RoundPhase,
        operation: &'static str,
    },

    /// A race was requested before any racer was picked.
    #[error("no racer selected")]
    NoSelection,

    #[error("unknown racer: {0}")]
    UnknownRacer(String),

    #[error("slot {index} out of range (deck has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("slot {0} has already been revealed")]
    SlotAlreadyRevealed(usize),

    #[error("unknown credit pack: {0}")]
    UnknownPack(String),

    /// The command exists but this game variant does not accept it.
    #[error("command {0} is not supported by this game")]
    UnsupportedCommand(&'static str),

    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),

    /// Elapsed time that is negative, NaN or too large for a `Duration`.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ArcadeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

/// Failure reported by a payment provider.
///
/// Non-fatal: logged by the caller, the ledger is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("order creation rejected: {0}")]
    OrderRejected(String),
    #[error("capture failed for order {order_id}: {reason}")]
    CaptureFailed { order_id: String, reason: String },
    #[error("payment cancelled by payer")]
    Cancelled,
}

/// Failure reported by an audio collaborator.
///
/// Never propagated out of a game; see [`crate::events::play_cues`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoundError {
    #[error("sound {0} failed to load")]
    Load(String),
    #[error("audio output unavailable")]
    Unavailable,
}
