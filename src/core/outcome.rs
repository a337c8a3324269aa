//! Round outcomes.
//!
//! An `Outcome` is produced once per round by a resolver, applied once to
//! the ledger by the round engine, and then only kept in history.

use serde::{Deserialize, Serialize};

/// What kind of result a round produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Regular card prize, paid in tokens.
    TokenPrize,
    /// Jackpot card, paid in tokens.
    SuperTokenPrize,
    /// Card that refunds credits.
    CreditPrize,
    /// Card that takes credits away.
    CreditPenalty,
    /// Nothing happens.
    Neutral,
    /// The selected racer won, paid in tokens.
    RaceWin,
    /// The selected racer lost.
    RaceLose,
}

impl OutcomeKind {
    /// Short lowercase name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OutcomeKind::TokenPrize => "token_prize",
            OutcomeKind::SuperTokenPrize => "super_token_prize",
            OutcomeKind::CreditPrize => "credit_prize",
            OutcomeKind::CreditPenalty => "credit_penalty",
            OutcomeKind::Neutral => "neutral",
            OutcomeKind::RaceWin => "race_win",
            OutcomeKind::RaceLose => "race_lose",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single round result.
///
/// `magnitude` is always non-negative; the sign of the ledger change comes
/// from `kind` (a penalty of 10 removes 10 credits).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub magnitude: i64,
}

impl Outcome {
    #[must_use]
    pub const fn new(kind: OutcomeKind, magnitude: i64) -> Self {
        Self { kind, magnitude }
    }

    #[must_use]
    pub const fn token_prize(tokens: i64) -> Self {
        Self::new(OutcomeKind::TokenPrize, tokens)
    }

    #[must_use]
    pub const fn super_token_prize(tokens: i64) -> Self {
        Self::new(OutcomeKind::SuperTokenPrize, tokens)
    }

    #[must_use]
    pub const fn credit_prize(credits: i64) -> Self {
        Self::new(OutcomeKind::CreditPrize, credits)
    }

    #[must_use]
    pub const fn credit_penalty(credits: i64) -> Self {
        Self::new(OutcomeKind::CreditPenalty, credits)
    }

    #[must_use]
    pub const fn neutral() -> Self {
        Self::new(OutcomeKind::Neutral, 0)
    }

    #[must_use]
    pub const fn race_win(tokens: i64) -> Self {
        Self::new(OutcomeKind::RaceWin, tokens)
    }

    #[must_use]
    pub const fn race_lose() -> Self {
        Self::new(OutcomeKind::RaceLose, 0)
    }

    /// Signed `(credits, tokens)` change this outcome applies to a ledger.
    #[must_use]
    pub const fn ledger_delta(&self) -> (i64, i64) {
        match self.kind {
            OutcomeKind::TokenPrize | OutcomeKind::SuperTokenPrize | OutcomeKind::RaceWin => {
                (0, self.magnitude)
            }
            OutcomeKind::CreditPrize => (self.magnitude, 0),
            OutcomeKind::CreditPenalty => (-self.magnitude, 0),
            OutcomeKind::Neutral | OutcomeKind::RaceLose => (0, 0),
        }
    }

    /// True for any outcome that rewards the player.
    #[must_use]
    pub const fn is_win(&self) -> bool {
        matches!(
            self.kind,
            OutcomeKind::TokenPrize
                | OutcomeKind::SuperTokenPrize
                | OutcomeKind::CreditPrize
                | OutcomeKind::RaceWin
        )
    }

    /// True for outcomes that cost the player something.
    #[must_use]
    pub const fn is_loss(&self) -> bool {
        matches!(self.kind, OutcomeKind::CreditPenalty | OutcomeKind::RaceLose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_deltas() {
        assert_eq!(Outcome::token_prize(50).ledger_delta(), (0, 50));
        assert_eq!(Outcome::super_token_prize(250).ledger_delta(), (0, 250));
        assert_eq!(Outcome::credit_prize(50).ledger_delta(), (50, 0));
        assert_eq!(Outcome::credit_penalty(10).ledger_delta(), (-10, 0));
        assert_eq!(Outcome::neutral().ledger_delta(), (0, 0));
        assert_eq!(Outcome::race_win(50).ledger_delta(), (0, 50));
        assert_eq!(Outcome::race_lose().ledger_delta(), (0, 0));
    }

    #[test]
    fn test_win_loss_classification() {
        assert!(Outcome::credit_prize(50).is_win());
        assert!(Outcome::race_win(50).is_win());
        assert!(Outcome::credit_penalty(10).is_loss());
        assert!(Outcome::race_lose().is_loss());

        let neutral = Outcome::neutral();
        assert!(!neutral.is_win());
        assert!(!neutral.is_loss());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(OutcomeKind::SuperTokenPrize.to_string(), "super_token_prize");
    }
}
