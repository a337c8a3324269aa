//! The round state machine.
//!
//! Owns the phase flag that gates paid rounds. Only one round can be in
//! flight; every transition out of order is rejected with
//! `InvalidPhaseTransition` and leaves both the engine and the ledger as
//! they were.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phase::RoundPhase;
use crate::core::{ArcadeError, Outcome, Result};
use crate::economy::{Ledger, LedgerSnapshot, LevelProgress};

/// When the ledger's level is re-evaluated after a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelCheck {
    /// After every resolved round.
    #[default]
    Always,
    /// Only after a winning round.
    OnWin,
}

/// Returned when a round is successfully started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundStart {
    pub round: u64,
    pub credits_after: i64,
    /// The one-per-session low-funds prompt should be shown now.
    pub low_funds_prompt: bool,
}

/// Result of a resolved round, for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u64,
    pub outcome: Outcome,
    pub ledger: LedgerSnapshot,
    pub progress: LevelProgress,
}

/// One entry of round history. `outcome` is `None` for cancelled rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u64,
    pub entry_cost: i64,
    pub outcome: Option<Outcome>,
}

/// Gates, charges and settles rounds against a ledger.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    phase: RoundPhase,
    level_check: LevelCheck,

    /// Whether the low-funds prompt is used at all.
    low_funds_prompt: bool,
    /// Session flag: the prompt has been shown.
    low_funds_shown: bool,

    rounds_played: u64,
    current_cost: i64,
    /// Grows for the whole session unless `history_limit` is set.
    history: Vector<RoundRecord>,
    history_limit: Option<usize>,
}

impl RoundEngine {
    #[must_use]
    pub fn new(level_check: LevelCheck, low_funds_prompt: bool) -> Self {
        Self {
            phase: RoundPhase::Idle,
            level_check,
            low_funds_prompt,
            low_funds_shown: false,
            rounds_played: 0,
            current_cost: 0,
            history: Vector::new(),
            history_limit: None,
        }
    }

    /// Keep only the newest `limit` records; `None` keeps everything.
    #[must_use]
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == RoundPhase::Idle
    }

    /// Rounds started so far, including cancelled ones.
    #[must_use]
    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Finished and cancelled rounds, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundRecord> {
        &self.history
    }

    #[must_use]
    pub fn low_funds_shown(&self) -> bool {
        self.low_funds_shown
    }

    /// Charge `entry_cost` and arm a new round.
    ///
    /// Fails with `InvalidPhaseTransition` if a round is already in flight,
    /// or `InsufficientFunds` if `credits < entry_cost`. Either way nothing
    /// is charged.
    pub fn try_start_round(&mut self, ledger: &mut Ledger, entry_cost: i64) -> Result<RoundStart> {
        self.expect_phase(&[RoundPhase::Idle], "start a round")?;

        if !ledger.can_afford(entry_cost) {
            return Err(ArcadeError::InsufficientFunds {
                required: entry_cost,
                available: ledger.credits(),
            });
        }

        ledger.apply_delta(-entry_cost, 0);
        self.phase = RoundPhase::Armed;
        self.rounds_played += 1;
        self.current_cost = entry_cost;

        let low_funds_prompt = self.low_funds_prompt
            && !self.low_funds_shown
            && ledger.credits() <= entry_cost;
        if low_funds_prompt {
            self.low_funds_shown = true;
        }

        debug!(
            round = self.rounds_played,
            cost = entry_cost,
            credits = ledger.credits(),
            "round armed"
        );

        Ok(RoundStart {
            round: self.rounds_played,
            credits_after: ledger.credits(),
            low_funds_prompt,
        })
    }

    /// `Armed → Resolving`, for rounds with no further player input.
    pub fn begin_resolving(&mut self) -> Result<()> {
        self.expect_phase(&[RoundPhase::Armed], "begin resolving")?;
        self.phase = RoundPhase::Resolving;
        Ok(())
    }

    /// Apply the round's outcome to the ledger and return to `Idle`.
    pub fn resolve(&mut self, ledger: &mut Ledger, outcome: Outcome) -> Result<RoundSummary> {
        self.expect_phase(&[RoundPhase::Armed, RoundPhase::Resolving], "resolve")?;

        let (credits, tokens) = outcome.ledger_delta();
        ledger.apply_delta(credits, tokens);

        let progress = match self.level_check {
            LevelCheck::OnWin if !outcome.is_win() => LevelProgress {
                level: ledger.level(),
                fraction: ledger.fraction(),
                leveled_up: false,
            },
            _ => ledger.level_progress(),
        };

        self.finish(Some(outcome));
        debug!(round = self.rounds_played, outcome = %outcome.kind, "round resolved");

        Ok(RoundSummary {
            round: self.rounds_played,
            outcome,
            ledger: ledger.snapshot(),
            progress,
        })
    }

    /// Abandon the round in flight. The entry cost is not refunded.
    pub fn cancel(&mut self) -> Result<()> {
        self.expect_phase(&[RoundPhase::Armed, RoundPhase::Resolving], "cancel")?;
        self.finish(None);
        debug!(round = self.rounds_played, "round cancelled");
        Ok(())
    }

    fn finish(&mut self, outcome: Option<Outcome>) {
        self.history.push_back(RoundRecord {
            round: self.rounds_played,
            entry_cost: self.current_cost,
            outcome,
        });
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
        self.current_cost = 0;
        self.phase = RoundPhase::Idle;
    }

    /// Reject the call unless the phase is one of `allowed`.
    pub(crate) fn expect_phase(&self, allowed: &[RoundPhase], operation: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ArcadeError::InvalidPhaseTransition {
                phase: self.phase,
                operation,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EconomyConfig, LevelCurve};

    fn ledger_with(credits: i64) -> Ledger {
        Ledger::new(&EconomyConfig::default().with_initial_credits(credits))
    }

    #[test]
    fn test_insufficient_funds() {
        let mut ledger = ledger_with(15);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        let err = engine.try_start_round(&mut ledger, 20).unwrap_err();
        assert_eq!(
            err,
            ArcadeError::InsufficientFunds {
                required: 20,
                available: 15
            }
        );
        assert_eq!(ledger.credits(), 15);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(engine.rounds_played(), 0);
    }

    #[test]
    fn test_start_charges_and_arms() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        let start = engine.try_start_round(&mut ledger, 20).unwrap();
        assert_eq!(start.credits_after, 80);
        assert_eq!(start.round, 1);
        assert_eq!(ledger.credits(), 80);
        assert_eq!(engine.phase(), RoundPhase::Armed);
    }

    #[test]
    fn test_exact_balance_is_affordable() {
        let mut ledger = ledger_with(20);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        engine.try_start_round(&mut ledger, 20).unwrap();
        assert_eq!(ledger.credits(), 0);
    }

    #[test]
    fn test_no_double_start() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);
        engine.try_start_round(&mut ledger, 20).unwrap();

        let err = engine.try_start_round(&mut ledger, 20).unwrap_err();
        assert!(matches!(
            err,
            ArcadeError::InvalidPhaseTransition {
                phase: RoundPhase::Armed,
                ..
            }
        ));
        assert_eq!(ledger.credits(), 80);
    }

    #[test]
    fn test_resolve_token_prize() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);
        engine.try_start_round(&mut ledger, 20).unwrap();

        let summary = engine.resolve(&mut ledger, Outcome::token_prize(50)).unwrap();
        assert_eq!(ledger.tokens(), 50);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(summary.ledger.tokens, 50);
        assert_eq!(summary.progress.level, 1);
        assert!((summary.progress.fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_while_idle_rejected_twice() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        for _ in 0..2 {
            let err = engine.resolve(&mut ledger, Outcome::token_prize(50)).unwrap_err();
            assert_eq!(
                err,
                ArcadeError::InvalidPhaseTransition {
                    phase: RoundPhase::Idle,
                    operation: "resolve"
                }
            );
        }
        assert_eq!(ledger.snapshot(), ledger_with(100).snapshot());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_begin_resolving_only_from_armed() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::OnWin, false);

        assert!(engine.begin_resolving().is_err());
        engine.try_start_round(&mut ledger, 20).unwrap();
        engine.begin_resolving().unwrap();
        assert_eq!(engine.phase(), RoundPhase::Resolving);
        assert!(engine.begin_resolving().is_err());

        engine.resolve(&mut ledger, Outcome::race_lose()).unwrap();
        assert!(engine.is_idle());
    }

    #[test]
    fn test_level_check_on_win_skips_losses() {
        let mut ledger = Ledger::new(
            &EconomyConfig::default()
                .with_initial_tokens(150)
                .with_level_curve(LevelCurve::Rollover {
                    tokens_per_level: 100,
                }),
        );
        let mut engine = RoundEngine::new(LevelCheck::OnWin, false);

        engine.try_start_round(&mut ledger, 20).unwrap();
        let summary = engine.resolve(&mut ledger, Outcome::race_lose()).unwrap();
        assert!(!summary.progress.leveled_up);
        assert_eq!(ledger.tokens(), 150);

        engine.try_start_round(&mut ledger, 20).unwrap();
        let summary = engine.resolve(&mut ledger, Outcome::race_win(50)).unwrap();
        assert!(summary.progress.leveled_up);
        assert_eq!(summary.progress.level, 2);
        assert_eq!(ledger.tokens(), 100);
    }

    #[test]
    fn test_penalty_can_go_negative() {
        let mut ledger = ledger_with(20);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        engine.try_start_round(&mut ledger, 20).unwrap();
        engine.resolve(&mut ledger, Outcome::credit_penalty(10)).unwrap();
        assert_eq!(ledger.credits(), -10);
    }

    #[test]
    fn test_low_funds_prompt_once() {
        let mut ledger = ledger_with(60);
        let mut engine = RoundEngine::new(LevelCheck::OnWin, true);

        // 60 -> 40: above the cost
        assert!(!engine.try_start_round(&mut ledger, 20).unwrap().low_funds_prompt);
        engine.cancel().unwrap();

        // 40 -> 20: at the cost
        assert!(engine.try_start_round(&mut ledger, 20).unwrap().low_funds_prompt);
        engine.cancel().unwrap();
        assert!(engine.low_funds_shown());

        // 20 -> 0: already shown this session
        assert!(!engine.try_start_round(&mut ledger, 20).unwrap().low_funds_prompt);
    }

    #[test]
    fn test_low_funds_prompt_disabled() {
        let mut ledger = ledger_with(20);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);
        assert!(!engine.try_start_round(&mut ledger, 20).unwrap().low_funds_prompt);
    }

    #[test]
    fn test_cancel_keeps_cost_and_records() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        assert!(engine.cancel().is_err());

        engine.try_start_round(&mut ledger, 20).unwrap();
        engine.cancel().unwrap();

        assert!(engine.is_idle());
        assert_eq!(ledger.credits(), 80);
        assert_eq!(
            engine.history().back(),
            Some(&RoundRecord {
                round: 1,
                entry_cost: 20,
                outcome: None
            })
        );
    }

    #[test]
    fn test_history_is_ordered() {
        let mut ledger = ledger_with(100);
        let mut engine = RoundEngine::new(LevelCheck::Always, false);

        engine.try_start_round(&mut ledger, 20).unwrap();
        engine.resolve(&mut ledger, Outcome::neutral()).unwrap();
        engine.try_start_round(&mut ledger, 20).unwrap();
        engine.resolve(&mut ledger, Outcome::credit_prize(50)).unwrap();

        let rounds: Vec<_> = engine.history().iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2]);
        assert_eq!(engine.history()[1].outcome, Some(Outcome::credit_prize(50)));
        assert_eq!(ledger.credits(), 110);
    }

    #[test]
    fn test_history_limit_drops_oldest() {
        let mut ledger = ledger_with(1000);
        let mut engine = RoundEngine::new(LevelCheck::Always, false).with_history_limit(Some(3));

        for _ in 0..5 {
            engine.try_start_round(&mut ledger, 20).unwrap();
            engine.resolve(&mut ledger, Outcome::neutral()).unwrap();
        }

        let rounds: Vec<_> = engine.history().iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![3, 4, 5]);
        assert_eq!(engine.rounds_played(), 5);
    }
}
