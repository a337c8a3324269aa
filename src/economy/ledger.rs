//! Credits, tokens and level for one player session.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{EconomyConfig, LevelCurve};

/// Result of a level evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// Progress through the current level band, in `[0, 1]`.
    pub fraction: f64,
    /// The evaluation advanced the level by one.
    pub leveled_up: bool,
}

/// Display values for the ledger at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub credits: i64,
    pub tokens: i64,
    pub level: u32,
}

/// The credits/tokens/level counters for one session.
///
/// Credits have no floor: a penalty can push them below zero.
/// The level never decreases.
#[derive(Clone, Debug)]
pub struct Ledger {
    credits: i64,
    tokens: i64,
    level: u32,
    curve: LevelCurve,
}

impl Ledger {
    /// Create a ledger at level 1 with the configured starting balances.
    #[must_use]
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            credits: config.initial_credits,
            tokens: config.initial_tokens,
            level: 1,
            curve: config.level_curve.clone(),
        }
    }

    #[must_use]
    pub fn credits(&self) -> i64 {
        self.credits
    }

    #[must_use]
    pub fn tokens(&self) -> i64 {
        self.tokens
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn can_afford(&self, cost: i64) -> bool {
        self.credits >= cost
    }

    /// Add signed deltas to both counters. No sign check on the result.
    pub fn apply_delta(&mut self, credits_delta: i64, tokens_delta: i64) {
        self.credits += credits_delta;
        self.tokens += tokens_delta;
    }

    /// Advance the level by at most one step, then report progress.
    ///
    /// A ledger that has earned several levels at once needs several calls
    /// to catch up.
    pub fn level_progress(&mut self) -> LevelProgress {
        let leveled_up = match &self.curve {
            LevelCurve::Thresholds(t) => {
                // The last threshold is a ceiling, never a level of its own
                let top = t.len().saturating_sub(1).max(1) as u32;
                let next = t.get(self.level as usize).copied();
                match next {
                    Some(floor) if self.level < top && self.tokens >= floor => {
                        self.level += 1;
                        true
                    }
                    _ => false,
                }
            }
            LevelCurve::Rollover { tokens_per_level } => {
                if self.tokens >= *tokens_per_level {
                    self.tokens -= tokens_per_level;
                    self.level += 1;
                    true
                } else {
                    false
                }
            }
        };

        if leveled_up {
            info!(level = self.level, tokens = self.tokens, "level up");
        }

        LevelProgress {
            level: self.level,
            fraction: self.fraction(),
            leveled_up,
        }
    }

    /// Progress through the current level band without advancing.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match &self.curve {
            LevelCurve::Thresholds(t) => {
                let idx = self.level as usize;
                let floor = t.get(idx - 1).copied().unwrap_or(0);
                match t.get(idx) {
                    Some(&ceil) => {
                        ((self.tokens - floor) as f64 / (ceil - floor) as f64).clamp(0.0, 1.0)
                    }
                    // Top level
                    None => 1.0,
                }
            }
            LevelCurve::Rollover { tokens_per_level } => {
                (self.tokens as f64 / *tokens_per_level as f64).clamp(0.0, 1.0)
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            credits: self.credits,
            tokens: self.tokens,
            level: self.level,
        }
    }
}
