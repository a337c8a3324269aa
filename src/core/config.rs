//! Game configuration types.
//!
//! Each game variant is configured at startup by providing:
//! - `EconomyConfig`: starting balances, entry cost, level curve
//! - `CardsConfig`: deck composition and credit packs for the card game
//! - `RaceConfig`: roster, track geometry, tick rate for the race game
//!
//! `Default` impls carry the constants the shipped games use. Configs can
//! also be loaded from JSON; missing fields fall back to those defaults.

use serde::{Deserialize, Serialize};

use super::error::{ArcadeError, Result};
use crate::cards::DeckComposition;
use crate::economy::CreditPack;
use crate::race::Racer;

/// How tokens translate into levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelCurve {
    /// Ordered token floors, `T[0] = 0`. Level `n` starts at `T[n-1]`.
    ///
    /// Tokens are never consumed; the level climbs one step per evaluation.
    Thresholds(Vec<i64>),

    /// Every `tokens_per_level` tokens are exchanged for one level.
    Rollover { tokens_per_level: i64 },
}

impl LevelCurve {
    /// The card game's curve: levels 1-5.
    #[must_use]
    pub fn card_thresholds() -> Self {
        LevelCurve::Thresholds(vec![0, 100, 250, 500, 1000])
    }

    fn validate(&self) -> Result<()> {
        match self {
            LevelCurve::Thresholds(t) => {
                if t.first() != Some(&0) {
                    return Err(ArcadeError::Config(
                        "level thresholds must start at 0".to_string(),
                    ));
                }
                if t.windows(2).any(|w| w[1] <= w[0]) {
                    return Err(ArcadeError::Config(
                        "level thresholds must be strictly increasing".to_string(),
                    ));
                }
            }
            LevelCurve::Rollover { tokens_per_level } => {
                if *tokens_per_level <= 0 {
                    return Err(ArcadeError::Config(
                        "tokens_per_level must be positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::card_thresholds()
    }
}

/// Starting balances and round pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub initial_credits: i64,
    pub initial_tokens: i64,

    /// Credits deducted when a round starts.
    pub entry_cost: i64,

    pub level_curve: LevelCurve,

    /// Emit a one-time prompt when a paid round leaves `credits <= entry_cost`.
    pub low_funds_prompt: bool,

    /// Most recent rounds kept in history. `None` keeps the whole session.
    pub history_limit: Option<usize>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_credits: 100,
            initial_tokens: 0,
            entry_cost: 20,
            level_curve: LevelCurve::default(),
            low_funds_prompt: false,
            history_limit: None,
        }
    }
}

impl EconomyConfig {
    #[must_use]
    pub fn with_initial_credits(mut self, credits: i64) -> Self {
        self.initial_credits = credits;
        self
    }

    #[must_use]
    pub fn with_initial_tokens(mut self, tokens: i64) -> Self {
        self.initial_tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_entry_cost(mut self, cost: i64) -> Self {
        self.entry_cost = cost;
        self
    }

    #[must_use]
    pub fn with_level_curve(mut self, curve: LevelCurve) -> Self {
        self.level_curve = curve;
        self
    }

    #[must_use]
    pub fn with_low_funds_prompt(mut self, enabled: bool) -> Self {
        self.low_funds_prompt = enabled;
        self
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Check the values can drive a session.
    pub fn validate(&self) -> Result<()> {
        if self.entry_cost < 0 {
            return Err(ArcadeError::Config("entry_cost must not be negative".to_string()));
        }
        self.level_curve.validate()
    }
}

/// How to pick a winner when several racers cross in the same tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First racer in roster order to cross wins; racers after it do not
    /// move on the finishing tick.
    #[default]
    IterationOrder,

    /// Every racer moves; the furthest past the line wins. Equal positions
    /// fall back to roster order.
    FurthestAhead,
}

/// Configuration for the card-flip game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsConfig {
    pub economy: EconomyConfig,
    pub composition: DeckComposition,
    pub packs: Vec<CreditPack>,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default(),
            composition: DeckComposition::default(),
            packs: vec![CreditPack::new("MAGIC_CARDS_1000", 1000, "5.00")],
        }
    }
}

impl CardsConfig {
    #[must_use]
    pub fn with_economy(mut self, economy: EconomyConfig) -> Self {
        self.economy = economy;
        self
    }

    #[must_use]
    pub fn with_composition(mut self, composition: DeckComposition) -> Self {
        self.composition = composition;
        self
    }

    #[must_use]
    pub fn with_pack(mut self, pack: CreditPack) -> Self {
        self.packs.push(pack);
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.economy.validate()?;
        self.composition.validate()
    }
}

/// Configuration for the racer-betting game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub economy: EconomyConfig,

    /// Roster in iteration order.
    pub racers: Vec<Racer>,

    /// Position every racer is reset to at round start.
    pub start_position: f64,

    /// A racer at or past this position has finished.
    pub finish_line: f64,

    /// Per-tick advance is drawn uniformly from `[min_step, max_step)`.
    pub min_step: f64,
    pub max_step: f64,

    /// Fixed simulation rate.
    pub tick_rate_hz: u32,

    /// Tokens paid when the selected racer wins.
    pub win_tokens: i64,

    pub tie_break: TieBreak,

    pub packs: Vec<CreditPack>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default()
                .with_level_curve(LevelCurve::Rollover {
                    tokens_per_level: 100,
                })
                .with_low_funds_prompt(true),
            racers: vec![
                Racer::new("griffin", "Griffin"),
                Racer::new("dragon", "Dragon"),
                Racer::new("phoenix", "Phoenix"),
                Racer::new("unicorn", "Unicorn"),
                Racer::new("hydra", "Hydra"),
            ],
            start_position: 10.0,
            // 800-unit track minus the racer footprint
            finish_line: 700.0,
            min_step: 1.0,
            max_step: 6.0,
            tick_rate_hz: 60,
            win_tokens: 50,
            tie_break: TieBreak::default(),
            packs: vec![
                CreditPack::new("CREDIT_PACK_50", 50, "0.99"),
                CreditPack::new("CREDIT_PACK_120", 120, "1.99"),
                CreditPack::new("CREDIT_PACK_300", 300, "4.99"),
            ],
        }
    }
}

impl RaceConfig {
    #[must_use]
    pub fn with_economy(mut self, economy: EconomyConfig) -> Self {
        self.economy = economy;
        self
    }

    #[must_use]
    pub fn with_racers(mut self, racers: Vec<Racer>) -> Self {
        self.racers = racers;
        self
    }

    #[must_use]
    pub fn with_finish_line(mut self, finish_line: f64) -> Self {
        self.finish_line = finish_line;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, min_step: f64, max_step: f64) -> Self {
        self.min_step = min_step;
        self.max_step = max_step;
        self
    }

    #[must_use]
    pub fn with_tick_rate(mut self, hz: u32) -> Self {
        self.tick_rate_hz = hz;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.economy.validate()?;

        if self.racers.is_empty() {
            return Err(ArcadeError::Config("race needs at least one racer".to_string()));
        }
        for (i, racer) in self.racers.iter().enumerate() {
            if self.racers[..i].iter().any(|r| r.id == racer.id) {
                return Err(ArcadeError::Config(format!("duplicate racer id {}", racer.id)));
            }
        }
        let finite = [self.start_position, self.finish_line, self.min_step, self.max_step];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ArcadeError::Config("track and step values must be finite".to_string()));
        }
        if !(self.min_step > 0.0 && self.min_step < self.max_step) {
            return Err(ArcadeError::Config(
                "step range must satisfy 0 < min_step < max_step".to_string(),
            ));
        }
        if self.finish_line <= self.start_position {
            return Err(ArcadeError::Config(
                "finish_line must lie past start_position".to_string(),
            ));
        }
        if self.tick_rate_hz == 0 {
            return Err(ArcadeError::Config("tick_rate_hz must be positive".to_string()));
        }
        Ok(())
    }
}
