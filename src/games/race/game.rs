//! Racer-betting game implementation.

use std::time::Duration;

use crate::core::{ArcadeError, GameRng, GameRngState, RaceConfig, Result};
use crate::economy::{purchase, Ledger, PackCatalog, PaymentProvider};
use crate::events::{AudioCue, Command, CommandKind, GameEvent};
use crate::race::{resolve_race, RaceSim, Racer, RacerId};
use crate::round::{LevelCheck, RoundEngine, RoundPhase};
use crate::rules::RoundRules;

/// One player's racer-betting session.
#[derive(Clone, Debug)]
pub struct RaceGame {
    config: RaceConfig,
    ledger: Ledger,
    round: RoundEngine,
    catalog: PackCatalog,
    rng: GameRng,
    sim: RaceSim,
    /// Backed racer; kept across rounds until changed.
    selected: Option<RacerId>,
}

impl RaceGame {
    /// Create a session. `seed` drives every race.
    pub fn new(config: RaceConfig, seed: u64) -> Result<Self> {
        // Validates the whole config, economy included
        let sim = RaceSim::new(&config)?;

        Ok(Self {
            ledger: Ledger::new(&config.economy),
            round: RoundEngine::new(LevelCheck::OnWin, config.economy.low_funds_prompt)
                .with_history_limit(config.economy.history_limit),
            catalog: PackCatalog::new(config.packs.clone()),
            rng: GameRng::new(seed).for_context("race"),
            sim,
            selected: None,
            config,
        })
    }

    /// Session with the shipped configuration.
    pub fn with_defaults(seed: u64) -> Result<Self> {
        Self::new(RaceConfig::default(), seed)
    }

    #[must_use]
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    #[must_use]
    pub fn round(&self) -> &RoundEngine {
        &self.round
    }

    #[must_use]
    pub fn catalog(&self) -> &PackCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn sim(&self) -> &RaceSim {
        &self.sim
    }

    #[must_use]
    pub fn selected(&self) -> Option<&RacerId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn racers(&self) -> &[Racer] {
        &self.config.racers
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Tick the race in one-interval steps until it resolves.
    ///
    /// Returns all events produced along the way.
    pub fn run_to_finish(&mut self) -> Result<Vec<GameEvent>> {
        self.round.expect_phase(&[RoundPhase::Resolving], "run the race")?;

        let step = self.sim.tick_interval();
        let mut events = Vec::new();
        while self.round.phase() == RoundPhase::Resolving {
            events.extend(self.tick(step)?);
        }
        Ok(events)
    }

    fn select_racer(&mut self, racer: RacerId) -> Result<Vec<GameEvent>> {
        self.round.expect_phase(&[RoundPhase::Idle], "select a racer")?;
        if !self.sim.field().contains(&racer) {
            return Err(ArcadeError::UnknownRacer(racer.0));
        }

        self.selected = Some(racer.clone());
        Ok(vec![GameEvent::RacerSelected { racer }, self.ledger_event()])
    }

    fn start_round(&mut self) -> Result<Vec<GameEvent>> {
        self.round.expect_phase(&[RoundPhase::Idle], "start a round")?;
        if self.selected.is_none() {
            return Err(ArcadeError::NoSelection);
        }

        let cost = self.config.economy.entry_cost;
        let start = self.round.try_start_round(&mut self.ledger, cost)?;
        // No player input between paying and racing
        self.round.begin_resolving()?;
        self.sim.reset();

        let mut events = vec![
            GameEvent::RoundStarted {
                round: start.round,
                entry_cost: cost,
            },
            GameEvent::Cue(AudioCue::Start),
        ];
        if start.low_funds_prompt {
            events.push(GameEvent::LowFundsPrompt {
                credits: start.credits_after,
            });
        }
        events.push(self.ledger_event());
        Ok(events)
    }

    fn tick(&mut self, elapsed: Duration) -> Result<Vec<GameEvent>> {
        self.round.expect_phase(&[RoundPhase::Resolving], "tick")?;
        let selected = self.selected.clone().ok_or(ArcadeError::NoSelection)?;

        let winner = self.sim.advance(&mut self.rng, elapsed);
        let mut events = vec![GameEvent::RaceProgress {
            lanes: self.sim.field().lanes().to_vec(),
        }];

        let Some(winner) = winner else {
            return Ok(events);
        };

        let outcome = resolve_race(&winner, &selected, self.config.win_tokens);
        let summary = self.round.resolve(&mut self.ledger, outcome)?;

        events.push(GameEvent::RaceFinished { winner, selected });
        events.extend(AudioCue::for_outcome(&outcome).map(GameEvent::Cue));
        events.push(GameEvent::RoundResolved(summary));
        if summary.progress.leveled_up {
            events.push(GameEvent::LevelUp {
                level: summary.progress.level,
            });
        }
        events.push(self.ledger_event());
        Ok(events)
    }

    fn cancel(&mut self) -> Result<Vec<GameEvent>> {
        self.round.cancel()?;
        self.sim.reset();
        Ok(vec![
            GameEvent::RoundCancelled {
                round: self.round.rounds_played(),
            },
            self.ledger_event(),
        ])
    }
}

impl RoundRules for RaceGame {
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    fn entry_cost(&self) -> i64 {
        self.config.economy.entry_cost
    }

    /// A race can start only with a racer backed.
    fn can_play(&self) -> bool {
        self.selected.is_some()
            && self.round.is_idle()
            && self.ledger.can_afford(self.config.economy.entry_cost)
    }

    fn legal_commands(&self) -> Vec<CommandKind> {
        match self.round.phase() {
            RoundPhase::Idle => {
                let mut commands = vec![CommandKind::SelectRacer];
                if self.can_play() {
                    commands.push(CommandKind::StartRound);
                }
                commands
            }
            RoundPhase::Armed | RoundPhase::Resolving => {
                vec![CommandKind::Tick, CommandKind::Cancel]
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>> {
        match command {
            Command::SelectRacer(racer) => self.select_racer(racer),
            Command::StartRound => self.start_round(),
            Command::Tick(elapsed) => self.tick(elapsed),
            Command::Cancel => self.cancel(),
            Command::SelectSlot(_) => Err(ArcadeError::UnsupportedCommand(command.kind().name())),
        }
    }

    /// Recharging is locked while a race is running.
    fn purchase(&mut self, provider: &mut dyn PaymentProvider, sku: &str) -> Result<Vec<GameEvent>> {
        self.round.expect_phase(&[RoundPhase::Idle], "buy credits")?;
        let receipt = purchase(&mut self.ledger, &self.catalog, provider, sku)?;

        Ok(vec![
            GameEvent::CreditsPurchased {
                sku: receipt.sku,
                credits: receipt.credits,
            },
            self.ledger_event(),
        ])
    }
}
