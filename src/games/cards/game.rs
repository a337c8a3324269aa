//! Card-flip game implementation.

use tracing::debug;

use crate::cards::Deck;
use crate::core::{ArcadeError, CardsConfig, GameRng, GameRngState, Result};
use crate::economy::{purchase, Ledger, PackCatalog, PaymentProvider};
use crate::events::{AudioCue, Command, CommandKind, GameEvent};
use crate::round::{LevelCheck, RoundEngine, RoundPhase};
use crate::rules::RoundRules;

/// One player's card-flip session.
#[derive(Clone, Debug)]
pub struct CardsGame {
    config: CardsConfig,
    ledger: Ledger,
    round: RoundEngine,
    catalog: PackCatalog,
    rng: GameRng,
    /// Deck of the current or most recent round.
    deck: Option<Deck>,
}

impl CardsGame {
    /// Create a session. `seed` drives every shuffle.
    pub fn new(config: CardsConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ledger: Ledger::new(&config.economy),
            round: RoundEngine::new(LevelCheck::Always, config.economy.low_funds_prompt)
                .with_history_limit(config.economy.history_limit),
            catalog: PackCatalog::new(config.packs.clone()),
            rng: GameRng::new(seed).for_context("cards"),
            deck: None,
            config,
        })
    }

    /// Session with the shipped configuration.
    pub fn with_defaults(seed: u64) -> Result<Self> {
        Self::new(CardsConfig::default(), seed)
    }

    #[must_use]
    pub fn config(&self) -> &CardsConfig {
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
    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    fn start_round(&mut self) -> Result<Vec<GameEvent>> {
        let cost = self.config.economy.entry_cost;
        let start = self.round.try_start_round(&mut self.ledger, cost)?;

        let deck = Deck::build(&self.config.composition, &mut self.rng);
        let slots = deck.len();
        self.deck = Some(deck);

        let mut events = vec![
            GameEvent::RoundStarted {
                round: start.round,
                entry_cost: cost,
            },
            GameEvent::DeckDealt { slots },
        ];
        if start.low_funds_prompt {
            events.push(GameEvent::LowFundsPrompt {
                credits: start.credits_after,
            });
        }
        // The round-start refresh re-evaluates the level too
        let progress = self.ledger.level_progress();
        if progress.leveled_up {
            events.push(GameEvent::LevelUp {
                level: progress.level,
            });
        }
        events.push(self.ledger_event());
        Ok(events)
    }

    fn select_slot(&mut self, index: usize) -> Result<Vec<GameEvent>> {
        self.round.expect_phase(&[RoundPhase::Armed], "select a slot")?;
        let deck = self.deck.as_mut().ok_or(ArcadeError::InvalidPhaseTransition {
            phase: self.round.phase(),
            operation: "select a slot",
        })?;

        let (slot, outcome) = deck.reveal(index)?;
        debug!(index, kind = ?slot.kind, "slot revealed");
        let summary = self.round.resolve(&mut self.ledger, outcome)?;

        let mut events = vec![
            GameEvent::Cue(AudioCue::Flip),
            GameEvent::SlotRevealed { index, slot },
        ];
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
        Ok(vec![
            GameEvent::RoundCancelled {
                round: self.round.rounds_played(),
            },
            self.ledger_event(),
        ])
    }
}

impl RoundRules for CardsGame {
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    fn entry_cost(&self) -> i64 {
        self.config.economy.entry_cost
    }

    fn legal_commands(&self) -> Vec<CommandKind> {
        match self.round.phase() {
            RoundPhase::Idle if self.can_play() => vec![CommandKind::StartRound],
            RoundPhase::Idle => vec![],
            RoundPhase::Armed | RoundPhase::Resolving => {
                vec![CommandKind::SelectSlot, CommandKind::Cancel]
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>> {
        match command {
            Command::StartRound => self.start_round(),
            Command::SelectSlot(index) => self.select_slot(index),
            Command::Cancel => self.cancel(),
            Command::SelectRacer(_) | Command::Tick(_) => {
                Err(ArcadeError::UnsupportedCommand(command.kind().name()))
            }
        }
    }

    fn purchase(&mut self, provider: &mut dyn PaymentProvider, sku: &str) -> Result<Vec<GameEvent>> {
        let receipt = purchase(&mut self.ledger, &self.catalog, provider, sku)?;

        let mut events = vec![GameEvent::CreditsPurchased {
            sku: receipt.sku,
            credits: receipt.credits,
        }];
        // Any display refresh re-evaluates the level in this game
        let progress = self.ledger.level_progress();
        if progress.leveled_up {
            events.push(GameEvent::LevelUp {
                level: progress.level,
            });
        }
        events.push(self.ledger_event());
        Ok(events)
    }
}
