//! Game bindings for Python.

use pyo3::prelude::*;

use crate::core::{CardsConfig, RaceConfig};
use crate::economy::SimulatedPayments;
use crate::events::Command;
use crate::games::{CardsGame, RaceGame};
use crate::race::RacerId;
use crate::rules::RoundRules;

use super::py_core::{events_to_json, to_py_err, PyLedger};

/// Python wrapper for CardsGame.
#[pyclass(name = "CardsGame")]
pub struct PyCardsGame {
    game: CardsGame,
    payments: SimulatedPayments,
}

#[pymethods]
impl PyCardsGame {
    /// Create a session.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic decks
    /// - config_json: optional JSON config; missing fields use the defaults
    #[new]
    #[pyo3(signature = (seed = 42, config_json = None))]
    fn new(seed: u64, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => CardsConfig::from_json(json).map_err(to_py_err)?,
            None => CardsConfig::default(),
        };
        Ok(Self {
            game: CardsGame::new(config, seed).map_err(to_py_err)?,
            payments: SimulatedPayments::new(),
        })
    }

    fn start_round(&mut self) -> PyResult<Vec<String>> {
        self.apply(Command::StartRound)
    }

    fn select_slot(&mut self, index: usize) -> PyResult<Vec<String>> {
        self.apply(Command::SelectSlot(index))
    }

    fn cancel(&mut self) -> PyResult<Vec<String>> {
        self.apply(Command::Cancel)
    }

    /// Buy a credit pack through the simulated provider.
    fn purchase(&mut self, sku: &str) -> PyResult<Vec<String>> {
        let events = self.game.purchase(&mut self.payments, sku).map_err(to_py_err)?;
        events_to_json(&events)
    }

    #[getter]
    fn ledger(&self) -> PyLedger {
        PyLedger(self.game.ledger().snapshot())
    }

    #[getter]
    fn phase(&self) -> String {
        self.game.phase().to_string()
    }

    #[getter]
    fn can_play(&self) -> bool {
        self.game.can_play()
    }

    fn __repr__(&self) -> String {
        format!(
            "CardsGame(credits={}, phase={})",
            self.game.ledger().credits(),
            self.game.phase()
        )
    }
}

impl PyCardsGame {
    fn apply(&mut self, command: Command) -> PyResult<Vec<String>> {
        let events = self.game.apply(command).map_err(to_py_err)?;
        events_to_json(&events)
    }
}

/// Python wrapper for RaceGame.
#[pyclass(name = "RaceGame")]
pub struct PyRaceGame {
    game: RaceGame,
    payments: SimulatedPayments,
}

#[pymethods]
impl PyRaceGame {
    /// Create a session.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic races
    /// - config_json: optional JSON config; missing fields use the defaults
    #[new]
    #[pyo3(signature = (seed = 42, config_json = None))]
    fn new(seed: u64, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => RaceConfig::from_json(json).map_err(to_py_err)?,
            None => RaceConfig::default(),
        };
        Ok(Self {
            game: RaceGame::new(config, seed).map_err(to_py_err)?,
            payments: SimulatedPayments::new(),
        })
    }

    fn select_racer(&mut self, racer: &str) -> PyResult<Vec<String>> {
        self.apply(Command::SelectRacer(RacerId::new(racer)))
    }

    fn start_round(&mut self) -> PyResult<Vec<String>> {
        self.apply(Command::StartRound)
    }

    /// Advance the race by `seconds` of wall-clock time.
    ///
    /// Raises `ValueError` for negative or non-finite `seconds`.
    fn tick(&mut self, seconds: f64) -> PyResult<Vec<String>> {
        let command = Command::tick_secs(seconds).map_err(to_py_err)?;
        self.apply(command)
    }

    fn run_to_finish(&mut self) -> PyResult<Vec<String>> {
        let events = self.game.run_to_finish().map_err(to_py_err)?;
        events_to_json(&events)
    }

    fn cancel(&mut self) -> PyResult<Vec<String>> {
        self.apply(Command::Cancel)
    }

    fn purchase(&mut self, sku: &str) -> PyResult<Vec<String>> {
        let events = self.game.purchase(&mut self.payments, sku).map_err(to_py_err)?;
        events_to_json(&events)
    }

    /// Racer ids in roster order.
    #[getter]
    fn racers(&self) -> Vec<String> {
        self.game.racers().iter().map(|r| r.id.to_string()).collect()
    }

    #[getter]
    fn ledger(&self) -> PyLedger {
        PyLedger(self.game.ledger().snapshot())
    }

    #[getter]
    fn phase(&self) -> String {
        self.game.phase().to_string()
    }

    fn __repr__(&self) -> String {
        let selected = self
            .game
            .selected()
            .map_or_else(|| "none".to_string(), ToString::to_string);
        format!(
            "RaceGame(credits={}, selected={}, phase={})",
            self.game.ledger().credits(),
            selected,
            self.game.phase()
        )
    }
}

impl PyRaceGame {
    fn apply(&mut self, command: Command) -> PyResult<Vec<String>> {
        let events = self.game.apply(command).map_err(to_py_err)?;
        events_to_json(&events)
    }
}
