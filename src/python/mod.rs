//! Python bindings for the arcade engine.
//!
//! Exposes both game variants so sessions can be scripted from Python.
//! Events come back as JSON strings, one per event.
//!
//! # Quick Start
//!
//! ```python
//! import arcade_engine as arcade
//!
//! game = arcade.RaceGame(seed=42)
//! game.select_racer("griffin")
//! game.start_round()
//! events = game.run_to_finish()
//! print(game.ledger)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// arcade_engine: session economy and round engine for arcade mini-games.
#[pymodule]
fn arcade_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLedger>()?;
    m.add_class::<PyCardsGame>()?;
    m.add_class::<PyRaceGame>()?;
    Ok(())
}
