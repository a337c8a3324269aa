//! Core type bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::ArcadeError;
use crate::economy::LedgerSnapshot;
use crate::events::GameEvent;

/// Python view of the ledger.
#[pyclass(name = "Ledger")]
#[derive(Clone, Debug)]
pub struct PyLedger(pub LedgerSnapshot);

#[pymethods]
impl PyLedger {
    #[getter]
    fn credits(&self) -> i64 {
        self.0.credits
    }

    #[getter]
    fn tokens(&self) -> i64 {
        self.0.tokens
    }

    #[getter]
    fn level(&self) -> u32 {
        self.0.level
    }

    fn __repr__(&self) -> String {
        format!(
            "Ledger(credits={}, tokens={}, level={})",
            self.0.credits, self.0.tokens, self.0.level
        )
    }
}

/// Map engine errors to Python exceptions.
///
/// Caller mistakes become `ValueError`; provider failures `RuntimeError`.
pub(crate) fn to_py_err(err: ArcadeError) -> PyErr {
    match err {
        ArcadeError::Payment(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Serialize events for Python.
pub(crate) fn events_to_json(events: &[GameEvent]) -> PyResult<Vec<String>> {
    events
        .iter()
        .map(|e| serde_json::to_string(e).map_err(|err| PyRuntimeError::new_err(err.to_string())))
        .collect()
}
