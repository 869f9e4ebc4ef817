//! PyO3 bindings
//!
//! Exposes the single run entry point and the summary to Python so existing
//! analysis notebooks can drive the engine directly.
//!
//! # Example (from Python)
//!
//! ```python
//! from queue_simulator_core_rs import run_simulation, summarize
//!
//! waits = run_simulation(123, 10 / 60, 15 / 60, 360.0)
//! stats = summarize(waits)
//! print(f"Total students served: {stats['count']}")
//! print(f"Average waiting time: {stats['mean']:.2f} minutes")
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::models::WaitingTimes;
use crate::orchestrator::SimulationError;

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidConfig(_) | SimulationError::NoCompletedEntities => {
            PyValueError::new_err(err.to_string())
        }
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Run the queue once and return waiting times in grant order.
///
/// Raises ValueError for invalid parameters.
#[pyfunction]
pub fn run_simulation(
    seed: u64,
    arrival_rate: f64,
    service_rate: f64,
    horizon: f64,
) -> PyResult<Vec<f64>> {
    crate::orchestrator::run_simulation(seed, arrival_rate, service_rate, horizon)
        .map(WaitingTimes::into_vec)
        .map_err(to_py_err)
}

/// Count, mean, max and min of a list of waiting times.
///
/// Raises ValueError when the list is empty.
#[pyfunction]
pub fn summarize(py: Python<'_>, waits: Vec<f64>) -> PyResult<Py<PyDict>> {
    let summary = WaitingTimes::from(waits).summary().map_err(to_py_err)?;

    let dict = PyDict::new_bound(py);
    dict.set_item("count", summary.count)?;
    dict.set_item("mean", summary.mean)?;
    dict.set_item("max", summary.max)?;
    dict.set_item("min", summary.min)?;
    Ok(dict.unbind())
}
