//! Queue Simulator Core - Rust Engine
//!
//! Discrete-event simulation of a single-server queue: one counter, an
//! unbounded first-come-first-served line, exponential interarrival and
//! service times, and a fixed horizon.
//!
//! # Architecture
//!
//! - **core**: Simulated time and the monotonic clock
//! - **rng**: Deterministic random variates
//! - **events**: Time-ordered scheduler of lifecycle resumptions
//! - **models**: Resource queue, observation sink, process arena, event log
//! - **lifecycle**: Suspendable process interface and the student lifecycle
//! - **arrivals**: The arrival-generating lifecycle
//! - **orchestrator**: Run aggregate, dispatch loop, reports
//!
//! # Critical Invariants
//!
//! 1. The clock never moves backward
//! 2. Simultaneous events resume in scheduling order
//! 3. At most one student holds the counter; grants follow request order
//! 4. All randomness is deterministic (seeded RNG)
//!
//! # Example
//!
//! ```
//! use queue_simulator_core_rs::run_simulation;
//!
//! let waits = run_simulation(123, 10.0 / 60.0, 15.0 / 60.0, 360.0).unwrap();
//! let summary = waits.summary().unwrap();
//! assert!(summary.max >= summary.mean);
//! ```

// Module declarations
pub mod arrivals;
pub mod core;
pub mod events;
pub mod lifecycle;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalGenerator};
pub use core::time::{SimClock, SimTime};
pub use events::{EventScheduler, SchedulerError};
pub use lifecycle::{Lifecycle, ProcessContext, Student, Yield};
pub use models::{
    event::{Event, EventLog},
    observation::{WaitSummary, WaitingTimes},
    process::{ProcessId, ProcessState},
    resource::{Grant, ResourceError, ResourceQueue},
};
pub use orchestrator::{
    run_replications, run_report, run_simulation, summarize_replications, RunOutcome, RunReport,
    Simulation, SimulationConfig, SimulationError,
};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn queue_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::run_simulation, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::summarize, m)?)?;
    Ok(())
}
