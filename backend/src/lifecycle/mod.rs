//! Suspendable lifecycles
//!
//! A lifecycle is an explicit state machine that the engine resumes whenever
//! it is due. Each call to `resume` runs until the next suspension point and
//! reports it as a `Yield`:
//!
//! - `Timeout(d)`: resume me `d` time units from now
//! - `Request`: I want the counter; resume me once it is mine (immediately
//!   if it is idle)
//! - `Spawn(child)`: start `child` now, run it to its first suspension, then
//!   resume me at the same instant
//! - `Exit`: I am done; anything I still hold is released for me
//!
//! Lifecycles never touch the scheduler or the resource directly; the engine
//! applies every yield, which keeps ordering and mutual exclusion in one
//! place.
//!
//! # Writing a lifecycle
//!
//! ```rust
//! use queue_simulator_core_rs::lifecycle::{Lifecycle, ProcessContext, Yield};
//! use queue_simulator_core_rs::SimulationError;
//!
//! /// Takes the counter for a fixed time, once.
//! #[derive(Debug)]
//! struct Inspector {
//!     done_waiting: bool,
//! }
//!
//! impl Lifecycle for Inspector {
//!     fn resume(&mut self, _ctx: &mut ProcessContext<'_>) -> Result<Yield, SimulationError> {
//!         if !self.done_waiting {
//!             self.done_waiting = true;
//!             return Ok(Yield::Request);
//!         }
//!         Ok(Yield::Exit)
//!     }
//!
//!     fn label(&self) -> &'static str {
//!         "inspector"
//!     }
//! }
//! ```

pub mod student;

pub use student::Student;

use crate::core::time::SimTime;
use crate::models::{Event, EventLog, ProcessId, WaitingTimes};
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use std::fmt;

/// Suspension point reported by a lifecycle
pub enum Yield {
    Timeout(SimTime),
    Request,
    Spawn(Box<dyn Lifecycle>),
    Exit,
}

impl fmt::Debug for Yield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yield::Timeout(d) => f.debug_tuple("Timeout").field(d).finish(),
            Yield::Request => f.write_str("Request"),
            Yield::Spawn(child) => f.debug_tuple("Spawn").field(&child.label()).finish(),
            Yield::Exit => f.write_str("Exit"),
        }
    }
}

/// A resumable simulation process
pub trait Lifecycle: fmt::Debug {
    /// Run from the last suspension point to the next one.
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Result<Yield, SimulationError>;

    /// Short kind name, used for bookkeeping and logs.
    fn label(&self) -> &'static str;
}

/// What a lifecycle may see and touch while it runs
pub struct ProcessContext<'a> {
    pid: ProcessId,
    now: SimTime,
    rng: &'a mut RngManager,
    waits: &'a mut WaitingTimes,
    events: Option<&'a mut EventLog>,
}

impl<'a> ProcessContext<'a> {
    pub(crate) fn new(
        pid: ProcessId,
        now: SimTime,
        rng: &'a mut RngManager,
        waits: &'a mut WaitingTimes,
        events: Option<&'a mut EventLog>,
    ) -> Self {
        Self {
            pid,
            now,
            rng,
            waits,
            events,
        }
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// The run's single random stream.
    pub fn rng(&mut self) -> &mut RngManager {
        &mut *self.rng
    }

    /// Append a waiting-time sample to the observation sink.
    pub fn record_wait(&mut self, wait: SimTime) {
        self.waits.record(wait);
    }

    /// Log a lifecycle event; a no-op unless the run records events.
    pub fn log_event(&mut self, event: Event) {
        if let Some(log) = self.events.as_deref_mut() {
            log.log(event);
        }
    }
}
