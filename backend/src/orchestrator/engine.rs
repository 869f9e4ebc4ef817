//! Simulation Engine
//!
//! Owns every piece of mutable state for one run and drives the dispatch
//! loop:
//! - Event scheduler (clock + pending resumptions)
//! - Service counter (capacity-one FIFO resource)
//! - Observation sink (waiting times)
//! - Random stream
//! - Process arena and optional event log
//!
//! # Dispatch loop
//!
//! ```text
//! while the earliest pending event is at or before the horizon:
//! 1. Advance the clock to its timestamp
//! 2. Resume its lifecycle until the next yield
//! 3. Apply the yield:
//!      Timeout(d) → schedule resumption at now + d
//!      Request    → grant now and keep running, or park in the line
//!      Spawn(c)   → run c to its first yield, then keep running
//!      Exit       → release the counter if held, hand it to the next waiter
//! ```
//!
//! Lifecycles still pending when the loop stops are abandoned: nothing is
//! recorded or released for them.
//!
//! # Example
//!
//! ```rust
//! use queue_simulator_core_rs::orchestrator::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::default(); // 10/h arrivals, 15/h service, 360 min
//! let outcome = Simulation::start(config).unwrap().run().unwrap();
//!
//! let summary = outcome.waiting_times.summary().unwrap();
//! println!("Total students served: {}", summary.count);
//! println!("Average waiting time: {:.2} minutes", summary.mean);
//! ```

use crate::arrivals::{ArrivalConfig, ArrivalGenerator};
use crate::core::time::SimTime;
use crate::events::{EventScheduler, SchedulerError};
use crate::lifecycle::{Lifecycle, ProcessContext, Yield};
use crate::models::{
    EventLog, Grant, ProcessId, ProcessState, ProcessTable, ResourceError, ResourceQueue,
    WaitingTimes,
};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete run configuration
///
/// Rates are quoted per `rate_period` time units and converted to mean
/// durations by reciprocal scaling. The default is the cafeteria scenario:
/// 10 students/hour arriving, 15/hour served, a 6-hour day on a minute clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the run's random stream (must be non-zero)
    pub seed: u64,

    /// Arrivals per `rate_period`
    pub arrival_rate: f64,

    /// Services per `rate_period` while the counter is busy
    pub service_rate: f64,

    /// Time span the rates are quoted in (60.0 = per hour on a minute clock)
    pub rate_period: f64,

    /// Simulated-time cutoff; events after it are never dispatched
    pub horizon: SimTime,

    /// Keep a full lifecycle event log
    pub record_events: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            arrival_rate: 10.0,
            service_rate: 15.0,
            rate_period: 60.0,
            horizon: 6.0 * 60.0,
            record_events: false,
        }
    }
}

impl SimulationConfig {
    /// Rates per unit time, no event log.
    pub fn new(seed: u64, arrival_rate: f64, service_rate: f64, horizon: SimTime) -> Self {
        Self {
            seed,
            arrival_rate,
            service_rate,
            rate_period: 1.0,
            horizon,
            record_events: false,
        }
    }

    pub fn with_events(mut self, record_events: bool) -> Self {
        self.record_events = record_events;
        self
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Mean durations derived from the rates.
    pub fn arrival_config(&self) -> Result<ArrivalConfig, SimulationError> {
        ArrivalConfig::from_rates(self.arrival_rate, self.service_rate, self.rate_period)
    }

    /// Reject configurations that cannot produce a meaningful run.
    ///
    /// A zero horizon is accepted: it yields an empty run whose summary
    /// reports `NoCompletedEntities`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.seed == 0 {
            return Err(SimulationError::InvalidConfig(
                "seed must be non-zero".to_string(),
            ));
        }
        if !(self.horizon.is_finite() && self.horizon >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "horizon must be finite and non-negative, got {}",
                self.horizon
            )));
        }
        self.arrival_config().map(|_| ())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Everything that can stop a run
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration rejected before the run started
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// No student was served within the horizon, so there is nothing to aggregate
    #[error("No entities completed within the horizon")]
    NoCompletedEntities,

    /// Scheduling invariant broken; indicates a lifecycle defect
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Resource protocol broken; indicates a lifecycle defect
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Dispatch targeted a lifecycle that does not exist or already ended
    #[error("Unknown or terminated process: {0}")]
    UnknownProcess(ProcessId),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Run Outcome
// ============================================================================

/// Everything a finished run exposes to its caller
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Waiting times in grant order
    pub waiting_times: WaitingTimes,

    /// Horizon the run was cut off at
    pub horizon: SimTime,

    /// Clock value of the last dispatched event
    pub end_time: SimTime,

    /// Students that arrived within the horizon
    pub arrivals: usize,

    /// Students still in line at the horizon
    pub abandoned_waiting: usize,

    /// Students at the counter at the horizon
    pub abandoned_in_service: usize,

    /// Time-average waiting-line length over `[0, horizon]`
    pub mean_queue_length: f64,

    /// Fraction of `[0, horizon]` the counter was busy
    pub utilisation: f64,

    /// Events dispatched by the scheduler
    pub dispatched: u64,

    /// Lifecycle events (empty unless `record_events`)
    pub event_log: EventLog,
}

// ============================================================================
// Simulation
// ============================================================================

/// One run's complete state
///
/// Nothing is shared between runs: every `Simulation` starts with an empty
/// scheduler, an idle counter, an empty sink and a freshly seeded stream.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    scheduler: EventScheduler,
    counter: ResourceQueue,
    waits: WaitingTimes,
    rng: RngManager,
    processes: ProcessTable,
    event_log: EventLog,
}

impl Simulation {
    /// Validate `config` and build an empty run with no lifecycles.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let rng = RngManager::new(config.seed);

        Ok(Self {
            config,
            scheduler: EventScheduler::new(),
            counter: ResourceQueue::new(),
            waits: WaitingTimes::new(),
            rng,
            processes: ProcessTable::new(),
            event_log: EventLog::new(),
        })
    }

    /// Build a run and start the arrival generator at time zero.
    pub fn start(config: SimulationConfig) -> Result<Self, SimulationError> {
        let arrivals = config.arrival_config()?;
        let mut sim = Self::new(config)?;
        sim.spawn(Box::new(ArrivalGenerator::new(arrivals)))?;
        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    pub fn counter(&self) -> &ResourceQueue {
        &self.counter
    }

    pub fn waiting_times(&self) -> &WaitingTimes {
        &self.waits
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn process_state(&self, pid: ProcessId) -> Option<ProcessState> {
        self.processes.state(pid)
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    /// Register `body` and run it at the current time until its first
    /// suspension point, before returning.
    pub fn spawn(&mut self, body: Box<dyn Lifecycle>) -> Result<ProcessId, SimulationError> {
        let label = body.label();
        let pid = self.processes.insert(body);
        debug!(%pid, label, now = self.now(), "spawned");
        self.drive(pid)?;
        Ok(pid)
    }

    /// Dispatch events in `(time, sequence)` order up to and including
    /// `horizon`. Returns the number of events dispatched by this call.
    pub fn run_until(&mut self, horizon: SimTime) -> Result<u64, SimulationError> {
        let before = self.scheduler.dispatched();

        while let Some(event) = self.scheduler.pop_due(horizon)? {
            trace!(process = %event.process, time = event.time, seq = event.seq, "dispatch");
            self.drive(event.process)?;
        }

        Ok(self.scheduler.dispatched() - before)
    }

    /// Run to the configured horizon and collect the outcome.
    pub fn run(mut self) -> Result<RunOutcome, SimulationError> {
        let horizon = self.config.horizon;
        info!(
            seed = self.config.seed,
            arrival_rate = self.config.arrival_rate,
            service_rate = self.config.service_rate,
            rate_period = self.config.rate_period,
            horizon,
            "simulation started"
        );

        self.run_until(horizon)?;

        let outcome = RunOutcome {
            horizon,
            end_time: self.scheduler.now(),
            arrivals: self.processes.spawned("student"),
            abandoned_waiting: self.processes.count("student", ProcessState::AwaitingGrant),
            abandoned_in_service: self.processes.count("student", ProcessState::Scheduled),
            mean_queue_length: self.counter.mean_queue_length(horizon),
            utilisation: self.counter.utilisation(horizon),
            dispatched: self.scheduler.dispatched(),
            waiting_times: self.waits,
            event_log: self.event_log,
        };

        info!(
            served = outcome.waiting_times.len(),
            arrivals = outcome.arrivals,
            dispatched = outcome.dispatched,
            end_time = outcome.end_time,
            "simulation completed"
        );
        Ok(outcome)
    }

    /// Resume `pid` and keep applying its yields until it suspends or exits.
    fn drive(&mut self, pid: ProcessId) -> Result<(), SimulationError> {
        let mut body = self.processes.take(pid)?;

        loop {
            let now = self.scheduler.now();
            let step = {
                let events = if self.config.record_events {
                    Some(&mut self.event_log)
                } else {
                    None
                };
                let mut ctx = ProcessContext::new(pid, now, &mut self.rng, &mut self.waits, events);
                body.resume(&mut ctx)?
            };

            match step {
                Yield::Timeout(duration) => {
                    self.scheduler.suspend_for(pid, duration)?;
                    return self.processes.put_back(pid, body, ProcessState::Scheduled);
                }
                Yield::Request => match self.counter.request(pid, now)? {
                    Grant::Granted => continue,
                    Grant::Queued { .. } => {
                        return self
                            .processes
                            .put_back(pid, body, ProcessState::AwaitingGrant);
                    }
                },
                Yield::Spawn(child) => {
                    self.spawn(child)?;
                }
                Yield::Exit => {
                    drop(body);
                    return self.terminate(pid);
                }
            }
        }
    }

    /// End `pid`, releasing the counter if it still holds it.
    fn terminate(&mut self, pid: ProcessId) -> Result<(), SimulationError> {
        if self.counter.holder() == Some(pid) {
            let now = self.scheduler.now();
            if let Some(next) = self.counter.release(pid, now)? {
                self.scheduler.schedule_at(next, now)?;
                self.processes.set_state(next, ProcessState::Scheduled)?;
            }
        }
        debug!(%pid, now = self.now(), "terminated");
        self.processes.terminate(pid)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Run the single-server queue once and return the waiting times.
///
/// Rates are in entities per unit time; `horizon` is in the same unit.
///
/// # Errors
///
/// `InvalidConfig` for a zero seed, non-positive rates, or a negative or
/// non-finite horizon. Scheduling or resource faults abort the run.
///
/// # Example
///
/// ```rust
/// use queue_simulator_core_rs::run_simulation;
///
/// // 10 per hour and 15 per hour on a minute clock, for 6 hours.
/// let waits = run_simulation(123, 10.0 / 60.0, 15.0 / 60.0, 360.0).unwrap();
/// assert!(waits.as_slice().iter().all(|w| *w >= 0.0));
/// ```
pub fn run_simulation(
    seed: u64,
    arrival_rate: f64,
    service_rate: f64,
    horizon: SimTime,
) -> Result<WaitingTimes, SimulationError> {
    let config = SimulationConfig::new(seed, arrival_rate, service_rate, horizon);
    Ok(Simulation::start(config)?.run()?.waiting_times)
}
