//! Arrival generation for the student population.
//!
//! The generator is itself a lifecycle: it sleeps for an exponential
//! interarrival gap, spawns one `Student`, and loops. It has no terminal
//! state; the run horizon is the only thing that stops it.
//!
//! # Key Principles
//!
//! 1. **Determinism**: same seed + same config → same arrival instants
//! 2. **Draw order**: interarrival gaps are drawn in arrival order; because a
//!    spawned student runs to its first suspension before the generator
//!    continues, a student served on arrival draws its service time before
//!    the next gap is drawn
//! 3. **Ids**: students are numbered from 1 in arrival order
//!
//! # Example
//!
//! ```
//! use queue_simulator_core_rs::arrivals::{ArrivalConfig, ArrivalGenerator};
//!
//! let config = ArrivalConfig::from_rates(10.0, 15.0, 60.0).unwrap();
//! assert_eq!(config.mean_interarrival, 6.0);
//! assert_eq!(config.mean_service, 4.0);
//!
//! let generator = ArrivalGenerator::new(config);
//! assert_eq!(generator.spawned(), 0);
//! ```

use crate::core::time::SimTime;
use crate::lifecycle::{Lifecycle, ProcessContext, Student, Yield};
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mean durations driving arrivals and service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// Mean time between consecutive arrivals
    pub mean_interarrival: SimTime,

    /// Mean service duration at the counter
    pub mean_service: SimTime,
}

impl ArrivalConfig {
    /// Convert rates quoted per `rate_period` into mean durations.
    ///
    /// With rates per hour and a minute clock, `rate_period` is 60.
    pub fn from_rates(
        arrival_rate: f64,
        service_rate: f64,
        rate_period: f64,
    ) -> Result<Self, SimulationError> {
        for (name, value) in [
            ("arrival_rate", arrival_rate),
            ("service_rate", service_rate),
            ("rate_period", rate_period),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            mean_interarrival: rate_period / arrival_rate,
            mean_service: rate_period / service_rate,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Draw the next gap and sleep
    Waiting,
    /// Gap elapsed; spawn the next student
    Spawning,
}

/// Lifecycle that keeps students arriving
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    config: ArrivalConfig,
    next_student: u64,
    stage: Stage,
}

impl ArrivalGenerator {
    pub fn new(config: ArrivalConfig) -> Self {
        Self {
            config,
            next_student: 1,
            stage: Stage::Waiting,
        }
    }

    /// Number of students spawned so far.
    pub fn spawned(&self) -> u64 {
        self.next_student - 1
    }
}

impl Lifecycle for ArrivalGenerator {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Result<Yield, SimulationError> {
        match self.stage {
            Stage::Waiting => {
                let gap = ctx.rng().exponential(self.config.mean_interarrival);
                self.stage = Stage::Spawning;
                Ok(Yield::Timeout(gap))
            }
            Stage::Spawning => {
                let id = self.next_student;
                self.next_student += 1;
                self.stage = Stage::Waiting;
                debug!(student = id, now = ctx.now(), "student arrived");
                Ok(Yield::Spawn(Box::new(Student::new(
                    id,
                    self.config.mean_service,
                ))))
            }
        }
    }

    fn label(&self) -> &'static str {
        "arrivals"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessId, WaitingTimes};
    use crate::rng::RngManager;

    #[test]
    fn test_rejects_non_positive_rates() {
        assert!(ArrivalConfig::from_rates(0.0, 15.0, 60.0).is_err());
        assert!(ArrivalConfig::from_rates(10.0, -1.0, 60.0).is_err());
        assert!(ArrivalConfig::from_rates(10.0, 15.0, f64::NAN).is_err());
    }

    #[test]
    fn test_alternates_sleep_and_spawn() {
        let config = ArrivalConfig::from_rates(1.0, 2.0, 1.0).unwrap();
        let mut generator = ArrivalGenerator::new(config);
        let mut rng = RngManager::new(11);
        let mut expected = RngManager::new(11);
        let mut waits = WaitingTimes::new();

        for round in 1..=3u64 {
            let sleep = {
                let mut ctx = ProcessContext::new(ProcessId(0), 0.0, &mut rng, &mut waits, None);
                generator.resume(&mut ctx).unwrap()
            };
            let gap = expected.exponential(1.0);
            assert!(matches!(sleep, Yield::Timeout(d) if d == gap));

            let spawn = {
                let mut ctx = ProcessContext::new(ProcessId(0), 0.0, &mut rng, &mut waits, None);
                generator.resume(&mut ctx).unwrap()
            };
            match spawn {
                Yield::Spawn(child) => assert_eq!(child.label(), "student"),
                other => panic!("expected spawn, got {:?}", other),
            }
            assert_eq!(generator.spawned(), round);
        }
    }
}
