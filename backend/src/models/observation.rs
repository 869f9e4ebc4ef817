//! Observation sink for waiting times
//!
//! One sample is appended per student at the moment the counter is granted.
//! Aggregates are only computed after the run; an empty sink refuses to
//! produce them rather than dividing by zero.

use crate::core::time::SimTime;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};

/// Append-only waiting-time samples in grant order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitingTimes {
    samples: Vec<SimTime>,
}

/// Aggregates over a non-empty set of waiting times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitSummary {
    pub count: usize,
    pub mean: SimTime,
    pub max: SimTime,
    pub min: SimTime,
}

impl WaitingTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, wait: SimTime) {
        self.samples.push(wait);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[SimTime] {
        &self.samples
    }

    pub fn into_vec(self) -> Vec<SimTime> {
        self.samples
    }

    /// Count, mean, max and min of the recorded waits.
    ///
    /// # Errors
    ///
    /// `SimulationError::NoCompletedEntities` when nothing was recorded.
    ///
    /// # Example
    /// ```
    /// use queue_simulator_core_rs::models::WaitingTimes;
    ///
    /// let mut waits = WaitingTimes::new();
    /// assert!(waits.summary().is_err());
    ///
    /// waits.record(0.0);
    /// waits.record(3.0);
    /// let summary = waits.summary().unwrap();
    /// assert_eq!(summary.count, 2);
    /// assert_eq!(summary.mean, 1.5);
    /// assert_eq!(summary.max, 3.0);
    /// ```
    pub fn summary(&self) -> Result<WaitSummary, SimulationError> {
        if self.samples.is_empty() {
            return Err(SimulationError::NoCompletedEntities);
        }

        let count = self.samples.len();
        let total: f64 = self.samples.iter().sum();
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);

        Ok(WaitSummary {
            count,
            mean: total / count as f64,
            max,
            min,
        })
    }
}

impl From<Vec<SimTime>> for WaitingTimes {
    fn from(samples: Vec<SimTime>) -> Self {
        Self { samples }
    }
}
