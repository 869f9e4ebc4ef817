//! Run reports
//!
//! Turns a `RunOutcome` into a serializable record: the config it came from,
//! waiting-time aggregates, queue statistics and a fingerprint. Formatting
//! for humans is left to the caller.

use crate::core::time::SimTime;
use crate::models::WaitSummary;
use crate::orchestrator::engine::{RunOutcome, Simulation, SimulationConfig, SimulationError};
use crate::orchestrator::fingerprint::compute_run_fingerprint;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Serializable result of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Random label for this report; not part of the fingerprint
    pub run_id: Uuid,

    pub config: SimulationConfig,

    /// Students granted the counter (= number of waiting-time samples)
    pub served: usize,

    /// `None` when nobody was served within the horizon
    pub summary: Option<WaitSummary>,

    pub arrivals: usize,
    pub abandoned_waiting: usize,
    pub abandoned_in_service: usize,

    /// Time-average number waiting in line
    pub mean_queue_length: f64,

    /// Fraction of the horizon the counter was busy
    pub utilisation: f64,

    pub end_time: SimTime,

    /// SHA-256 over config and waiting-time bits
    pub fingerprint: String,
}

impl RunReport {
    pub fn from_outcome(
        config: &SimulationConfig,
        outcome: &RunOutcome,
    ) -> Result<Self, SimulationError> {
        let summary = match outcome.waiting_times.summary() {
            Ok(summary) => Some(summary),
            Err(SimulationError::NoCompletedEntities) => None,
            Err(other) => return Err(other),
        };

        Ok(Self {
            run_id: Uuid::new_v4(),
            config: config.clone(),
            served: outcome.waiting_times.len(),
            summary,
            arrivals: outcome.arrivals,
            abandoned_waiting: outcome.abandoned_waiting,
            abandoned_in_service: outcome.abandoned_in_service,
            mean_queue_length: outcome.mean_queue_length,
            utilisation: outcome.utilisation,
            end_time: outcome.end_time,
            fingerprint: compute_run_fingerprint(config, &outcome.waiting_times)?,
        })
    }

    /// Aggregates, or the empty-result error when nobody was served.
    pub fn summary(&self) -> Result<WaitSummary, SimulationError> {
        self.summary.ok_or(SimulationError::NoCompletedEntities)
    }

    /// Little's-law prediction of the mean line length: λ × mean wait.
    pub fn littles_law_queue_length(&self) -> Option<f64> {
        let lambda = self.config.arrival_rate / self.config.rate_period;
        self.summary.map(|s| lambda * s.mean)
    }
}

/// Run `config` once and report on it.
pub fn run_report(config: SimulationConfig) -> Result<RunReport, SimulationError> {
    let outcome = Simulation::start(config.clone())?.run()?;
    RunReport::from_outcome(&config, &outcome)
}

// ============================================================================
// Replications
// ============================================================================

/// Aggregates across independent replications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    pub replications: usize,
    /// Replications that served at least one student
    pub with_samples: usize,
    pub mean_served: f64,
    /// Mean of the per-run mean waits
    pub mean_wait: f64,
    /// Largest per-run maximum wait
    pub max_wait: f64,
}

/// Run `count` replications sequentially, seeding them `seed, seed + 1, …`.
pub fn run_replications(
    config: &SimulationConfig,
    count: usize,
) -> Result<Vec<RunReport>, SimulationError> {
    (0..count as u64)
        .map(|offset| {
            let seed = config.seed.checked_add(offset).ok_or_else(|| {
                SimulationError::InvalidConfig(format!(
                    "seed {} overflows after {} replications",
                    config.seed, offset
                ))
            })?;
            let report = run_report(config.clone().with_seed(seed))?;
            info!(seed, served = report.served, "replication finished");
            Ok(report)
        })
        .collect()
}

/// Combine reports; `None` when no replication served anyone.
pub fn summarize_replications(reports: &[RunReport]) -> Option<ReplicationSummary> {
    let summaries: Vec<WaitSummary> = reports.iter().filter_map(|r| r.summary).collect();
    if summaries.is_empty() {
        return None;
    }

    let served: usize = reports.iter().map(|r| r.served).sum();
    let mean_wait = summaries.iter().map(|s| s.mean).sum::<f64>() / summaries.len() as f64;
    let max_wait = summaries
        .iter()
        .map(|s| s.max)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(ReplicationSummary {
        replications: reports.len(),
        with_samples: summaries.len(),
        mean_served: served as f64 / reports.len() as f64,
        mean_wait,
        max_wait,
    })
}
