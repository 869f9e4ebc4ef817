//! Orchestrator - run aggregate, entry point and reporting
//!
//! See `engine.rs` for the dispatch loop.

pub mod engine;
pub mod fingerprint;
pub mod report;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{run_simulation, RunOutcome, Simulation, SimulationConfig, SimulationError};
pub use fingerprint::{compute_config_hash, compute_run_fingerprint};
pub use report::{
    run_replications, run_report, summarize_replications, ReplicationSummary, RunReport,
};
