//! Queue Simulator CLI
//!
//! Runs the cafeteria queue and prints a waiting-time summary. Flags override
//! values loaded from `--config`, which in turn override the built-in
//! cafeteria scenario.

use anyhow::{Context, Result};
use clap::Parser;
use queue_simulator_core_rs::orchestrator::ReplicationSummary;
use queue_simulator_core_rs::{
    run_replications, run_report, summarize_replications, RunReport, SimulationConfig,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "queue-sim")]
#[command(about = "Single-counter queue simulation")]
#[command(version)]
struct Cli {
    /// Random seed (must be non-zero)
    #[arg(long)]
    seed: Option<u64>,

    /// Arrivals per rate period
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Services per rate period
    #[arg(long)]
    service_rate: Option<f64>,

    /// Length of the period the rates are quoted in (60 = per hour, minute clock)
    #[arg(long)]
    rate_period: Option<f64>,

    /// Simulated time to run for
    #[arg(long)]
    horizon: Option<f64>,

    /// JSON file holding a SimulationConfig; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Independent replications with seeds seed, seed+1, ...
    #[arg(long, default_value = "1")]
    replications: usize,

    /// Emit reports as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rate) = self.arrival_rate {
            config.arrival_rate = rate;
        }
        if let Some(rate) = self.service_rate {
            config.service_rate = rate;
        }
        if let Some(period) = self.rate_period {
            config.rate_period = period;
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        Ok(config)
    }
}

fn print_report(report: &RunReport) {
    println!("University Cafeteria Queue Simulation Completed");
    println!("Total students served: {}", report.served);
    match report.summary {
        Some(summary) => {
            println!("Average waiting time: {:.2} minutes", summary.mean);
            println!("Maximum waiting time: {:.2} minutes", summary.max);
        }
        None => println!(
            "No student reached the counter within {} minutes",
            report.config.horizon
        ),
    }
}

fn print_replications(summary: Option<ReplicationSummary>, count: usize) {
    println!();
    println!("Across {} replications:", count);
    match summary {
        Some(s) => {
            println!("  Mean students served: {:.2}", s.mean_served);
            println!("  Mean of average waits: {:.2} minutes", s.mean_wait);
            println!("  Largest maximum wait: {:.2} minutes", s.max_wait);
            println!("  Replications with samples: {}", s.with_samples);
        }
        None => println!("  No student served in any replication"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve_config()?;
    tracing::info!(
        seed = config.seed,
        horizon = config.horizon,
        replications = cli.replications,
        "starting queue simulation"
    );

    if cli.replications <= 1 {
        let report = run_report(config).context("simulation failed")?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        return Ok(());
    }

    let reports = run_replications(&config, cli.replications).context("replications failed")?;
    let combined = summarize_replications(&reports);

    if cli.json {
        let out = serde_json::json!({
            "reports": reports,
            "summary": combined,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for report in &reports {
            println!("--- seed {} ---", report.config.seed);
            print_report(report);
        }
        print_replications(combined, reports.len());
    }
    Ok(())
}
