//! Run fingerprints
//!
//! A run is a pure function of its configuration, so two runs with the same
//! config must produce bit-identical waiting times. The fingerprint hashes
//! both into one SHA-256 digest, which makes determinism checks and
//! cross-machine comparisons a string comparison.
//!
//! # Critical Invariants
//!
//! - **Canonical config**: keys are sorted before hashing, so field order in
//!   a JSON config file does not matter
//! - **Bit-exact samples**: waiting times are hashed by their IEEE-754 bit
//!   patterns, not by a formatted rendering

use crate::models::WaitingTimes;
use crate::orchestrator::SimulationError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Deterministic SHA-256 of a serializable config, as lowercase hex.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let json = canonical_json(config)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 over the canonical config followed by every waiting time.
///
/// # Example
/// ```
/// use queue_simulator_core_rs::orchestrator::{compute_run_fingerprint, SimulationConfig};
/// use queue_simulator_core_rs::run_simulation;
///
/// let config = SimulationConfig::new(7, 1.0, 2.0, 50.0);
/// let a = run_simulation(7, 1.0, 2.0, 50.0).unwrap();
/// let b = run_simulation(7, 1.0, 2.0, 50.0).unwrap();
/// assert_eq!(
///     compute_run_fingerprint(&config, &a).unwrap(),
///     compute_run_fingerprint(&config, &b).unwrap(),
/// );
/// ```
pub fn compute_run_fingerprint<T: Serialize>(
    config: &T,
    waits: &WaitingTimes,
) -> Result<String, SimulationError> {
    let json = canonical_json(config)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    hasher.update((waits.len() as u64).to_le_bytes());
    for wait in waits.as_slice() {
        hasher.update(wait.to_bits().to_le_bytes());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn canonical_json<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::SimulationConfig;

    #[test]
    fn test_config_hash_deterministic() {
        let hash1 = compute_config_hash(&SimulationConfig::default()).unwrap();
        let hash2 = compute_config_hash(&SimulationConfig::default()).unwrap();
        assert_eq!(hash1, hash2, "Same config should produce same hash");
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_config_hash_changes_with_seed() {
        let hash1 = compute_config_hash(&SimulationConfig::default()).unwrap();
        let hash2 = compute_config_hash(&SimulationConfig::default().with_seed(124)).unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_fingerprint_sensitive_to_sample_bits() {
        let config = SimulationConfig::default();
        let a = WaitingTimes::from(vec![0.0, 1.5]);
        // -0.0 == 0.0 numerically but has a different bit pattern.
        let b = WaitingTimes::from(vec![-0.0, 1.5]);
        assert_ne!(
            compute_run_fingerprint(&config, &a).unwrap(),
            compute_run_fingerprint(&config, &b).unwrap()
        );
    }
}
