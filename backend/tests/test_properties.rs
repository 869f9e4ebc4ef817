//! Property tests over random seeds, rates and horizons

use proptest::prelude::*;
use queue_simulator_core_rs::{run_simulation, Simulation, SimulationConfig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn waits_are_non_negative(
        seed in 1u64..1_000_000,
        arrival_rate in 0.05f64..2.0,
        service_rate in 0.05f64..2.0,
        horizon in 0.0f64..300.0,
    ) {
        let waits = run_simulation(seed, arrival_rate, service_rate, horizon).unwrap();
        for wait in waits.as_slice() {
            prop_assert!(*wait >= 0.0);
            prop_assert!(*wait <= horizon);
        }
    }

    #[test]
    fn served_count_non_decreasing_in_horizon(
        seed in 1u64..1_000_000,
        arrival_rate in 0.05f64..2.0,
        service_rate in 0.05f64..2.0,
        short in 0.0f64..200.0,
        extra in 0.0f64..200.0,
    ) {
        let a = run_simulation(seed, arrival_rate, service_rate, short).unwrap();
        let b = run_simulation(seed, arrival_rate, service_rate, short + extra).unwrap();

        prop_assert!(a.len() <= b.len());
        // The shorter run is a prefix of the longer one.
        prop_assert_eq!(a.as_slice(), &b.as_slice()[..a.len()]);
    }

    #[test]
    fn identical_inputs_identical_bits(
        seed in 1u64..1_000_000,
        arrival_rate in 0.05f64..2.0,
        service_rate in 0.05f64..2.0,
        horizon in 0.0f64..300.0,
    ) {
        let a = run_simulation(seed, arrival_rate, service_rate, horizon).unwrap();
        let b = run_simulation(seed, arrival_rate, service_rate, horizon).unwrap();

        let bits_a: Vec<u64> = a.as_slice().iter().map(|w| w.to_bits()).collect();
        let bits_b: Vec<u64> = b.as_slice().iter().map(|w| w.to_bits()).collect();
        prop_assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn grants_follow_arrival_order(
        seed in 1u64..1_000_000,
        arrival_rate in 0.05f64..2.0,
        service_rate in 0.05f64..2.0,
    ) {
        let config = SimulationConfig::new(seed, arrival_rate, service_rate, 200.0).with_events(true);
        let outcome = Simulation::start(config).unwrap().run().unwrap();

        let order = outcome.event_log.service_order();
        let expected: Vec<u64> = (1..=order.len() as u64).collect();
        prop_assert_eq!(order, expected);
    }
}
