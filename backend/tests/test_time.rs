//! Tests for SimClock
//!
//! The clock is continuous and only ever jumps forward.

use queue_simulator_core_rs::{SchedulerError, SimClock};

#[test]
fn test_clock_new() {
    let clock = SimClock::new();
    assert_eq!(clock.now(), 0.0);
    assert_eq!(clock.advances(), 0);
}

#[test]
fn test_clock_jumps_to_event_time() {
    let mut clock = SimClock::new();

    clock.advance_to(3.25).unwrap();
    assert_eq!(clock.now(), 3.25);

    // No fixed tick: the next jump can be any distance.
    clock.advance_to(100.0).unwrap();
    assert_eq!(clock.now(), 100.0);
    assert_eq!(clock.advances(), 2);
}

#[test]
fn test_clock_refuses_to_go_backwards() {
    let mut clock = SimClock::new();
    clock.advance_to(10.0).unwrap();

    let err = clock.advance_to(9.999).unwrap_err();
    assert_eq!(
        err,
        SchedulerError::ScheduledInPast {
            requested: 9.999,
            now: 10.0
        }
    );
    assert_eq!(clock.now(), 10.0, "failed advance must not move the clock");
}

#[test]
fn test_clock_rejects_infinity() {
    let mut clock = SimClock::new();
    assert!(matches!(
        clock.advance_to(f64::INFINITY),
        Err(SchedulerError::NonFiniteTime(_))
    ));
}
