//! Simulated time for the event-driven engine
//!
//! Time is continuous: the clock jumps straight to the timestamp of the next
//! dispatched event instead of stepping through fixed ticks. The unit is
//! whatever the caller quotes its rates and horizon in (the cafeteria defaults
//! use minutes).

use crate::events::SchedulerError;
use serde::{Deserialize, Serialize};

/// Simulated time value.
pub type SimTime = f64;

/// Monotonic simulation clock owned by the event scheduler
///
/// # Example
/// ```
/// use queue_simulator_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance_to(4.5).unwrap();
/// assert_eq!(clock.now(), 4.5);
///
/// // Moving backwards is refused.
/// assert!(clock.advance_to(1.0).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    now: SimTime,
    advances: u64,
}

impl SimClock {
    /// Clock positioned at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of successful `advance_to` calls, including zero-length jumps.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Jump the clock to `time`.
    ///
    /// Equal timestamps are allowed (simultaneous events); earlier or
    /// non-finite ones are an internal-consistency fault.
    pub fn advance_to(&mut self, time: SimTime) -> Result<(), SchedulerError> {
        if !time.is_finite() {
            return Err(SchedulerError::NonFiniteTime(time));
        }
        if time < self.now {
            return Err(SchedulerError::ScheduledInPast {
                requested: time,
                now: self.now,
            });
        }
        self.now = time;
        self.advances += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_instant_is_allowed() {
        let mut clock = SimClock::new();
        clock.advance_to(2.0).unwrap();
        clock.advance_to(2.0).unwrap();
        assert_eq!(clock.now(), 2.0);
        assert_eq!(clock.advances(), 2);
    }

    #[test]
    fn test_nan_rejected_without_moving() {
        let mut clock = SimClock::new();
        clock.advance_to(1.0).unwrap();
        assert!(matches!(
            clock.advance_to(f64::NAN),
            Err(SchedulerError::NonFiniteTime(_))
        ));
        assert_eq!(clock.now(), 1.0);
    }
}
