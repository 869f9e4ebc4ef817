//! Time-ordered event scheduler
//!
//! Keeps every pending resumption in a binary heap keyed by
//! `(time, sequence)` and advances the clock only when an event is
//! dispatched. Nothing here knows what a lifecycle does; it only decides
//! which one runs next and when.
//!
//! # Example
//!
//! ```
//! use queue_simulator_core_rs::events::EventScheduler;
//! use queue_simulator_core_rs::models::ProcessId;
//!
//! let mut scheduler = EventScheduler::new();
//! scheduler.suspend_for(ProcessId(1), 3.0).unwrap();
//! scheduler.suspend_for(ProcessId(2), 1.0).unwrap();
//!
//! let first = scheduler.pop_due(10.0).unwrap().unwrap();
//! assert_eq!(first.process, ProcessId(2));
//! assert_eq!(scheduler.now(), 1.0);
//! ```

use crate::core::time::{SimClock, SimTime};
use crate::events::types::{ScheduledEvent, SchedulerError};
use crate::models::process::ProcessId;
use std::collections::BinaryHeap;
use tracing::trace;

/// Pending-event set plus the clock it drives
#[derive(Debug, Default)]
pub struct EventScheduler {
    clock: SimClock,
    queue: BinaryHeap<ScheduledEvent>,
    next_seq: u64,
    dispatched: u64,
}

impl EventScheduler {
    /// Empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Number of events waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Timestamp of the earliest pending event, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.queue.peek().map(|event| event.time)
    }

    /// Schedule `process` to resume at absolute `time`.
    ///
    /// Returns the sequence number assigned to the event.
    pub fn schedule_at(&mut self, process: ProcessId, time: SimTime) -> Result<u64, SchedulerError> {
        if !time.is_finite() {
            return Err(SchedulerError::NonFiniteTime(time));
        }
        let now = self.clock.now();
        if time < now {
            return Err(SchedulerError::ScheduledInPast {
                requested: time,
                now,
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(ScheduledEvent { time, seq, process });
        trace!(%process, time, seq, "scheduled");
        Ok(seq)
    }

    /// Schedule `process` to resume `duration` after the current time.
    pub fn suspend_for(&mut self, process: ProcessId, duration: SimTime) -> Result<u64, SchedulerError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(SchedulerError::InvalidDuration(duration));
        }
        self.schedule_at(process, self.clock.now() + duration)
    }

    /// Pop the earliest event if it falls at or before `horizon`, moving the
    /// clock to its timestamp.
    ///
    /// Returns `Ok(None)` when nothing is pending or the next event lies past
    /// the horizon; that event stays queued and the clock stays put.
    pub fn pop_due(&mut self, horizon: SimTime) -> Result<Option<ScheduledEvent>, SchedulerError> {
        match self.queue.peek() {
            Some(next) if next.time <= horizon => {}
            _ => return Ok(None),
        }

        // Peeked above, so the pop cannot come back empty.
        let Some(event) = self.queue.pop() else {
            return Ok(None);
        };
        self.clock.advance_to(event.time)?;
        self.dispatched += 1;
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_respects_horizon() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_at(ProcessId(0), 5.0).unwrap();

        assert!(scheduler.pop_due(4.0).unwrap().is_none());
        assert_eq!(scheduler.now(), 0.0);
        assert_eq!(scheduler.pending(), 1);

        let event = scheduler.pop_due(5.0).unwrap().unwrap();
        assert_eq!(event.time, 5.0);
        assert_eq!(scheduler.now(), 5.0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_schedule_in_past_rejected() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_at(ProcessId(0), 2.0).unwrap();
        scheduler.pop_due(10.0).unwrap();

        let err = scheduler.schedule_at(ProcessId(1), 1.0).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::ScheduledInPast {
                requested: 1.0,
                now: 2.0
            }
        );
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut scheduler = EventScheduler::new();
        assert!(matches!(
            scheduler.suspend_for(ProcessId(0), -0.5),
            Err(SchedulerError::InvalidDuration(_))
        ));
        assert!(scheduler.is_empty());
    }
}
