//! Pending-event record and scheduler errors

use crate::core::time::SimTime;
use crate::models::process::ProcessId;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised when a lifecycle is scheduled inconsistently
///
/// Every variant indicates a defect in lifecycle composition rather than a
/// runtime condition, so the engine aborts the run on the first one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Cannot schedule at {requested} before current time {now}")]
    ScheduledInPast { requested: SimTime, now: SimTime },

    #[error("Non-finite simulation time: {0}")]
    NonFiniteTime(SimTime),

    #[error("Invalid suspension duration: {0}")]
    InvalidDuration(SimTime),
}

/// "Resume `process` at `time`."
///
/// Ordered by time, then by the sequence number handed out at scheduling, so
/// simultaneous events run in the order they were scheduled.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub time: SimTime,
    pub seq: u64,
    pub process: ProcessId,
}

impl ScheduledEvent {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

// BinaryHeap is a max-heap, so the comparison is reversed to pop the
// earliest (time, seq) first.
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other).reverse()
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}
