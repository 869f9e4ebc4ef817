//! Single-server resource with a FIFO waiting line
//!
//! Models the service counter: capacity one, unbounded line, strict
//! first-come-first-served. This is the only point of mutual exclusion in a
//! run; the engine routes every request and release through it.
//!
//! # Critical Invariants
//!
//! - At most one holder at any instant
//! - Grant order equals request order (no priority, no preemption)
//! - A waiter leaves the line exactly when it becomes the holder
//! - Only the holder may release
//!
//! The queue also integrates line length and busy time over simulated time so
//! a run can report the time-average queue length and utilisation.

use crate::core::time::SimTime;
use crate::models::process::ProcessId;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::debug;

/// Errors from misuse of the resource protocol
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResourceError {
    #[error("{process} released the counter without holding it (holder: {holder:?})")]
    NotHolder {
        process: ProcessId,
        holder: Option<ProcessId>,
    },

    #[error("{0} requested the counter while already holding it")]
    AlreadyHolding(ProcessId),
}

/// Outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Counter was idle; the caller holds it now and continues without suspending
    Granted,
    /// Caller joined the line at `position` (0 = next to be served)
    Queued { position: usize },
}

#[derive(Debug, Clone, Copy)]
struct Waiter {
    process: ProcessId,
    since: SimTime,
}

/// Capacity-one resource with FIFO waiting list
///
/// # Example
/// ```
/// use queue_simulator_core_rs::models::{Grant, ProcessId, ResourceQueue};
///
/// let mut counter = ResourceQueue::new();
/// assert_eq!(counter.request(ProcessId(1), 0.0).unwrap(), Grant::Granted);
/// assert_eq!(counter.request(ProcessId(2), 1.0).unwrap(), Grant::Queued { position: 0 });
///
/// // Releasing hands the counter straight to the first waiter.
/// assert_eq!(counter.release(ProcessId(1), 3.0).unwrap(), Some(ProcessId(2)));
/// assert_eq!(counter.holder(), Some(ProcessId(2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceQueue {
    holder: Option<ProcessId>,
    waiting: VecDeque<Waiter>,
    grants: u64,
    last_change: SimTime,
    queue_area: f64,
    busy_time: f64,
}

impl ResourceQueue {
    /// Number of simultaneous holders allowed.
    pub const CAPACITY: usize = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    pub fn holder(&self) -> Option<ProcessId> {
        self.holder
    }

    pub fn is_busy(&self) -> bool {
        self.holder.is_some()
    }

    /// Current length of the waiting line (holder excluded).
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Waiting processes, front of the line first.
    pub fn waiting(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.waiting.iter().map(|w| w.process)
    }

    /// Total grants handed out so far.
    pub fn grants(&self) -> u64 {
        self.grants
    }

    /// Ask for the counter at time `now`.
    pub fn request(&mut self, process: ProcessId, now: SimTime) -> Result<Grant, ResourceError> {
        if self.holder == Some(process) {
            return Err(ResourceError::AlreadyHolding(process));
        }
        self.accumulate(now);

        if self.holder.is_none() {
            self.holder = Some(process);
            self.grants += 1;
            debug!(%process, now, "counter granted immediately");
            return Ok(Grant::Granted);
        }

        let position = self.waiting.len();
        self.waiting.push_back(Waiter {
            process,
            since: now,
        });
        debug!(%process, now, position, "joined the line");
        Ok(Grant::Queued { position })
    }

    /// Give the counter back at time `now`.
    ///
    /// Returns the waiter that now holds the counter, if any; the caller is
    /// responsible for resuming it.
    pub fn release(
        &mut self,
        process: ProcessId,
        now: SimTime,
    ) -> Result<Option<ProcessId>, ResourceError> {
        if self.holder != Some(process) {
            return Err(ResourceError::NotHolder {
                process,
                holder: self.holder,
            });
        }
        self.accumulate(now);

        match self.waiting.pop_front() {
            Some(next) => {
                self.holder = Some(next.process);
                self.grants += 1;
                debug!(
                    from = %process,
                    to = %next.process,
                    now,
                    waited = now - next.since,
                    "counter handed over"
                );
                Ok(Some(next.process))
            }
            None => {
                self.holder = None;
                debug!(%process, now, "counter idle");
                Ok(None)
            }
        }
    }

    /// Time-average length of the waiting line over `[0, until]`.
    pub fn mean_queue_length(&self, until: SimTime) -> f64 {
        if until <= 0.0 {
            return 0.0;
        }
        let tail = (until - self.last_change).max(0.0);
        (self.queue_area + self.waiting.len() as f64 * tail) / until
    }

    /// Fraction of `[0, until]` the counter was held.
    pub fn utilisation(&self, until: SimTime) -> f64 {
        if until <= 0.0 {
            return 0.0;
        }
        let tail = (until - self.last_change).max(0.0);
        let busy = if self.holder.is_some() { tail } else { 0.0 };
        (self.busy_time + busy) / until
    }

    fn accumulate(&mut self, now: SimTime) {
        let elapsed = (now - self.last_change).max(0.0);
        self.queue_area += self.waiting.len() as f64 * elapsed;
        if self.holder.is_some() {
            self.busy_time += elapsed;
        }
        self.last_change = self.last_change.max(now);
    }
}
