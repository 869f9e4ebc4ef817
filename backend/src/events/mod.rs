//! Event scheduling
//!
//! The scheduler owns the simulation clock and the set of pending
//! resumptions. It is the only component allowed to move time forward.
//!
//! - `types`: the pending-event record and its ordering, scheduler errors
//! - `scheduler`: the priority queue and clock advancement

pub mod scheduler;
pub mod types;

pub use scheduler::EventScheduler;
pub use types::{ScheduledEvent, SchedulerError};
