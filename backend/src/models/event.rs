//! Lifecycle event log for auditing and replay checks.
//!
//! When a run is configured with `record_events`, every student lifecycle
//! leaves a trail of events:
//! - **Arrival**: the student joined the system and asked for the counter
//! - **ServiceStart**: the counter was granted; carries the waiting time
//! - **Departure**: service finished and the counter was released
//!
//! Students still queued or in service at the horizon simply have no later
//! events.
//!
//! # Example
//!
//! ```rust
//! use queue_simulator_core_rs::models::{Event, EventLog, ProcessId};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Arrival { time: 1.5, student: 1, process: ProcessId(1) });
//! log.log(Event::ServiceStart { time: 1.5, student: 1, process: ProcessId(1), wait: 0.0 });
//!
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.events_for_student(1).len(), 2);
//! ```

use crate::core::time::SimTime;
use crate::models::process::ProcessId;
use serde::{Deserialize, Serialize};

/// One step of a student lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Arrival {
        time: SimTime,
        student: u64,
        process: ProcessId,
    },

    ServiceStart {
        time: SimTime,
        student: u64,
        process: ProcessId,
        wait: SimTime,
    },

    Departure {
        time: SimTime,
        student: u64,
        process: ProcessId,
    },
}

impl Event {
    /// Simulated time the event happened at
    pub fn time(&self) -> SimTime {
        match self {
            Event::Arrival { time, .. } => *time,
            Event::ServiceStart { time, .. } => *time,
            Event::Departure { time, .. } => *time,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Arrival { .. } => "Arrival",
            Event::ServiceStart { .. } => "ServiceStart",
            Event::Departure { .. } => "Departure",
        }
    }

    pub fn student(&self) -> u64 {
        match self {
            Event::Arrival { student, .. } => *student,
            Event::ServiceStart { student, .. } => *student,
            Event::Departure { student, .. } => *student,
        }
    }
}

/// Ordered record of lifecycle events, in dispatch order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events of one kind, e.g. `"ServiceStart"`
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_student(&self, student: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.student() == student).collect()
    }

    /// Student ids in the order they were granted the counter.
    pub fn service_order(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::ServiceStart { student, .. } => Some(*student),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
