//! Domain models for the queue simulator

pub mod event;
pub mod observation;
pub mod process;
pub mod resource;

// Re-exports
pub use event::{Event, EventLog};
pub use observation::{WaitSummary, WaitingTimes};
pub use process::{ProcessId, ProcessState, ProcessTable};
pub use resource::{Grant, ResourceError, ResourceQueue};
