//! Process arena
//!
//! Every lifecycle spawned during a run gets a slot in a growable arena,
//! indexed by a monotonically increasing `ProcessId`. Slots are never reused:
//! a terminated lifecycle drops its body but keeps its slot, so ids stay
//! stable for the event log and for tests.

use crate::lifecycle::Lifecycle;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a lifecycle within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessId(pub u64);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Execution position of a lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Currently being driven by the dispatcher
    Running,
    /// Suspended until a scheduled event resumes it
    Scheduled,
    /// Suspended in the resource's waiting list
    AwaitingGrant,
    /// Finished; body dropped
    Terminated,
}

struct ProcessSlot {
    label: &'static str,
    state: ProcessState,
    body: Option<Box<dyn Lifecycle>>,
}

/// Arena of lifecycles for one run
#[derive(Default)]
pub struct ProcessTable {
    slots: Vec<ProcessSlot>,
}

impl fmt::Debug for ProcessTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessTable")
            .field("len", &self.slots.len())
            .field("live", &self.live())
            .finish()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lifecycle and hand out its id. New lifecycles start `Running`.
    pub fn insert(&mut self, body: Box<dyn Lifecycle>) -> ProcessId {
        let pid = ProcessId(self.slots.len() as u64);
        self.slots.push(ProcessSlot {
            label: body.label(),
            state: ProcessState::Running,
            body: Some(body),
        });
        pid
    }

    /// Take the body out so it can be resumed while the rest of the run is
    /// borrowed mutably. Must be followed by `put_back` or `terminate`.
    pub fn take(&mut self, pid: ProcessId) -> Result<Box<dyn Lifecycle>, SimulationError> {
        let slot = self
            .slots
            .get_mut(pid.0 as usize)
            .ok_or(SimulationError::UnknownProcess(pid))?;
        let body = slot.body.take().ok_or(SimulationError::UnknownProcess(pid))?;
        slot.state = ProcessState::Running;
        Ok(body)
    }

    /// Return a body taken with `take`, recording where it is suspended.
    pub fn put_back(
        &mut self,
        pid: ProcessId,
        body: Box<dyn Lifecycle>,
        state: ProcessState,
    ) -> Result<(), SimulationError> {
        let slot = self
            .slots
            .get_mut(pid.0 as usize)
            .ok_or(SimulationError::UnknownProcess(pid))?;
        slot.body = Some(body);
        slot.state = state;
        Ok(())
    }

    /// Mark a lifecycle finished.
    pub fn terminate(&mut self, pid: ProcessId) -> Result<(), SimulationError> {
        let slot = self
            .slots
            .get_mut(pid.0 as usize)
            .ok_or(SimulationError::UnknownProcess(pid))?;
        slot.body = None;
        slot.state = ProcessState::Terminated;
        Ok(())
    }

    /// Update the recorded position of a suspended lifecycle.
    pub fn set_state(&mut self, pid: ProcessId, state: ProcessState) -> Result<(), SimulationError> {
        let slot = self
            .slots
            .get_mut(pid.0 as usize)
            .ok_or(SimulationError::UnknownProcess(pid))?;
        slot.state = state;
        Ok(())
    }

    pub fn state(&self, pid: ProcessId) -> Option<ProcessState> {
        self.slots.get(pid.0 as usize).map(|slot| slot.state)
    }

    pub fn label(&self, pid: ProcessId) -> Option<&'static str> {
        self.slots.get(pid.0 as usize).map(|slot| slot.label)
    }

    /// Total lifecycles ever spawned.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lifecycles not yet terminated.
    pub fn live(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state != ProcessState::Terminated)
            .count()
    }

    /// Lifecycles with the given label ever spawned.
    pub fn spawned(&self, label: &str) -> usize {
        self.slots.iter().filter(|slot| slot.label == label).count()
    }

    /// Lifecycles with the given label currently in `state`.
    pub fn count(&self, label: &str, state: ProcessState) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.label == label && slot.state == state)
            .count()
    }
}
