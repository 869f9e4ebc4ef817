//! Dispatch-order tests using scripted lifecycles
//!
//! Scripts record `(name, time)` every time they are resumed, which makes
//! interleaving visible without going through the random stream.

use crate::lifecycle::{Lifecycle, ProcessContext, Yield};
use crate::models::ProcessState;
use crate::orchestrator::{Simulation, SimulationConfig, SimulationError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Trace = Rc<RefCell<Vec<(&'static str, f64)>>>;

#[derive(Debug)]
enum Step {
    Hold(f64),
    Acquire,
    Spawn(Script),
    Exit,
}

#[derive(Debug)]
struct Script {
    name: &'static str,
    steps: VecDeque<Step>,
    trace: Trace,
}

impl Script {
    fn new(name: &'static str, trace: &Trace, steps: Vec<Step>) -> Self {
        Self {
            name,
            steps: steps.into(),
            trace: Rc::clone(trace),
        }
    }
}

impl Lifecycle for Script {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Result<Yield, SimulationError> {
        self.trace.borrow_mut().push((self.name, ctx.now()));
        Ok(match self.steps.pop_front().unwrap_or(Step::Exit) {
            Step::Hold(d) => Yield::Timeout(d),
            Step::Acquire => Yield::Request,
            Step::Spawn(child) => Yield::Spawn(Box::new(child)),
            Step::Exit => Yield::Exit,
        })
    }

    fn label(&self) -> &'static str {
        "script"
    }
}

fn empty_run() -> Simulation {
    Simulation::new(SimulationConfig::default()).unwrap()
}

#[test]
fn test_simultaneous_events_run_in_scheduling_order() {
    let trace: Trace = Rc::default();
    let mut sim = empty_run();

    for name in ["a", "b", "c"] {
        sim.spawn(Box::new(Script::new(name, &trace, vec![Step::Hold(5.0)])))
            .unwrap();
    }
    trace.borrow_mut().clear();

    sim.run_until(10.0).unwrap();
    assert_eq!(*trace.borrow(), vec![("a", 5.0), ("b", 5.0), ("c", 5.0)]);
}

#[test]
fn test_spawned_child_runs_before_parent_continues() {
    let trace: Trace = Rc::default();
    let mut sim = empty_run();

    let child = Script::new("child", &trace, vec![Step::Hold(1.0)]);
    let parent = Script::new(
        "parent",
        &trace,
        vec![Step::Hold(2.0), Step::Spawn(child), Step::Hold(1.0)],
    );
    sim.spawn(Box::new(parent)).unwrap();
    sim.run_until(2.0).unwrap();

    // Parent wakes at 2, spawns; child runs at 2 before the parent resumes at 2.
    assert_eq!(
        *trace.borrow(),
        vec![
            ("parent", 0.0),
            ("parent", 2.0),
            ("child", 2.0),
            ("parent", 2.0)
        ]
    );
}

#[test]
fn test_exit_releases_counter_to_next_waiter() {
    let trace: Trace = Rc::default();
    let mut sim = empty_run();

    let first = sim
        .spawn(Box::new(Script::new(
            "first",
            &trace,
            vec![Step::Acquire, Step::Hold(3.0)],
        )))
        .unwrap();
    let second = sim
        .spawn(Box::new(Script::new(
            "second",
            &trace,
            vec![Step::Acquire, Step::Hold(1.0)],
        )))
        .unwrap();

    assert_eq!(sim.counter().holder(), Some(first));
    assert_eq!(sim.process_state(second), Some(ProcessState::AwaitingGrant));

    sim.run_until(3.0).unwrap();
    assert_eq!(sim.process_state(first), Some(ProcessState::Terminated));
    assert_eq!(sim.counter().holder(), Some(second));
    assert_eq!(sim.process_state(second), Some(ProcessState::Scheduled));

    sim.run_until(10.0).unwrap();
    assert_eq!(sim.counter().holder(), None);
    assert_eq!(sim.processes().live(), 0);
}

#[test]
fn test_horizon_leaves_later_events_pending() {
    let trace: Trace = Rc::default();
    let mut sim = empty_run();
    sim.spawn(Box::new(Script::new(
        "sleeper",
        &trace,
        vec![Step::Hold(4.0), Step::Hold(4.0)],
    )))
    .unwrap();

    assert_eq!(sim.run_until(6.0).unwrap(), 1);
    assert_eq!(sim.now(), 4.0);
    assert_eq!(sim.scheduler().pending(), 1);
    assert_eq!(sim.scheduler().peek_time(), Some(8.0));
}

#[test]
fn test_negative_hold_aborts_run() {
    let trace: Trace = Rc::default();
    let mut sim = empty_run();

    let err = sim
        .spawn(Box::new(Script::new("broken", &trace, vec![Step::Hold(-1.0)])))
        .unwrap_err();
    assert!(matches!(err, SimulationError::Scheduler(_)));
}
