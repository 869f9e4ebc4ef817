//! Student lifecycle: arrive, queue, get served, leave.

use crate::core::time::SimTime;
use crate::lifecycle::{Lifecycle, ProcessContext, Yield};
use crate::models::Event;
use crate::orchestrator::SimulationError;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Arriving,
    AwaitingGrant,
    InService,
    Done,
}

/// One student at the counter
///
/// The wait is measured from arrival to grant and recorded at the grant,
/// before the service time is drawn. Release of the counter happens on exit,
/// so a student can never leave while still holding it.
#[derive(Debug, Clone)]
pub struct Student {
    id: u64,
    mean_service: SimTime,
    arrival: SimTime,
    stage: Stage,
}

impl Student {
    pub fn new(id: u64, mean_service: SimTime) -> Self {
        Self {
            id,
            mean_service,
            arrival: 0.0,
            stage: Stage::Arriving,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }
}

impl Lifecycle for Student {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Result<Yield, SimulationError> {
        match self.stage {
            Stage::Arriving => {
                self.arrival = ctx.now();
                ctx.log_event(Event::Arrival {
                    time: self.arrival,
                    student: self.id,
                    process: ctx.pid(),
                });
                self.stage = Stage::AwaitingGrant;
                Ok(Yield::Request)
            }
            Stage::AwaitingGrant => {
                let now = ctx.now();
                let wait = now - self.arrival;
                ctx.record_wait(wait);
                ctx.log_event(Event::ServiceStart {
                    time: now,
                    student: self.id,
                    process: ctx.pid(),
                    wait,
                });

                let service = ctx.rng().exponential(self.mean_service);
                trace!(student = self.id, wait, service, "service started");
                self.stage = Stage::InService;
                Ok(Yield::Timeout(service))
            }
            Stage::InService => {
                ctx.log_event(Event::Departure {
                    time: ctx.now(),
                    student: self.id,
                    process: ctx.pid(),
                });
                self.stage = Stage::Done;
                Ok(Yield::Exit)
            }
            Stage::Done => Ok(Yield::Exit),
        }
    }

    fn label(&self) -> &'static str {
        "student"
    }
}
