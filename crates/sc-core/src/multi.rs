use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::increments::IncrementSet;
use crate::plan::Plan;
use crate::progress::{LogSink, ProgressSink, ProgressTracker, StepReport, StepSummary};
use crate::stepper::Stepper;

/// Stepper over several lead times sharing one set of increments.
///
/// Every lead time is decomposed largest increment first when the stepper
/// is built; the driving loop then walks `plan().schedule()` and reports
/// each checkpoint with its global index.
pub struct MultiStepper<C: Clock = SystemClock, S: ProgressSink = LogSink> {
    increments: IncrementSet,
    plan: Plan,
    tracker: ProgressTracker<C, S>,
}

impl MultiStepper {
    pub fn new(steps: &[u32], lead_times: &[u32]) -> Result<Self> {
        Self::with_parts(steps, lead_times, SystemClock::new(), LogSink)
    }
}

impl<C: Clock, S: ProgressSink> MultiStepper<C, S> {
    pub fn with_parts(steps: &[u32], lead_times: &[u32], clock: C, sink: S) -> Result<Self> {
        let increments = IncrementSet::new(steps.to_vec())?;
        Self::from_increments(increments, lead_times, clock, sink)
    }

    pub fn from_increments(
        increments: IncrementSet,
        lead_times: &[u32],
        clock: C,
        sink: S,
    ) -> Result<Self> {
        let plan = Plan::new(&increments, lead_times);

        if plan.total_steps() == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "Lead times {:?} give no steps with increments {:?}",
                lead_times,
                increments.as_slice()
            )));
        }

        let tracker = ProgressTracker::new(plan.total_steps(), "", clock, sink);

        Ok(Self { increments, plan, tracker })
    }

    pub fn increments(&self) -> &IncrementSet {
        &self.increments
    }

    pub fn tracker(&self) -> &ProgressTracker<C, S> {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        self.tracker.sink()
    }
}

impl<C: Clock, S: ProgressSink> Stepper for MultiStepper<C, S> {
    fn num_steps(&self) -> usize {
        self.plan.total_steps()
    }

    fn plan(&self) -> &Plan {
        &self.plan
    }

    fn report(&mut self, i: usize, step: u32) -> StepReport {
        self.tracker.report(i, step)
    }

    fn finish(&mut self) -> StepSummary {
        self.tracker.finish()
    }
}
