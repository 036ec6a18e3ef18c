use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::plan::{Plan, TargetPlan};
use crate::progress::{LogSink, ProgressSink, ProgressTracker, StepReport, StepSummary};
use crate::stepper::Stepper;

const DAY: u32 = 24;
const QUARTER_DAY: u32 = 6;

/// Stepper for one lead time, advancing in whole days then six-hour chunks.
pub struct SingleStepper<C: Clock = SystemClock, S: ProgressSink = LogSink> {
    /// Nominal per-call increment, kept for display only.
    pub step: u32,
    pub lead_time: u32,
    plan: Plan,
    tracker: ProgressTracker<C, S>,
}

/// Number of day and six-hour advances needed for `lead_time`.
/// Anything under six hours left after that is dropped.
pub fn day_then_six(lead_time: u32) -> (u32, u32) {
    let days = lead_time / DAY;
    let quarters = (lead_time - DAY * days) / QUARTER_DAY;
    (days, quarters)
}

impl SingleStepper {
    pub fn new(step: u32, lead_time: u32) -> Result<Self> {
        Self::with_parts(step, lead_time, SystemClock::new(), LogSink)
    }
}

impl<C: Clock, S: ProgressSink> SingleStepper<C, S> {
    pub fn with_parts(step: u32, lead_time: u32, clock: C, sink: S) -> Result<Self> {
        let (days, quarters) = day_then_six(lead_time);

        let mut checkpoints = vec![0];
        checkpoints.extend((1..=days).map(|d| d * DAY));
        checkpoints.extend((1..=quarters).map(|q| days * DAY + q * QUARTER_DAY));

        let plan = Plan::from_targets(vec![TargetPlan { lead_time, checkpoints }]);

        if plan.total_steps() == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "Lead time {}h is shorter than one {}h step",
                lead_time, QUARTER_DAY
            )));
        }

        let description = format!("{}h", lead_time);
        let tracker = ProgressTracker::new(plan.total_steps(), &description, clock, sink);

        Ok(Self { step, lead_time, plan, tracker })
    }

    pub fn tracker(&self) -> &ProgressTracker<C, S> {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        self.tracker.sink()
    }
}

impl<C: Clock, S: ProgressSink> Stepper for SingleStepper<C, S> {
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
