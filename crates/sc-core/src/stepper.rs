use std::ops::Deref;

use crate::plan::Plan;
use crate::progress::{StepReport, StepSummary};

/// Contract shared by the single- and multi-target steppers
pub trait Stepper {
    /// Checkpoints planned across all targets
    fn num_steps(&self) -> usize;

    /// Planned checkpoints, read-only after construction
    fn plan(&self) -> &Plan;

    /// Record that global checkpoint `i` was reached at absolute `step`.
    ///
    /// `i` is not checked against `num_steps`; reporting past the plan
    /// yields a negative ETA.
    fn report(&mut self, i: usize, step: u32) -> StepReport;

    /// Emit the elapsed time and per-step average.
    fn finish(&mut self) -> StepSummary;

    /// Open a scope whose exit always calls `finish`.
    fn start(&mut self) -> StepperScope<'_, Self>
    where
        Self: Sized,
    {
        StepperScope::new(self)
    }
}

/// Guard that runs `finish` exactly once when dropped.
///
/// Dropping happens on normal exit, on `?` returns and while unwinding
/// from a panic in the driving loop.
pub struct StepperScope<'a, T: Stepper> {
    stepper: &'a mut T,
    summary: Option<StepSummary>,
}

impl<'a, T: Stepper> StepperScope<'a, T> {
    fn new(stepper: &'a mut T) -> Self {
        Self { stepper, summary: None }
    }

    pub fn report(&mut self, i: usize, step: u32) -> StepReport {
        self.stepper.report(i, step)
    }

    /// Close the scope now and return the summary.
    pub fn finish(mut self) -> StepSummary {
        self.close()
    }

    fn close(&mut self) -> StepSummary {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }
        let summary = self.stepper.finish();
        self.summary = Some(summary.clone());
        summary
    }
}

impl<T: Stepper> Deref for StepperScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.stepper
    }
}

impl<T: Stepper> Drop for StepperScope<'_, T> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Run `body` inside a stepper scope.
pub fn scoped<T, R, F>(stepper: &mut T, body: F) -> R
where
    T: Stepper,
    F: FnOnce(&mut StepperScope<'_, T>) -> R,
{
    let mut scope = stepper.start();
    body(&mut scope)
}
