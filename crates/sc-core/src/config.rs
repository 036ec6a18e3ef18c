use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::increments::IncrementSet;
use crate::multi::MultiStepper;
use crate::plan::Plan;
use crate::progress::{ProgressSink, StepReport, StepSummary};
use crate::single::SingleStepper;
use crate::stepper::Stepper;

/// Stepper configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepperConfig {
    Single {
        step: u32,
        lead_time: u32,
    },
    Multi {
        steps: IncrementSet,
        lead_times: Vec<u32>,
    },
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self::Multi {
            steps: IncrementSet::hourly(),
            lead_times: vec![240],
        }
    }
}

impl StepperConfig {
    pub fn single_default() -> Self {
        Self::Single {
            step: 6,
            lead_time: 240,
        }
    }

    pub fn build<C: Clock, S: ProgressSink>(&self, clock: C, sink: S) -> Result<AnyStepper<C, S>> {
        match self {
            Self::Single { step, lead_time } => {
                SingleStepper::with_parts(*step, *lead_time, clock, sink).map(AnyStepper::Single)
            }
            Self::Multi { steps, lead_times } => {
                MultiStepper::from_increments(steps.clone(), lead_times, clock, sink)
                    .map(AnyStepper::Multi)
            }
        }
    }
}

/// Either stepper, picked from a `StepperConfig`
pub enum AnyStepper<C: Clock, S: ProgressSink> {
    Single(SingleStepper<C, S>),
    Multi(MultiStepper<C, S>),
}

impl<C: Clock, S: ProgressSink> AnyStepper<C, S> {
    pub fn sink(&self) -> &S {
        match self {
            Self::Single(s) => s.sink(),
            Self::Multi(s) => s.sink(),
        }
    }
}

impl<C: Clock, S: ProgressSink> Stepper for AnyStepper<C, S> {
    fn num_steps(&self) -> usize {
        match self {
            Self::Single(s) => s.num_steps(),
            Self::Multi(s) => s.num_steps(),
        }
    }

    fn plan(&self) -> &Plan {
        match self {
            Self::Single(s) => s.plan(),
            Self::Multi(s) => s.plan(),
        }
    }

    fn report(&mut self, i: usize, step: u32) -> StepReport {
        match self {
            Self::Single(s) => s.report(i, step),
            Self::Multi(s) => s.report(i, step),
        }
    }

    fn finish(&mut self) -> StepSummary {
        match self {
            Self::Single(s) => s.finish(),
            Self::Multi(s) => s.finish(),
        }
    }
}
