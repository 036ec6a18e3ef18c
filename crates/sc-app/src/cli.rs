use std::path::PathBuf;

use clap::Parser;
use sc_core::config::StepperConfig;
use sc_core::error::Result;
use sc_core::increments::IncrementSet;
use sc_model::Grid;

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "stepcast", version, about = "Plan and run a stepped forecast to a set of lead times")]
pub struct Cli {
    /// JSON run file; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increments the model supports, ascending (e.g. 6,24)
    #[arg(long, value_delimiter = ',')]
    pub steps: Option<Vec<u32>>,

    /// Lead times to produce output for
    #[arg(long = "lead-times", value_delimiter = ',')]
    pub lead_times: Option<Vec<u32>>,

    /// Use the single lead time stepper (days then six-hour steps)
    #[arg(long, conflicts_with_all = ["steps", "lead_times"])]
    pub single: bool,

    /// Nominal step shown by the single stepper
    #[arg(long, requires = "single")]
    pub step: Option<u32>,

    #[arg(long = "lead-time", requires = "single")]
    pub lead_time: Option<u32>,

    /// Grid as ROWSxCOLS
    #[arg(long)]
    pub grid: Option<Grid>,

    /// Model relaxation time in hours
    #[arg(long)]
    pub tau: Option<f32>,

    /// Print the plan as JSON and exit
    #[arg(long)]
    pub dump_plan: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut RunConfig) -> Result<()> {
        if self.single {
            let (step, lead_time) = match config.stepper {
                StepperConfig::Single { step, lead_time } => (step, lead_time),
                StepperConfig::Multi { .. } => (6, 240),
            };
            config.stepper = StepperConfig::Single {
                step: self.step.unwrap_or(step),
                lead_time: self.lead_time.unwrap_or(lead_time),
            };
        } else if self.steps.is_some() || self.lead_times.is_some() {
            let (steps, lead_times) = match &config.stepper {
                StepperConfig::Multi { steps, lead_times } => (steps.clone(), lead_times.clone()),
                StepperConfig::Single { lead_time, .. } => (IncrementSet::hourly(), vec![*lead_time]),
            };
            let steps = match &self.steps {
                Some(raw) => IncrementSet::new(raw.clone())?,
                None => steps,
            };
            config.stepper = StepperConfig::Multi {
                steps,
                lead_times: self.lead_times.clone().unwrap_or(lead_times),
            };
        }

        if let Some(grid) = self.grid {
            config.grid = grid.to_string();
        }
        if let Some(tau) = self.tau {
            config.tau_hours = tau;
        }
        Ok(())
    }
}
