use std::path::Path;

use sc_core::config::StepperConfig;
use sc_core::error::{Error, Result};
use sc_core::increments::IncrementSet;
use serde::{Deserialize, Serialize};

/// Increments the single-target stepper advances by
const DAY_AND_SIX: [u32; 2] = [6, 24];

/// Everything a run needs, loadable from JSON
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub stepper: StepperConfig,
    /// ROWSxCOLS
    pub grid: String,
    /// Value the model relaxes towards
    pub climatology: f32,
    /// Mean of the synthetic analysis
    pub analysis: f32,
    pub tau_hours: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stepper: StepperConfig::default(),
            grid: "32x64".to_string(),
            climatology: 280.0,
            analysis: 290.0,
            tau_hours: 120.0,
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Increments the model has to support for this stepper.
    pub fn model_increments(&self) -> Result<IncrementSet> {
        match &self.stepper {
            StepperConfig::Multi { steps, .. } => Ok(steps.clone()),
            StepperConfig::Single { .. } => IncrementSet::new(DAY_AND_SIX.to_vec()),
        }
    }
}
