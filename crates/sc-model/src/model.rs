use burn::tensor::{backend::Backend, Device, Tensor};
use log::debug;
use sc_core::error::{Error, Result};
use sc_core::increments::IncrementSet;

use crate::field::{Field, Grid};

/// A model that can only advance by a fixed set of increments
pub trait ForecastModel<B: Backend> {
    fn name(&self) -> &str;

    /// Increments, in hours, the model has a time step for
    fn increments(&self) -> &IncrementSet;

    /// Advance `field` by exactly `hours`
    fn advance(&self, field: Field<B>, hours: u32) -> Result<Field<B>>;
}

/// Relaxes the field towards a fixed climatology.
///
/// One step of `h` hours multiplies the anomaly by `exp(-h / tau)`, so
/// chaining steps composes exactly, whatever increments are used.
pub struct RelaxationModel<B: Backend> {
    increments: IncrementSet,
    climatology: Tensor<B, 2>,
    tau_hours: f32,
}

impl<B: Backend> RelaxationModel<B> {
    pub fn new(increments: IncrementSet, grid: Grid, climatology: f32, tau_hours: f32, device: &Device<B>) -> Result<Self> {
        if !(tau_hours > 0.0) {
            return Err(Error::InvalidConfiguration(
                format!("Relaxation time must be positive, got {}", tau_hours)
            ));
        }

        Ok(Self {
            increments,
            climatology: Tensor::full([grid.rows, grid.cols], climatology, device),
            tau_hours,
        })
    }

    pub(crate) fn decay(&self, hours: u32) -> f32 {
        (-(hours as f32) / self.tau_hours).exp()
    }
}

impl<B: Backend> ForecastModel<B> for RelaxationModel<B> {
    fn name(&self) -> &str {
        "relaxation"
    }

    fn increments(&self) -> &IncrementSet {
        &self.increments
    }

    fn advance(&self, field: Field<B>, hours: u32) -> Result<Field<B>> {
        if !self.increments.contains(hours) {
            return Err(Error::ModelStep(format!(
                "No {}h time step, supported: {:?}",
                hours,
                self.increments.as_slice()
            )));
        }

        if field.data.dims() != self.climatology.dims() {
            return Err(Error::ModelStep(format!(
                "Field shape {:?} does not match model grid {:?}",
                field.data.dims(),
                self.climatology.dims()
            )));
        }

        let decay = self.decay(hours);
        debug!("Advancing {}h from +{}h (decay {:.4})", hours, field.lead_time, decay);

        // c + (x - c) * decay
        let data = field.data.mul_scalar(decay) + self.climatology.clone().mul_scalar(1.0 - decay);

        Ok(Field::new(field.lead_time + hours, data))
    }
}
