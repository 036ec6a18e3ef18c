use burn::tensor::backend::Backend;
use log::{info, warn};
use sc_core::error::{Error, Result};
use sc_core::plan::TargetPlan;
use sc_core::stepper::Stepper;
use sc_model::{Field, ForecastModel};

/// What the run produced for one requested lead time
#[derive(Clone, Debug, PartialEq)]
pub struct TargetOutput {
    pub lead_time: u32,
    /// Lead time the decomposition actually reached
    pub reached: u32,
    pub mean: f32,
}

impl TargetOutput {
    pub fn residual(&self) -> u32 {
        self.lead_time - self.reached
    }
}

/// Checks every planned increment against the model before anything runs.
pub fn check_increments<B: Backend, M: ForecastModel<B>>(model: &M, targets: &[TargetPlan]) -> Result<()> {
    for target in targets {
        if let Some(step) = target.increments().find(|s| !model.increments().contains(*s)) {
            return Err(Error::ModelStep(format!(
                "Model '{}' has no {}h step needed for +{}h",
                model.name(),
                step,
                target.lead_time
            )));
        }
    }
    Ok(())
}

/// Drive `model` from `analysis` to every planned lead time.
///
/// Each target restarts from the analysis. `report` gets a global index
/// across all targets and the lead time just reached.
pub fn run<B, M, S>(model: &M, analysis: &Field<B>, stepper: &mut S) -> Result<Vec<TargetOutput>>
where
    B: Backend,
    M: ForecastModel<B>,
    S: Stepper,
{
    let targets = stepper.plan().targets().to_vec();
    check_increments::<B, M>(model, &targets)?;

    let mut outputs = Vec::with_capacity(targets.len());
    let mut scope = stepper.start();
    let mut i = 0;

    for target in &targets {
        let mut field = analysis.clone();

        for step in target.increments() {
            field = model.advance(field, step)?;
            scope.report(i, field.lead_time);
            i += 1;
        }

        if !target.is_exact() {
            warn!(
                "+{}h is not reachable with {:?}, stopped at +{}h",
                target.lead_time,
                model.increments().as_slice(),
                field.lead_time
            );
        }

        let output = TargetOutput {
            lead_time: target.lead_time,
            reached: field.lead_time,
            mean: field.mean(),
        };
        info!("Output for +{}h: mean {:.3}", output.lead_time, output.mean);
        outputs.push(output);
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use sc_core::clock::ManualClock;
    use sc_core::increments::IncrementSet;
    use sc_core::multi::MultiStepper;
    use sc_core::progress::RecordingSink;
    use sc_core::single::SingleStepper;
    use sc_model::{Grid, RelaxationModel};

    type TestBackend = NdArray;

    const GRID: Grid = Grid { rows: 4, cols: 4 };

    fn model(steps: Vec<u32>) -> RelaxationModel<TestBackend> {
        let device = Default::default();
        RelaxationModel::new(IncrementSet::new(steps).unwrap(), GRID, 280.0, 72.0, &device).unwrap()
    }

    fn analysis() -> Field<TestBackend> {
        let device = Default::default();
        Field::synthetic(GRID, 290.0, &device)
    }

    #[test]
    fn test_run_multi() {
        let model = model(vec![6, 24]);
        let mut stepper =
            MultiStepper::with_parts(&[6, 24], &[30, 0, 33], ManualClock::new(), RecordingSink::new()).unwrap();

        let outputs = run(&model, &analysis(), &mut stepper).unwrap();

        let reached: Vec<_> = outputs.iter().map(|o| (o.lead_time, o.reached)).collect();
        assert_eq!(reached, vec![(30, 30), (0, 0), (33, 30)]);
        assert_eq!(outputs[2].residual(), 3);
        assert_eq!(outputs[0].mean, outputs[2].mean);

        let sink = stepper.sink();
        assert_eq!(sink.reports().map(|r| r.step).collect::<Vec<_>>(), vec![24, 30, 24, 30]);
        assert_eq!(sink.reports().last().map(|r| r.done), Some(4));
        assert_eq!(sink.summaries().count(), 1);
    }

    #[test]
    fn test_run_single() {
        let model = model(vec![6, 24]);
        let mut stepper = SingleStepper::with_parts(6, 54, ManualClock::new(), RecordingSink::new()).unwrap();

        let outputs = run(&model, &analysis(), &mut stepper).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].reached, 54);
        assert_eq!(stepper.sink().reports().map(|r| r.step).collect::<Vec<_>>(), vec![24, 48, 54]);
    }

    #[test]
    fn test_missing_increment_fails_before_start() {
        let model = model(vec![6]);
        let mut stepper =
            MultiStepper::with_parts(&[6, 24], &[30], ManualClock::new(), RecordingSink::new()).unwrap();

        let result = run(&model, &analysis(), &mut stepper);

        assert!(matches!(result, Err(Error::ModelStep(_))));
        assert_eq!(stepper.sink().summaries().count(), 0);
    }

    #[test]
    fn test_model_failure_still_summarises() {
        let model = model(vec![6, 24]);
        let wrong_grid = Field::<TestBackend>::synthetic(Grid { rows: 2, cols: 2 }, 290.0, &Default::default());
        let mut stepper =
            MultiStepper::with_parts(&[6, 24], &[30], ManualClock::new(), RecordingSink::new()).unwrap();

        let result = run(&model, &wrong_grid, &mut stepper);

        assert!(result.is_err());
        assert_eq!(stepper.sink().reports().count(), 0);
        assert_eq!(stepper.sink().summaries().count(), 1);
    }
}
