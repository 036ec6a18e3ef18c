#[cfg(test)]
mod tests {
    use burn_ndarray::NdArray;
    use sc_core::error::Error;
    use sc_core::increments::IncrementSet;
    use sc_core::plan::Plan;

    use crate::field::{Field, Grid};
    use crate::model::{ForecastModel, RelaxationModel};

    type TestBackend = NdArray;

    const GRID: Grid = Grid { rows: 4, cols: 8 };

    fn model(steps: Vec<u32>) -> RelaxationModel<TestBackend> {
        let device = Default::default();
        RelaxationModel::new(IncrementSet::new(steps).unwrap(), GRID, 280.0, 72.0, &device).unwrap()
    }

    fn analysis() -> Field<TestBackend> {
        let device = Default::default();
        Field::synthetic(GRID, 290.0, &device)
    }

    #[test]
    fn test_model_creation() {
        let model = model(vec![6, 24]);
        assert_eq!(model.name(), "relaxation");
        assert_eq!(model.increments().as_slice(), &[6, 24]);
    }

    #[test]
    fn test_advance_labels_lead_time() {
        let model = model(vec![6, 24]);
        let field = model.advance(analysis(), 24).unwrap();
        assert_eq!(field.lead_time, 24);
        assert_eq!(field.data.dims(), [4, 8]);

        let field = model.advance(field, 6).unwrap();
        assert_eq!(field.lead_time, 30);
    }

    #[test]
    fn test_unsupported_increment() {
        let model = model(vec![6, 24]);
        let result = model.advance(analysis(), 12);
        assert!(matches!(result, Err(Error::ModelStep(_))));
    }

    #[test]
    fn test_grid_mismatch() {
        let device = Default::default();
        let model = model(vec![6, 24]);
        let field = Field::<TestBackend>::synthetic(Grid { rows: 2, cols: 2 }, 290.0, &device);
        assert!(model.advance(field, 6).is_err());
    }

    #[test]
    fn test_rejects_bad_tau() {
        let device = Default::default();
        let result = RelaxationModel::<TestBackend>::new(IncrementSet::hourly(), GRID, 280.0, 0.0, &device);
        assert!(result.is_err());
    }

    #[test]
    fn test_relaxes_towards_climatology() {
        let model = model(vec![6, 24]);
        let start = analysis();
        let start_anomaly = start.mean() - 280.0;

        let field = model.advance(start, 24).unwrap();
        let anomaly = field.mean() - 280.0;

        assert!(anomaly.abs() < start_anomaly.abs());
        assert!((anomaly - start_anomaly * model.decay(24)).abs() < 1e-2);
    }

    #[test]
    fn test_steps_compose() {
        let model = model(vec![6, 24]);

        let mut by_six = analysis();
        for _ in 0..4 {
            by_six = model.advance(by_six, 6).unwrap();
        }
        let by_day = model.advance(analysis(), 24).unwrap();

        assert_eq!(by_six.lead_time, by_day.lead_time);
        assert!(by_six.max_abs_diff(&by_day) < 1e-3);
    }

    #[test]
    fn test_follow_plan_checkpoints() {
        let model = model(vec![1, 3, 6, 24]);
        let plan = Plan::new(model.increments(), &[31]);

        let mut field = analysis();
        let mut reached = Vec::new();
        for entry in plan.schedule() {
            field = model.advance(field, entry.increment()).unwrap();
            reached.push(field.lead_time);
        }

        assert_eq!(reached, vec![24, 30, 31]);
        assert_eq!(reached, plan.get(31).unwrap()[1..].to_vec());
    }
}
