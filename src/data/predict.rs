use super::model::Dataset;
use super::regression::{ModelInput, Regressor};
use crate::error::PredictionError;

// ---------------------------------------------------------------------------
// Batch overlay: the fitted regression line
// ---------------------------------------------------------------------------

/// Predict every visible record and return `[gdp_total, predicted]` pairs
/// ordered by GDP ascending, ready to be drawn as a line.
///
/// The first failing prediction aborts the whole overlay.
pub fn fit_line<R: Regressor + ?Sized>(
    model: &R,
    dataset: &Dataset,
    indices: &[usize],
) -> Result<Vec<[f64; 2]>, PredictionError> {
    let mut points = indices
        .iter()
        .filter_map(|&i| dataset.records.get(i))
        .map(|rec| {
            model
                .predict(ModelInput::new(rec.gdp_total, rec.population))
                .map(|predicted| [rec.gdp_total, predicted])
        })
        .collect::<Result<Vec<_>, _>>()?;

    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Ok(points)
}

// ---------------------------------------------------------------------------
// Single-point query: scenario simulation
// ---------------------------------------------------------------------------

pub const INVALID_INPUT_WARNING: &str = "Enter positive values for both GDP and population.";

/// What a press of the "Predict" button produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutcome {
    /// Inputs rejected before the model was called.
    Invalid(String),
    /// The raw model output and its integer business-count estimate.
    Estimate { estimate: i64, raw: f64 },
    /// The model call itself failed.
    Failed(String),
}

/// Validate a user-supplied GDP / population pair and predict from it.
///
/// Both values must be finite and strictly positive; otherwise the model is
/// never called.  The estimate is truncated toward zero.
pub fn simulate<R: Regressor + ?Sized>(model: &R, gdp_total: f64, population: f64) -> SimulationOutcome {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(gdp_total) || !valid(population) {
        return SimulationOutcome::Invalid(INVALID_INPUT_WARNING.to_string());
    }

    match model.predict(ModelInput::new(gdp_total, population)) {
        Ok(raw) => SimulationOutcome::Estimate {
            estimate: raw.trunc() as i64,
            raw,
        },
        Err(e) => SimulationOutcome::Failed(format!("Prediction failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::data::model::tests::record;
    use crate::data::regression::LinearModel;

    /// Counts calls and delegates to an inner model, or fails on demand.
    struct CountingModel {
        inner: LinearModel,
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingModel {
        fn new(fail: bool) -> Self {
            CountingModel {
                inner: LinearModel::new(0.001, 0.0002, 5.0),
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl Regressor for CountingModel {
        fn predict(&self, input: ModelInput) -> Result<f64, PredictionError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(PredictionError::NonFiniteOutput(f64::NAN));
            }
            self.inner.predict(input)
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec![
                record("A", "SP", 10, 3_000.0, 100.0),
                record("B", "SP", 20, 1_000.0, 200.0),
                record("C", "RJ", 30, 2_000.0, 300.0),
                record("D", "RJ", 40, 1_000.0, 50.0),
            ],
            0,
        )
    }

    #[test]
    fn fit_line_is_sorted_by_gdp() {
        let ds = dataset();
        let model = LinearModel::new(1.0, 0.0, 0.0);
        let line = fit_line(&model, &ds, &[0, 1, 2, 3]).unwrap();
        let xs: Vec<f64> = line.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![1_000.0, 1_000.0, 2_000.0, 3_000.0]);
    }

    #[test]
    fn fit_line_uses_both_features() {
        let ds = dataset();
        let model = LinearModel::new(0.0, 1.0, 1.0);
        let line = fit_line(&model, &ds, &[1, 3]).unwrap();
        // Equal GDP: stable order keeps B before D.
        assert_eq!(line, vec![[1_000.0, 201.0], [1_000.0, 51.0]]);
    }

    #[test]
    fn fit_line_does_not_touch_the_dataset() {
        let ds = dataset();
        let before = ds.records.clone();
        let _ = fit_line(&LinearModel::new(2.0, 2.0, 2.0), &ds, &[0, 1, 2, 3]);
        assert_eq!(ds.records, before);
    }

    #[test]
    fn fit_line_propagates_model_failure() {
        let ds = dataset();
        assert!(fit_line(&CountingModel::new(true), &ds, &[0, 1]).is_err());
    }

    #[test]
    fn fit_line_of_nothing_is_empty() {
        let ds = dataset();
        assert!(fit_line(&CountingModel::new(true), &ds, &[]).unwrap().is_empty());
    }

    #[test]
    fn zero_inputs_never_reach_the_model() {
        let model = CountingModel::new(false);
        assert_eq!(
            simulate(&model, 0.0, 50_000.0),
            SimulationOutcome::Invalid(INVALID_INPUT_WARNING.to_string())
        );
        assert!(matches!(simulate(&model, 1_000_000.0, 0.0), SimulationOutcome::Invalid(_)));
        assert!(matches!(simulate(&model, -1.0, 10.0), SimulationOutcome::Invalid(_)));
        assert!(matches!(simulate(&model, f64::NAN, 10.0), SimulationOutcome::Invalid(_)));
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn valid_inputs_give_a_truncated_estimate() {
        let model = CountingModel::new(false);
        match simulate(&model, 1_000_000.0, 50_000.0) {
            SimulationOutcome::Estimate { estimate, raw } => {
                assert_eq!(estimate, 1015);
                assert!((raw - 1015.0).abs() < 1e-9);
            }
            other => panic!("expected estimate, got {other:?}"),
        }
        assert_eq!(model.calls.get(), 1);

        let model = LinearModel::new(0.0, 0.0, 41.9);
        assert_eq!(
            simulate(&model, 1.0, 1.0),
            SimulationOutcome::Estimate { estimate: 41, raw: 41.9 }
        );
    }

    #[test]
    fn model_failure_is_reported_not_raised() {
        let model = CountingModel::new(true);
        match simulate(&model, 10.0, 10.0) {
            SimulationOutcome::Failed(msg) => assert!(msg.starts_with("Prediction failed")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
