use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, PredictionError};

// ---------------------------------------------------------------------------
// Model input
// ---------------------------------------------------------------------------

/// Feature names the model was trained against, in coefficient order.
pub const FEATURE_NAMES: [&str; 2] = ["x_pib_total", "x_pop_total"];

/// The two predictors of a single estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    #[serde(rename = "x_pib_total")]
    pub gdp_total: f64,
    #[serde(rename = "x_pop_total")]
    pub population: f64,
}

impl ModelInput {
    pub fn new(gdp_total: f64, population: f64) -> Self {
        ModelInput {
            gdp_total,
            population,
        }
    }
}

/// Anything that maps a [`ModelInput`] to an estimated business count.
pub trait Regressor {
    fn predict(&self, input: ModelInput) -> Result<f64, PredictionError>;
}

// ---------------------------------------------------------------------------
// LinearModel
// ---------------------------------------------------------------------------

/// A pre-fitted two-feature linear regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub coefficient_gdp: f64,
    pub coefficient_population: f64,
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficient_gdp: f64, coefficient_population: f64, intercept: f64) -> Self {
        LinearModel {
            coefficient_gdp,
            coefficient_population,
            intercept,
        }
    }

    /// `intercept + coefficient_gdp * gdp + coefficient_population * population`,
    /// without any input validation.
    pub fn evaluate(&self, gdp_total: f64, population: f64) -> f64 {
        self.intercept + self.coefficient_gdp * gdp_total + self.coefficient_population * population
    }

    fn is_finite(&self) -> bool {
        self.coefficient_gdp.is_finite()
            && self.coefficient_population.is_finite()
            && self.intercept.is_finite()
    }
}

impl Regressor for LinearModel {
    fn predict(&self, input: ModelInput) -> Result<f64, PredictionError> {
        for (feature, value) in FEATURE_NAMES.into_iter().zip([input.gdp_total, input.population]) {
            if !value.is_finite() {
                return Err(PredictionError::NonFiniteInput { feature, value });
            }
        }
        let estimate = self.evaluate(input.gdp_total, input.population);
        if !estimate.is_finite() {
            return Err(PredictionError::NonFiniteOutput(estimate));
        }
        Ok(estimate)
    }
}

// ---------------------------------------------------------------------------
// Artifact formats
// ---------------------------------------------------------------------------

/// JSON artifact, shaped like a fitted scikit-learn `LinearRegression`
/// (`feature_names_in_`, `coef_`, `intercept_`).
#[derive(Debug, Serialize, Deserialize)]
struct JsonArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Leading bytes of the binary artifact, followed by three little-endian
/// `f64`: intercept, GDP coefficient, population coefficient.
pub const BINARY_MAGIC: &[u8; 8] = b"LINREG\x00\x01";
const BINARY_LEN: usize = BINARY_MAGIC.len() + 3 * 8;

impl LinearModel {
    fn from_json(text: &str) -> Result<Self> {
        let artifact: JsonArtifact = serde_json::from_str(text).context("parsing JSON model")?;

        if let Some(names) = &artifact.feature_names {
            ensure!(
                names.iter().map(String::as_str).eq(FEATURE_NAMES),
                "model was trained on features {names:?}, expected {FEATURE_NAMES:?}"
            );
        }
        let &[coefficient_gdp, coefficient_population] = artifact.coefficients.as_slice() else {
            bail!(
                "expected {} coefficients, found {}",
                FEATURE_NAMES.len(),
                artifact.coefficients.len()
            );
        };
        Ok(LinearModel::new(coefficient_gdp, coefficient_population, artifact.intercept))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == BINARY_LEN,
            "expected {BINARY_LEN} bytes, found {}",
            bytes.len()
        );
        let (magic, params) = bytes.split_at(BINARY_MAGIC.len());
        ensure!(magic == BINARY_MAGIC, "not a linear model artifact (bad magic)");

        let mut values = params.chunks_exact(8).map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        });
        let mut next = || values.next().context("truncated parameters");
        let intercept = next()?;
        let coefficient_gdp = next()?;
        let coefficient_population = next()?;
        Ok(LinearModel::new(coefficient_gdp, coefficient_population, intercept))
    }

    /// Encode as a JSON artifact including the expected feature names.
    pub fn to_json(&self) -> Result<String> {
        let artifact = JsonArtifact {
            feature_names: Some(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()),
            coefficients: vec![self.coefficient_gdp, self.coefficient_population],
            intercept: self.intercept,
        };
        serde_json::to_string_pretty(&artifact).context("serialising model")
    }

    /// Encode as a binary artifact.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BINARY_LEN);
        out.extend_from_slice(BINARY_MAGIC);
        for v in [self.intercept, self.coefficient_gdp, self.coefficient_population] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a model artifact.  Dispatch by extension (`.json` or `.bin`).
pub fn load_model(path: &Path) -> Result<LinearModel, LoadError> {
    if !path.is_file() {
        return Err(LoadError::ModelLoad {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }
    let model = read_model(path).map_err(|e| LoadError::model_load(path, e))?;
    log::info!(
        "Loaded model from {}: intercept={}, gdp={}, population={}",
        path.display(),
        model.intercept,
        model.coefficient_gdp,
        model.coefficient_population
    );
    Ok(model)
}

fn read_model(path: &Path) -> Result<LinearModel> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let model = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading model file")?;
            LinearModel::from_json(&text)?
        }
        "bin" => {
            let bytes = std::fs::read(path).context("reading model file")?;
            LinearModel::from_bytes(&bytes)?
        }
        other => bail!("Unsupported model extension: .{other}"),
    };
    ensure!(model.is_finite(), "model parameters must be finite");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn predict_is_intercept_plus_weighted_features() {
        let model = LinearModel::new(0.001, 0.0002, 5.0);
        let estimate = model.predict(ModelInput::new(1_000_000.0, 50_000.0)).unwrap();
        assert_eq!(estimate, 5.0 + 0.001 * 1_000_000.0 + 0.0002 * 50_000.0);
        assert!((estimate - 1015.0).abs() < 1e-9);
    }

    #[test]
    fn scaling_inputs_does_not_scale_the_estimate() {
        let model = LinearModel::new(0.001, 0.0002, 5.0);
        let base = model.predict(ModelInput::new(1_000_000.0, 50_000.0)).unwrap();
        let doubled = model.predict(ModelInput::new(2_000_000.0, 100_000.0)).unwrap();
        assert!((doubled - 2.0 * base).abs() > 1.0);
        assert!((doubled - 2025.0).abs() < 1e-9);
    }

    #[test]
    fn predict_rejects_non_finite_input() {
        let model = LinearModel::new(1.0, 1.0, 0.0);
        assert!(matches!(
            model.predict(ModelInput::new(f64::NAN, 1.0)),
            Err(PredictionError::NonFiniteInput { feature: "x_pib_total", .. })
        ));
        assert!(matches!(
            model.predict(ModelInput::new(1.0, f64::INFINITY)),
            Err(PredictionError::NonFiniteInput { feature: "x_pop_total", .. })
        ));
    }

    #[test]
    fn predict_rejects_overflowing_estimate() {
        let model = LinearModel::new(f64::MAX, 0.0, 0.0);
        assert!(matches!(
            model.predict(ModelInput::new(10.0, 0.0)),
            Err(PredictionError::NonFiniteOutput(_))
        ));
    }

    #[test]
    fn input_serialises_with_trained_feature_names() {
        let json = serde_json::to_value(ModelInput::new(1.0, 2.0)).unwrap();
        assert_eq!(json, serde_json::json!({"x_pib_total": 1.0, "x_pop_total": 2.0}));
    }

    #[test]
    fn loads_json_artifact() {
        let file = write_temp(
            ".json",
            br#"{"feature_names": ["x_pib_total", "x_pop_total"], "coefficients": [0.001, 0.0002], "intercept": 5.0}"#,
        );
        let model = load_model(file.path()).unwrap();
        assert_eq!(model, LinearModel::new(0.001, 0.0002, 5.0));
    }

    #[test]
    fn json_artifact_without_feature_names_is_accepted() {
        let file = write_temp(".json", br#"{"coefficients": [2.0, 3.0], "intercept": -1.0}"#);
        assert_eq!(load_model(file.path()).unwrap(), LinearModel::new(2.0, 3.0, -1.0));
    }

    #[test]
    fn renamed_features_are_rejected() {
        let file = write_temp(
            ".json",
            br#"{"feature_names": ["pib_total", "pop_total"], "coefficients": [1.0, 1.0], "intercept": 0.0}"#,
        );
        match load_model(file.path()) {
            Err(LoadError::ModelLoad { reason, .. }) => assert!(reason.contains("pib_total"), "{reason}"),
            other => panic!("expected model load error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let file = write_temp(".json", br#"{"coefficients": [1.0], "intercept": 0.0}"#);
        assert!(matches!(load_model(file.path()), Err(LoadError::ModelLoad { .. })));
    }

    #[test]
    fn corrupt_artifacts_are_rejected() {
        let json = write_temp(".json", b"not json at all");
        assert!(matches!(load_model(json.path()), Err(LoadError::ModelLoad { .. })));

        let bin = write_temp(".bin", b"LINREG\x00\x01short");
        assert!(matches!(load_model(bin.path()), Err(LoadError::ModelLoad { .. })));

        let pkl = write_temp(".pkl", b"\x80\x04");
        assert!(matches!(load_model(pkl.path()), Err(LoadError::ModelLoad { .. })));
    }

    #[test]
    fn missing_model_is_a_model_load_error() {
        assert!(matches!(
            load_model(Path::new("/nonexistent/model.json")),
            Err(LoadError::ModelLoad { .. })
        ));
    }

    #[test]
    fn binary_artifact_layout() {
        let model = LinearModel::new(0.5, 0.25, 3.0);
        let bytes = model.to_bytes();
        assert_eq!(&bytes[..8], BINARY_MAGIC);
        assert_eq!(&bytes[8..16], &3.0f64.to_le_bytes());

        let file = write_temp(".bin", &bytes);
        assert_eq!(load_model(file.path()).unwrap(), model);
    }
}
