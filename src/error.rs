use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup (fatal) errors
// ---------------------------------------------------------------------------

/// Failures while loading the two input files at startup.
///
/// All variants are fatal: the dashboard shows the message and nothing else.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file is absent, has an unsupported format or cannot be parsed.
    #[error("Failed to load dataset '{}': {reason}", path.display())]
    DataLoad { path: PathBuf, reason: String },

    /// One or more required columns are missing from the dataset header.
    #[error("Dataset is missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The model artifact is absent or cannot be decoded.
    #[error("Failed to load model '{}': {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },
}

impl LoadError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        LoadError::DataLoad {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }

    pub(crate) fn model_load(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        LoadError::ModelLoad {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction (non-fatal) errors
// ---------------------------------------------------------------------------

/// A model call that could not produce a usable estimate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("input '{feature}' is not a finite number ({value})")]
    NonFiniteInput { feature: &'static str, value: f64 },

    #[error("model produced a non-finite estimate ({0})")]
    NonFiniteOutput(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_column() {
        let err = LoadError::Schema {
            missing: vec!["pib_total".into(), "pop_total".into()],
        };
        assert_eq!(
            err.to_string(),
            "Dataset is missing required column(s): pib_total, pop_total"
        );
    }

    #[test]
    fn data_load_keeps_context_chain() {
        let inner = anyhow::anyhow!("bad quote").context("CSV row 3");
        let err = LoadError::data_load("df.csv", inner);
        assert_eq!(
            err.to_string(),
            "Failed to load dataset 'df.csv': CSV row 3: bad quote"
        );
    }
}
