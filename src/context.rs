use crate::config::AppConfig;
use crate::data::loader::load_dataset;
use crate::data::model::Dataset;
use crate::data::regression::{LinearModel, load_model};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Startup context
// ---------------------------------------------------------------------------

/// Everything loaded once at startup and only read afterwards.
///
/// Shared behind an `Arc` by every session; never mutated after `load`.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub config: AppConfig,
    pub dataset: Dataset,
    pub model: LinearModel,
}

impl DashboardContext {
    /// Load the dataset, then the model.  The first failure wins.
    pub fn load(config: &AppConfig) -> Result<Self, LoadError> {
        let dataset = load_dataset(&config.data_path)?;
        let model = load_model(&config.model_path)?;
        Ok(Self::new(config.clone(), dataset, model))
    }

    pub fn new(config: AppConfig, dataset: Dataset, model: LinearModel) -> Self {
        Self {
            config,
            dataset,
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_dataset_fails_before_the_model_is_read() {
        let config = AppConfig {
            data_path: PathBuf::from("/nonexistent/df_final.csv"),
            model_path: PathBuf::from("/nonexistent/model.json"),
        };
        match DashboardContext::load(&config) {
            Err(LoadError::DataLoad { path, .. }) => assert_eq!(path, config.data_path),
            other => panic!("expected data load error, got {other:?}"),
        }
    }
}
