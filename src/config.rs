use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_PATH: &str = "df_final.csv";
pub const DEFAULT_MODEL_PATH: &str = "modelo_regressao_empresas.json";

/// Municipal business demography dashboard.
///
/// Loads a municipal dataset and a pre-fitted linear model, then opens an
/// interactive window with filters, plot, ranking and scenario simulation.
#[derive(Parser, Debug)]
#[command(name = "bizdemo", version, about)]
pub struct Cli {
    /// Dataset file (.csv, .parquet or .json).
    #[arg(short = 'd', long = "data", env = "BIZDEMO_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Model artifact (.json or .bin).
    #[arg(short = 'm', long = "model", env = "BIZDEMO_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Paths of the two input files, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            data_path: cli.data.clone(),
            model_path: cli.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_override_defaults() {
        let cli = Cli::try_parse_from(["bizdemo", "-d", "mun.parquet", "--model", "m.bin", "--debug"])
            .unwrap();
        let config = AppConfig::from(&cli);
        assert_eq!(config.data_path, PathBuf::from("mun.parquet"));
        assert_eq!(config.model_path, PathBuf::from("m.bin"));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["bizdemo", "--port", "8080"]).is_err());
    }

    #[test]
    fn default_config_points_at_working_directory_files() {
        let config = AppConfig::default();
        assert_eq!(config.data_path, PathBuf::from("df_final.csv"));
        assert_eq!(config.model_path, PathBuf::from("modelo_regressao_empresas.json"));
    }
}
