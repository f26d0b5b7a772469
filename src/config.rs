use config::{Config, ConfigError, Environment, File};
use scorecast_services::TrainerConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub preprocessor_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub data_path: PathBuf,
    pub test_ratio: f64,
    pub cv_folds: usize,
    pub min_score: f64,
    pub seed: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("artifacts.model_path", "artifacts/model.bin")?
            .set_default("artifacts.preprocessor_path", "artifacts/preprocessor.bin")?
            .set_default("training.data_path", "notebook/data/stud.csv")?
            .set_default("training.test_ratio", 0.2)?
            .set_default("training.cv_folds", 3)?
            .set_default("training.min_score", 0.6)?
            .set_default("training.seed", 42)?
            // Add in settings from configuration file
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from environment variables, e.g. SCORECAST_SERVER__PORT
            .add_source(
                Environment::with_prefix("SCORECAST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig {
            test_ratio: self.training.test_ratio,
            cv_folds: self.training.cv_folds,
            min_score: self.training.min_score,
            seed: self.training.seed,
            model_path: self.artifacts.model_path.clone(),
            preprocessor_path: self.artifacts.preprocessor_path.clone(),
        }
    }
}
