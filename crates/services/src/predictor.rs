// Prediction pipeline: persisted preprocessor + model

use scorecast_ml::{load_object, ModelArtifact, Preprocessor, Regressor};
use scorecast_models::{Result, ScorecastError, StudentRecord};
use std::path::Path;
use tracing::info;

pub struct PredictPipeline {
    preprocessor: Preprocessor,
    artifact: ModelArtifact,
}

impl PredictPipeline {
    pub fn new(preprocessor: Preprocessor, artifact: ModelArtifact) -> Result<Self> {
        if !artifact.estimator.is_fitted() {
            return Err(ScorecastError::NotFitted {
                model: artifact.model_name,
            });
        }
        Ok(Self {
            preprocessor,
            artifact,
        })
    }

    /// Loads both artifacts written by the trainer.
    pub fn load(model_path: impl AsRef<Path>, preprocessor_path: impl AsRef<Path>) -> Result<Self> {
        let artifact: ModelArtifact = load_object(model_path)?;
        let preprocessor: Preprocessor = load_object(preprocessor_path)?;
        info!(
            "🤖 Loaded model {} (test R² {:.4}, trained {})",
            artifact.model_name, artifact.test_score, artifact.trained_at
        );
        Self::new(preprocessor, artifact)
    }

    pub fn model_name(&self) -> &str {
        &self.artifact.model_name
    }

    pub const fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn predict(&self, records: &[StudentRecord]) -> Result<Vec<f64>> {
        if records.is_empty() {
            return Err(ScorecastError::data("no records to predict"));
        }
        let features = self.preprocessor.transform(records)?;
        Ok(self.artifact.estimator.predict(&features)?.to_vec())
    }

    pub fn predict_one(&self, record: &StudentRecord) -> Result<f64> {
        self.predict(std::slice::from_ref(record))
            .map(|scores| scores[0])
    }
}
