use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Step of the per-model evaluation loop that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStage {
    Search,
    Configure,
    Fit,
    Predict,
    Score,
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "grid search",
            Self::Configure => "configure",
            Self::Fit => "fit",
            Self::Predict => "predict",
            Self::Score => "score",
        };
        f.write_str(name)
    }
}

/// Coarse classification used by callers that only care about the origin of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Data,
    Io,
    Model,
}

#[derive(Error, Debug)]
pub enum ScorecastError {
    #[error("Invalid configuration for {model}: {reason}")]
    Configuration { model: String, reason: String },

    #[error("Invalid data: {reason}")]
    Data { reason: String },

    #[error("Model {model} has not been fitted")]
    NotFitted { model: String },

    #[error("Fitting {model} failed: {reason}")]
    Fit { model: String, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error on {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Evaluation of {model} failed during {stage}: {source}")]
    Evaluation {
        model: String,
        stage: EvaluationStage,
        #[source]
        source: Box<ScorecastError>,
    },

    #[error("No acceptable model: best test score {best_score:.4} is below threshold {threshold}")]
    NoAcceptableModel { best_score: f64, threshold: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScorecastError {
    pub fn data(reason: impl Into<String>) -> Self {
        Self::Data { reason: reason.into() }
    }

    pub fn configuration(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Wraps `self` with the model name and evaluation step it came from.
    pub fn during(self, model: impl Into<String>, stage: EvaluationStage) -> Self {
        Self::Evaluation {
            model: model.into(),
            stage,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } | Self::Config(_) => ErrorKind::Configuration,
            Self::Data { .. } | Self::Csv(_) => ErrorKind::Data,
            Self::Io { .. } | Self::Serialization { .. } => ErrorKind::Io,
            Self::NotFitted { .. } | Self::Fit { .. } | Self::NoAcceptableModel { .. } => {
                ErrorKind::Model
            }
            Self::Evaluation { source, .. } => source.kind(),
        }
    }

    /// Innermost error, skipping any evaluation wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::Evaluation { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScorecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_wrapper_keeps_inner_kind() {
        let err = ScorecastError::configuration("Ridge", "unknown hyperparameter `alpha`")
            .during("Ridge", EvaluationStage::Search);

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err.root(), ScorecastError::Configuration { .. }));
        let message = err.to_string();
        assert!(message.contains("Ridge"));
        assert!(message.contains("grid search"));
    }
}
