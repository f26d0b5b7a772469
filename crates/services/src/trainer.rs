// Model training: evaluate candidates, keep the best one, persist artifacts

use scorecast_ml::{
    save_object, CandidateSet, ElasticNetRegressor, Estimator, KNeighborsRegressor,
    LinearRegressor, MeanRegressor, ModelArtifact, ModelEvaluator, Preprocessor, Regressor,
    DEFAULT_CV_FOLDS,
};
use scorecast_models::{EvaluationReport, ParamGrid, Result, ScorecastError, TrainingRecord};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::dataset::{students, targets, train_test_split};

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub test_ratio: f64,
    pub cv_folds: usize,
    /// Minimum test R² the selected model must reach to be saved.
    pub min_score: f64,
    pub seed: u64,
    pub model_path: PathBuf,
    pub preprocessor_path: PathBuf,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            cv_folds: DEFAULT_CV_FOLDS,
            min_score: 0.6,
            seed: 42,
            model_path: PathBuf::from("artifacts/model.bin"),
            preprocessor_path: PathBuf::from("artifacts/preprocessor.bin"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub best_model: String,
    pub best_score: f64,
    pub report: EvaluationReport,
}

/// Training rows of the smallest fit during `k`-fold cross-validation: the
/// largest fold holds `ceil(n / k)` rows out.
const fn smallest_cv_train_fold(n_train: usize, k: usize) -> usize {
    n_train - n_train.div_ceil(k)
}

/// The stock candidate models.
pub fn default_candidates() -> CandidateSet<Estimator> {
    CandidateSet::<Estimator>::new()
        .with("Linear Regression", LinearRegressor::new().into())
        .with("Ridge", ElasticNetRegressor::ridge().into())
        .with("Lasso", ElasticNetRegressor::lasso().into())
        .with("ElasticNet", ElasticNetRegressor::new().into())
        .with("K-Neighbors Regressor", KNeighborsRegressor::new().into())
        .with("Mean Baseline", MeanRegressor::new().into())
}

/// Search grids for [`default_candidates`]; models without an entry keep their defaults.
pub fn default_grids() -> HashMap<String, ParamGrid> {
    HashMap::from([
        (
            "Ridge".to_string(),
            ParamGrid::new().with("penalty", [0.01, 0.1, 1.0, 10.0]),
        ),
        (
            "Lasso".to_string(),
            ParamGrid::new().with("penalty", [0.001, 0.01, 0.1, 1.0]),
        ),
        (
            "ElasticNet".to_string(),
            ParamGrid::new()
                .with("penalty", [0.01, 0.1, 1.0])
                .with("l1_ratio", [0.2, 0.5, 0.8]),
        ),
        (
            "K-Neighbors Regressor".to_string(),
            ParamGrid::new()
                .with("n_neighbors", [5_i64, 7, 9, 11])
                .with("weights", ["uniform", "distance"]),
        ),
    ])
}

pub struct ModelTrainer {
    config: TrainerConfig,
    candidates: CandidateSet<Estimator>,
    grids: HashMap<String, ParamGrid>,
}

impl ModelTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            candidates: default_candidates(),
            grids: default_grids(),
        }
    }

    #[must_use]
    pub fn with_candidates(
        mut self,
        candidates: CandidateSet<Estimator>,
        grids: HashMap<String, ParamGrid>,
    ) -> Self {
        self.candidates = candidates;
        self.grids = grids;
        self
    }

    pub const fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Rows the most demanding grid configuration needs to fit. Configurations
    /// that do not apply are left for the evaluator to report.
    fn min_fold_rows(&self) -> usize {
        let no_search = ParamGrid::new();
        self.candidates
            .iter()
            .flat_map(|(name, model)| {
                let grid = self.grids.get(name).unwrap_or(&no_search);
                grid.combinations().into_iter().filter_map(move |params| {
                    let mut trial = model.clone();
                    trial.configure(&params).ok().map(|()| trial.min_samples())
                })
            })
            .max()
            .unwrap_or(1)
    }

    pub fn train(&self, records: &[TrainingRecord]) -> Result<TrainingOutcome> {
        let min_rows = 2 * self.config.cv_folds;
        if records.len() < min_rows {
            return Err(ScorecastError::data(format!(
                "need at least {min_rows} records to train, got {}",
                records.len()
            )));
        }

        let (train, test) = train_test_split(records, self.config.test_ratio, self.config.seed)?;
        info!("✂️  Split {} records into {} train / {} test", records.len(), train.len(), test.len());

        let needed = self.min_fold_rows();
        let available = smallest_cv_train_fold(train.len(), self.config.cv_folds);
        if available < needed {
            return Err(ScorecastError::data(format!(
                "{} records leave {available} rows per cross-validation fit, the candidates need {needed}",
                records.len()
            )));
        }

        let preprocessor = Preprocessor::fit(&students(&train))?;
        let x_train = preprocessor.transform(&students(&train))?;
        let x_test = preprocessor.transform(&students(&test))?;
        let y_train = targets(&train);
        let y_test = targets(&test);

        let mut candidates = self.candidates.clone();
        let report = ModelEvaluator::new(self.config.cv_folds)?.evaluate(
            &x_train,
            &y_train,
            &x_test,
            &y_test,
            &mut candidates,
            &self.grids,
        )?;

        let best = report
            .best()
            .ok_or_else(|| ScorecastError::data("evaluation produced an empty report"))?;
        let best_model = best.model_name.clone();
        let best_score = best.test_score;
        if !(best_score >= self.config.min_score) {
            warn!("⚠️  Best model {} scored {:.4}, below {}", best_model, best_score, self.config.min_score);
            return Err(ScorecastError::NoAcceptableModel {
                best_score,
                threshold: self.config.min_score,
            });
        }
        info!("🏆 Best model: {} (test R² {:.4})", best_model, best_score);

        let estimator = candidates
            .remove(&best_model)
            .ok_or_else(|| ScorecastError::data(format!("model {best_model} vanished after evaluation")))?;
        save_object(&self.config.preprocessor_path, &preprocessor)?;
        save_object(
            &self.config.model_path,
            &ModelArtifact::new(best_model.clone(), estimator, best_score),
        )?;
        info!(
            "💾 Saved model to {} and preprocessor to {}",
            self.config.model_path.display(),
            self.config.preprocessor_path.display()
        );

        Ok(TrainingOutcome {
            best_model,
            best_score,
            report,
        })
    }
}
