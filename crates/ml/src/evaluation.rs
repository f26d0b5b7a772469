// Model evaluation: grid search, refit and held-out scoring for each candidate

use ndarray::{Array1, Array2};
use scorecast_models::{
    EvaluationReport, EvaluationStage, ModelEvaluation, ParamGrid, Result, ScorecastError,
};
use std::collections::HashMap;
use tracing::info;

use crate::grid_search::GridSearchCv;
use crate::metrics::r2_score;
use crate::regressor::{CandidateSet, Regressor};

pub const DEFAULT_CV_FOLDS: usize = 3;

/// Runs the search/refit/score loop over a set of candidates.
#[derive(Debug, Clone, Copy)]
pub struct ModelEvaluator {
    search: GridSearchCv,
}

impl ModelEvaluator {
    pub fn new(cv_folds: usize) -> Result<Self> {
        Ok(Self {
            search: GridSearchCv::new(cv_folds)?,
        })
    }

    /// Evaluates every candidate and reports its held-out R².
    ///
    /// Each model is left configured with its best parameters and fitted on
    /// the full training split. The first failure aborts the whole call.
    pub fn evaluate<R: Regressor + Clone>(
        &self,
        x_train: &Array2<f64>,
        y_train: &Array1<f64>,
        x_test: &Array2<f64>,
        y_test: &Array1<f64>,
        models: &mut CandidateSet<R>,
        params: &HashMap<String, ParamGrid>,
    ) -> Result<EvaluationReport> {
        check_split_shapes(x_train, y_train, x_test, y_test)?;
        if models.is_empty() {
            return Err(ScorecastError::data("no candidate models to evaluate"));
        }

        let no_search = ParamGrid::new();
        let mut report = EvaluationReport::new();
        for (name, model) in models.iter_mut() {
            let grid = params.get(name).unwrap_or(&no_search);
            let outcome = self
                .search
                .search(model, grid, x_train, y_train)
                .map_err(|e| e.during(name, EvaluationStage::Search))?;

            model
                .configure(&outcome.best_params)
                .map_err(|e| e.during(name, EvaluationStage::Configure))?;
            model
                .fit(x_train, y_train)
                .map_err(|e| e.during(name, EvaluationStage::Fit))?;

            let y_train_pred = model
                .predict(x_train)
                .map_err(|e| e.during(name, EvaluationStage::Predict))?;
            let y_test_pred = model
                .predict(x_test)
                .map_err(|e| e.during(name, EvaluationStage::Predict))?;

            let train_score =
                r2_score(y_train, &y_train_pred).map_err(|e| e.during(name, EvaluationStage::Score))?;
            let test_score =
                r2_score(y_test, &y_test_pred).map_err(|e| e.during(name, EvaluationStage::Score))?;

            info!(
                "📈 Model: {}, Train Score: {:.4}, Test Score: {:.4}",
                name, train_score, test_score
            );

            report.push(ModelEvaluation {
                model_name: name.to_string(),
                test_score,
                train_score,
                cv_score: outcome.best_score,
                best_params: outcome.best_params,
            });
        }

        Ok(report)
    }
}

/// Evaluates `models` with 3-fold grid search and R² scoring.
pub fn evaluate_models<R: Regressor + Clone>(
    x_train: &Array2<f64>,
    y_train: &Array1<f64>,
    x_test: &Array2<f64>,
    y_test: &Array1<f64>,
    models: &mut CandidateSet<R>,
    params: &HashMap<String, ParamGrid>,
) -> Result<EvaluationReport> {
    ModelEvaluator::new(DEFAULT_CV_FOLDS)?.evaluate(x_train, y_train, x_test, y_test, models, params)
}

fn check_split_shapes(
    x_train: &Array2<f64>,
    y_train: &Array1<f64>,
    x_test: &Array2<f64>,
    y_test: &Array1<f64>,
) -> Result<()> {
    if x_train.nrows() != y_train.len() {
        return Err(ScorecastError::data(format!(
            "training features have {} rows but training target has {}",
            x_train.nrows(),
            y_train.len()
        )));
    }
    if x_test.nrows() != y_test.len() {
        return Err(ScorecastError::data(format!(
            "test features have {} rows but test target has {}",
            x_test.nrows(),
            y_test.len()
        )));
    }
    if x_train.ncols() != x_test.ncols() {
        return Err(ScorecastError::data(format!(
            "training features have {} columns but test features have {}",
            x_train.ncols(),
            x_test.ncols()
        )));
    }
    if x_test.nrows() == 0 {
        return Err(ScorecastError::data("test split is empty"));
    }
    Ok(())
}
