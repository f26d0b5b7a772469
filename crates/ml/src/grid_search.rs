// Exhaustive cross-validated hyperparameter search

use ndarray::{Array1, Array2, Axis};
use scorecast_models::{Hyperparameters, ParamGrid, Result, ScorecastError};
use tracing::debug;

use crate::cv::KFold;
use crate::metrics::r2_score;
use crate::regressor::Regressor;

/// Cross-validated score of one grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub params: Hyperparameters,
    pub fold_scores: Vec<f64>,
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best_params: Hyperparameters,
    pub best_score: f64,
    /// Every configuration tried, in grid enumeration order.
    pub candidates: Vec<CandidateScore>,
}

/// Grid search selecting on mean R² across folds.
#[derive(Debug, Clone, Copy)]
pub struct GridSearchCv {
    folds: KFold,
}

impl GridSearchCv {
    pub fn new(n_splits: usize) -> Result<Self> {
        Ok(Self {
            folds: KFold::new(n_splits)?,
        })
    }

    /// Scores every configuration of `grid` on clones of `model`; `model`
    /// itself is left untouched. Ties keep the earliest configuration.
    pub fn search<R: Regressor + Clone>(
        &self,
        model: &R,
        grid: &ParamGrid,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<SearchOutcome> {
        if x.nrows() != y.len() {
            return Err(ScorecastError::data(format!(
                "feature table has {} rows but target has {}",
                x.nrows(),
                y.len()
            )));
        }
        let combinations = grid.combinations();
        if combinations.is_empty() {
            return Err(ScorecastError::configuration(
                model.name(),
                "parameter grid has an axis with no values",
            ));
        }

        let splits = self.folds.split(x.nrows())?;
        let folds: Vec<_> = splits
            .iter()
            .map(|fold| {
                (
                    x.select(Axis(0), &fold.train),
                    y.select(Axis(0), &fold.train),
                    x.select(Axis(0), &fold.validation),
                    y.select(Axis(0), &fold.validation),
                )
            })
            .collect();

        let mut candidates = Vec::with_capacity(combinations.len());
        let mut best: Option<(usize, f64)> = None;
        for params in combinations {
            let mut fold_scores = Vec::with_capacity(folds.len());
            for (x_train, y_train, x_val, y_val) in &folds {
                let mut trial = model.clone();
                trial.configure(&params)?;
                trial.fit(x_train, y_train)?;
                let predicted = trial.predict(x_val)?;
                fold_scores.push(r2_score(y_val, &predicted)?);
            }
            let mean_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
            debug!("🔎 {} {:?}: mean cv R² {:.4}", model.name(), params, mean_score);

            let improves = best.map_or(true, |(_, score)| {
                mean_score > score || (score.is_nan() && !mean_score.is_nan())
            });
            if improves {
                best = Some((candidates.len(), mean_score));
            }
            candidates.push(CandidateScore {
                params,
                fold_scores,
                mean_score,
            });
        }

        let (best_idx, best_score) = best.unwrap_or((0, f64::NAN));
        Ok(SearchOutcome {
            best_params: candidates[best_idx].params.clone(),
            best_score,
            candidates,
        })
    }
}
