// k-nearest-neighbours regression over euclidean distance

use ndarray::{Array1, Array2, ArrayView1};
use scorecast_models::{Hyperparameters, ParamValue, Result, ScorecastError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::regressor::{
    check_feature_count, check_training_data, expect_positive_int, expect_str, not_fitted,
    unknown_param, Regressor,
};

const NAME: &str = "KNeighborsRegressor";

/// How neighbours contribute to a prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Weighting {
    Uniform,
    /// Inverse distance; exact matches take over the prediction.
    Distance,
}

impl Weighting {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Distance => "distance",
        }
    }
}

impl FromStr for Weighting {
    type Err = ScorecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "distance" => Ok(Self::Distance),
            other => Err(ScorecastError::configuration(
                NAME,
                format!("`weights` must be \"uniform\" or \"distance\", got {other:?}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Memory {
    x: Array2<f64>,
    y: Array1<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KNeighborsRegressor {
    n_neighbors: usize,
    weights: Weighting,
    fitted: Option<Memory>,
}

impl Default for KNeighborsRegressor {
    fn default() -> Self {
        Self {
            n_neighbors: 5,
            weights: Weighting::Uniform,
            fitted: None,
        }
    }
}

impl KNeighborsRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    #[must_use]
    pub const fn with_weights(mut self, weights: Weighting) -> Self {
        self.weights = weights;
        self
    }

    pub const fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    fn predict_row(&self, memory: &Memory, row: ArrayView1<'_, f64>) -> f64 {
        let mut distances: Vec<(f64, usize)> = memory
            .x
            .outer_iter()
            .enumerate()
            .map(|(i, train_row)| {
                let d2: f64 = train_row
                    .iter()
                    .zip(row.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                (d2.sqrt(), i)
            })
            .collect();

        let k = self.n_neighbors.min(distances.len());
        // distances are finite because fit rejects non-finite rows
        distances.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0));
        let neighbours = &distances[..k];

        match self.weights {
            Weighting::Uniform => {
                neighbours.iter().map(|&(_, i)| memory.y[i]).sum::<f64>() / k as f64
            }
            Weighting::Distance => {
                let exact: Vec<f64> = neighbours
                    .iter()
                    .filter(|(d, _)| *d == 0.0)
                    .map(|&(_, i)| memory.y[i])
                    .collect();
                if !exact.is_empty() {
                    return exact.iter().sum::<f64>() / exact.len() as f64;
                }
                // weights relative to the nearest neighbour lie in (0, 1]
                let nearest = neighbours.iter().map(|&(d, _)| d).fold(f64::INFINITY, f64::min);
                if nearest.is_infinite() {
                    return neighbours.iter().map(|&(_, i)| memory.y[i]).sum::<f64>() / k as f64;
                }
                let weights: Vec<f64> = neighbours.iter().map(|&(d, _)| nearest / d).collect();
                let total: f64 = weights.iter().sum();
                neighbours
                    .iter()
                    .zip(&weights)
                    .map(|(&(_, i), w)| w / total * memory.y[i])
                    .sum()
            }
        }
    }
}

impl Regressor for KNeighborsRegressor {
    fn name(&self) -> &str {
        NAME
    }

    fn configure(&mut self, params: &Hyperparameters) -> Result<()> {
        let mut n_neighbors = self.n_neighbors;
        let mut weights = self.weights;
        for (name, value) in params {
            match name.as_str() {
                "n_neighbors" => n_neighbors = expect_positive_int(NAME, name, value)?,
                "weights" => weights = expect_str(NAME, name, value)?.parse::<Weighting>()?,
                other => return Err(unknown_param(NAME, other)),
            }
        }
        self.n_neighbors = n_neighbors;
        self.weights = weights;
        Ok(())
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_data(NAME, x, y)?;
        if self.n_neighbors == 0 || self.n_neighbors > x.nrows() {
            return Err(ScorecastError::Fit {
                model: NAME.to_string(),
                reason: format!(
                    "n_neighbors = {} must be within 1..={} training rows",
                    self.n_neighbors,
                    x.nrows()
                ),
            });
        }
        self.fitted = Some(Memory {
            x: x.clone(),
            y: y.clone(),
        });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let memory = self.fitted.as_ref().ok_or_else(|| not_fitted(NAME))?;
        check_feature_count(NAME, x, memory.x.ncols())?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ScorecastError::data(format!("{NAME}: input contains non-finite values")));
        }
        Ok(x.outer_iter().map(|row| self.predict_row(memory, row)).collect())
    }

    fn params(&self) -> Hyperparameters {
        let n_neighbors = i64::try_from(self.n_neighbors).unwrap_or(i64::MAX);
        Hyperparameters::from([
            ("n_neighbors".to_string(), ParamValue::Int(n_neighbors)),
            ("weights".to_string(), ParamValue::from(self.weights.as_str())),
        ])
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn min_samples(&self) -> usize {
        self.n_neighbors
    }
}
