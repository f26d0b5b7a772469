// Penalised linear regression (ridge, lasso and the mix of both) backed by linfa-elasticnet

use linfa::traits::Fit;
use linfa::DatasetBase;
use linfa_elasticnet::ElasticNet;
use ndarray::{Array1, Array2, Axis};
use scorecast_models::{Hyperparameters, ParamValue, Result, ScorecastError};
use serde::{Deserialize, Serialize};

use crate::regressor::{
    check_training_data, expect_bool, expect_f64, expect_positive_int, not_fitted, unknown_param,
    LinearFit, Regressor,
};

const NAME: &str = "ElasticNet";

/// Linear model minimising squared error plus
/// `penalty * (l1_ratio * |w|_1 + (1 - l1_ratio) / 2 * |w|_2^2)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElasticNetRegressor {
    penalty: f64,
    l1_ratio: f64,
    fit_intercept: bool,
    max_iterations: u32,
    tolerance: f64,
    fitted: Option<LinearFit>,
}

impl Default for ElasticNetRegressor {
    fn default() -> Self {
        Self {
            penalty: 1.0,
            l1_ratio: 0.5,
            fit_intercept: true,
            max_iterations: 1000,
            tolerance: 1e-4,
            fitted: None,
        }
    }
}

impl ElasticNetRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure L2 penalty.
    pub fn ridge() -> Self {
        Self {
            l1_ratio: 0.0,
            ..Self::default()
        }
    }

    /// Pure L1 penalty.
    pub fn lasso() -> Self {
        Self {
            l1_ratio: 1.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub const fn penalty(&self) -> f64 {
        self.penalty
    }

    pub const fn l1_ratio(&self) -> f64 {
        self.l1_ratio
    }

    pub const fn coefficients(&self) -> Option<&LinearFit> {
        self.fitted.as_ref()
    }
}

impl Regressor for ElasticNetRegressor {
    fn name(&self) -> &str {
        NAME
    }

    fn configure(&mut self, params: &Hyperparameters) -> Result<()> {
        let mut next = self.clone();
        for (name, value) in params {
            match name.as_str() {
                "penalty" => {
                    let penalty = expect_f64(NAME, name, value)?;
                    if penalty < 0.0 {
                        return Err(ScorecastError::configuration(NAME, format!("`penalty` must be non-negative, got {penalty}")));
                    }
                    next.penalty = penalty;
                }
                "l1_ratio" => {
                    let ratio = expect_f64(NAME, name, value)?;
                    if !(0.0..=1.0).contains(&ratio) {
                        return Err(ScorecastError::configuration(NAME, format!("`l1_ratio` must be within [0, 1], got {ratio}")));
                    }
                    next.l1_ratio = ratio;
                }
                "fit_intercept" => next.fit_intercept = expect_bool(NAME, name, value)?,
                "max_iterations" => {
                    let iterations = expect_positive_int(NAME, name, value)?;
                    next.max_iterations = u32::try_from(iterations).map_err(|_| {
                        ScorecastError::configuration(NAME, format!("`max_iterations` is too large: {iterations}"))
                    })?;
                }
                "tolerance" => {
                    let tolerance = expect_f64(NAME, name, value)?;
                    if tolerance <= 0.0 {
                        return Err(ScorecastError::configuration(NAME, format!("`tolerance` must be positive, got {tolerance}")));
                    }
                    next.tolerance = tolerance;
                }
                other => return Err(unknown_param(NAME, other)),
            }
        }
        self.penalty = next.penalty;
        self.l1_ratio = next.l1_ratio;
        self.fit_intercept = next.fit_intercept;
        self.max_iterations = next.max_iterations;
        self.tolerance = next.tolerance;
        Ok(())
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_data(NAME, x, y)?;
        // linfa-elasticnet only centres the target, so the features are
        // centred here and the intercept is recovered from the means
        let x_mean = if self.fit_intercept {
            x.mean_axis(Axis(0))
                .ok_or_else(|| ScorecastError::data(format!("{NAME}: cannot fit on zero rows")))?
        } else {
            Array1::zeros(x.ncols())
        };
        let dataset = DatasetBase::new(x - &x_mean, y.clone());
        let fitted = ElasticNet::<f64>::params()
            .penalty(self.penalty)
            .l1_ratio(self.l1_ratio)
            .with_intercept(self.fit_intercept)
            .max_iterations(self.max_iterations)
            .tolerance(self.tolerance)
            .fit(&dataset)
            .map_err(|e| ScorecastError::Fit {
                model: NAME.to_string(),
                reason: e.to_string(),
            })?;

        let coefficients = fitted.hyperplane().clone();
        let intercept = fitted.intercept() - x_mean.dot(&coefficients);
        self.fitted = Some(LinearFit {
            coefficients,
            intercept,
        });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.fitted
            .as_ref()
            .ok_or_else(|| not_fitted(NAME))?
            .predict(NAME, x)
    }

    fn params(&self) -> Hyperparameters {
        Hyperparameters::from([
            ("penalty".to_string(), ParamValue::Float(self.penalty)),
            ("l1_ratio".to_string(), ParamValue::Float(self.l1_ratio)),
            ("fit_intercept".to_string(), ParamValue::Bool(self.fit_intercept)),
            ("max_iterations".to_string(), ParamValue::Int(i64::from(self.max_iterations))),
            ("tolerance".to_string(), ParamValue::Float(self.tolerance)),
        ])
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
