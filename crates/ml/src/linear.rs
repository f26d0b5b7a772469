// Ordinary least squares backed by linfa-linear

use linfa::traits::Fit;
use linfa::DatasetBase;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use scorecast_models::{Hyperparameters, ParamValue, Result, ScorecastError};
use serde::{Deserialize, Serialize};

use crate::regressor::{
    check_training_data, expect_bool, not_fitted, unknown_param, LinearFit, Regressor,
};

const NAME: &str = "LinearRegression";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRegressor {
    fit_intercept: bool,
    fitted: Option<LinearFit>,
}

impl Default for LinearRegressor {
    fn default() -> Self {
        Self {
            fit_intercept: true,
            fitted: None,
        }
    }
}

impl LinearRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub const fn coefficients(&self) -> Option<&LinearFit> {
        self.fitted.as_ref()
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        NAME
    }

    fn configure(&mut self, params: &Hyperparameters) -> Result<()> {
        let mut fit_intercept = self.fit_intercept;
        for (name, value) in params {
            match name.as_str() {
                "fit_intercept" => fit_intercept = expect_bool(NAME, name, value)?,
                other => return Err(unknown_param(NAME, other)),
            }
        }
        self.fit_intercept = fit_intercept;
        Ok(())
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_data(NAME, x, y)?;
        let dataset = DatasetBase::new(x.clone(), y.clone());
        let fitted = LinearRegression::new()
            .with_intercept(self.fit_intercept)
            .fit(&dataset)
            .map_err(|e| ScorecastError::Fit {
                model: NAME.to_string(),
                reason: e.to_string(),
            })?;

        self.fitted = Some(LinearFit {
            coefficients: fitted.params().clone(),
            intercept: fitted.intercept(),
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
        Hyperparameters::from([("fit_intercept".to_string(), ParamValue::Bool(self.fit_intercept))])
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
