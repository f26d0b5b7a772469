// Constant predictor used as a floor for model selection

use ndarray::{Array1, Array2};
use scorecast_models::{Hyperparameters, Result};
use serde::{Deserialize, Serialize};

use crate::regressor::{check_feature_count, check_training_data, not_fitted, unknown_param, Regressor};

const NAME: &str = "MeanRegressor";

/// Predicts the training-set mean of the target for every row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeanRegressor {
    fitted: Option<(f64, usize)>,
}

impl MeanRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(&self) -> Option<f64> {
        self.fitted.map(|(mean, _)| mean)
    }
}

impl Regressor for MeanRegressor {
    fn name(&self) -> &str {
        NAME
    }

    fn configure(&mut self, params: &Hyperparameters) -> Result<()> {
        match params.keys().next() {
            Some(name) => Err(unknown_param(NAME, name)),
            None => Ok(()),
        }
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_data(NAME, x, y)?;
        let mean = y.mean().unwrap_or_default();
        self.fitted = Some((mean, x.ncols()));
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let (mean, n_features) = self.fitted.ok_or_else(|| not_fitted(NAME))?;
        check_feature_count(NAME, x, n_features)?;
        Ok(Array1::from_elem(x.nrows(), mean))
    }

    fn params(&self) -> Hyperparameters {
        Hyperparameters::new()
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use scorecast_models::ParamValue;

    #[test]
    fn predicts_training_mean() {
        let mut model = MeanRegressor::new();
        model.fit(&array![[1.0], [2.0], [3.0]], &array![1.0, 2.0, 6.0]).unwrap();

        assert_eq!(model.mean(), Some(3.0));
        assert_eq!(model.predict(&array![[100.0], [-4.0]]).unwrap(), array![3.0, 3.0]);
    }

    #[test]
    fn accepts_no_hyperparameters() {
        let mut model = MeanRegressor::new();
        assert!(model.configure(&Hyperparameters::new()).is_ok());
        let params = Hyperparameters::from([("strategy".to_string(), ParamValue::from("median"))]);
        assert!(model.configure(&params).is_err());
    }
}
