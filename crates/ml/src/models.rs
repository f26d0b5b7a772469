// Serializable model variants

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use scorecast_models::{Hyperparameters, Result};
use serde::{Deserialize, Serialize};

use crate::baseline::MeanRegressor;
use crate::elastic_net::ElasticNetRegressor;
use crate::knn::KNeighborsRegressor;
use crate::linear::LinearRegressor;
use crate::regressor::Regressor;

/// Any regressor this crate provides, as one persistable type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Estimator {
    Linear(LinearRegressor),
    ElasticNet(ElasticNetRegressor),
    KNeighbors(KNeighborsRegressor),
    Mean(MeanRegressor),
}

macro_rules! dispatch {
    ($self:expr, $model:ident => $body:expr) => {
        match $self {
            Estimator::Linear($model) => $body,
            Estimator::ElasticNet($model) => $body,
            Estimator::KNeighbors($model) => $body,
            Estimator::Mean($model) => $body,
        }
    };
}

impl Regressor for Estimator {
    fn name(&self) -> &str {
        dispatch!(self, m => m.name())
    }

    fn configure(&mut self, params: &Hyperparameters) -> Result<()> {
        dispatch!(self, m => m.configure(params))
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        dispatch!(self, m => m.fit(x, y))
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        dispatch!(self, m => m.predict(x))
    }

    fn params(&self) -> Hyperparameters {
        dispatch!(self, m => m.params())
    }

    fn is_fitted(&self) -> bool {
        dispatch!(self, m => m.is_fitted())
    }

    fn min_samples(&self) -> usize {
        dispatch!(self, m => m.min_samples())
    }
}

impl From<LinearRegressor> for Estimator {
    fn from(model: LinearRegressor) -> Self {
        Self::Linear(model)
    }
}

impl From<ElasticNetRegressor> for Estimator {
    fn from(model: ElasticNetRegressor) -> Self {
        Self::ElasticNet(model)
    }
}

impl From<KNeighborsRegressor> for Estimator {
    fn from(model: KNeighborsRegressor) -> Self {
        Self::KNeighbors(model)
    }
}

impl From<MeanRegressor> for Estimator {
    fn from(model: MeanRegressor) -> Self {
        Self::Mean(model)
    }
}

/// A fitted model as written to disk by training and read back for serving.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelArtifact {
    pub model_name: String,
    pub estimator: Estimator,
    pub test_score: f64,
    pub trained_at: DateTime<Utc>,
}

impl ModelArtifact {
    pub fn new(model_name: impl Into<String>, estimator: Estimator, test_score: f64) -> Self {
        Self {
            model_name: model_name.into(),
            estimator,
            test_score,
            trained_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn estimator_delegates_to_variant() {
        let mut model = Estimator::from(MeanRegressor::new());
        assert_eq!(model.name(), "MeanRegressor");
        assert!(!model.is_fitted());

        model.fit(&array![[0.0], [1.0]], &array![2.0, 4.0]).unwrap();
        assert_eq!(model.predict(&array![[5.0]]).unwrap(), array![3.0]);
    }

    #[test]
    fn min_samples_follows_neighbour_count() {
        assert_eq!(Estimator::from(LinearRegressor::new()).min_samples(), 1);
        let knn = Estimator::from(KNeighborsRegressor::new().with_neighbors(9));
        assert_eq!(knn.min_samples(), 9);
    }
}
