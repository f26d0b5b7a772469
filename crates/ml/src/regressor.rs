// Regressor capability set shared by every model the evaluator can search over

use ndarray::{Array1, Array2};
use scorecast_models::{Hyperparameters, ParamValue, Result, ScorecastError};
use serde::{Deserialize, Serialize};

pub trait Regressor: Send {
    fn name(&self) -> &str;

    /// Applies hyperparameter overrides. Names the model does not know and
    /// out-of-range values are rejected without modifying `self`.
    fn configure(&mut self, params: &Hyperparameters) -> Result<()>;

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Current hyperparameters, in the shape `configure` accepts.
    fn params(&self) -> Hyperparameters;

    fn is_fitted(&self) -> bool;

    /// Fewest training rows `fit` accepts with the current hyperparameters.
    fn min_samples(&self) -> usize {
        1
    }
}

/// Coefficients of a fitted linear model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearFit {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, model: &str, x: &Array2<f64>) -> Result<Array1<f64>> {
        check_feature_count(model, x, self.coefficients.len())?;
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}

/// Named candidate models in insertion order.
#[derive(Debug, Clone)]
pub struct CandidateSet<R> {
    entries: Vec<(String, R)>,
}

impl<R> Default for CandidateSet<R> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<R> CandidateSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model; a name that is already present keeps its position and
    /// gets the new model.
    pub fn insert(&mut self, name: impl Into<String>, model: R) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = model;
        } else {
            self.entries.push((name, model));
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, model: R) -> Self {
        self.insert(name, model);
        self
    }

    pub fn get(&self, name: &str) -> Option<&R> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn remove(&mut self, name: &str) -> Option<R> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut R)> {
        self.entries.iter_mut().map(|(n, m)| (n.as_str(), m))
    }
}

impl<R> FromIterator<(String, R)> for CandidateSet<R> {
    fn from_iter<I: IntoIterator<Item = (String, R)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, model) in iter {
            set.insert(name, model);
        }
        set
    }
}

impl<R> IntoIterator for CandidateSet<R> {
    type Item = (String, R);
    type IntoIter = std::vec::IntoIter<(String, R)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

pub(crate) fn check_training_data(model: &str, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() == 0 {
        return Err(ScorecastError::data(format!("{model}: cannot fit on zero rows")));
    }
    if x.nrows() != y.len() {
        return Err(ScorecastError::data(format!(
            "{model}: feature table has {} rows but target has {}",
            x.nrows(),
            y.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(ScorecastError::data(format!("{model}: training data contains non-finite values")));
    }
    Ok(())
}

pub(crate) fn check_feature_count(model: &str, x: &Array2<f64>, expected: usize) -> Result<()> {
    if x.ncols() == expected {
        Ok(())
    } else {
        Err(ScorecastError::data(format!(
            "{model}: expected {expected} feature columns, got {}",
            x.ncols()
        )))
    }
}

pub(crate) fn not_fitted(model: &str) -> ScorecastError {
    ScorecastError::NotFitted { model: model.to_string() }
}

pub(crate) fn unknown_param(model: &str, name: &str) -> ScorecastError {
    ScorecastError::configuration(model, format!("unknown hyperparameter `{name}`"))
}

pub(crate) fn expect_f64(model: &str, name: &str, value: &ParamValue) -> Result<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScorecastError::configuration(model, format!("`{name}` expects a finite number, got {value}")))
}

pub(crate) fn expect_bool(model: &str, name: &str, value: &ParamValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ScorecastError::configuration(model, format!("`{name}` expects a boolean, got {value}")))
}

pub(crate) fn expect_positive_int(model: &str, name: &str, value: &ParamValue) -> Result<usize> {
    value
        .as_i64()
        .filter(|v| *v >= 1)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| {
            ScorecastError::configuration(model, format!("`{name}` expects a positive integer, got {value}"))
        })
}

pub(crate) fn expect_str<'a>(model: &str, name: &str, value: &'a ParamValue) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ScorecastError::configuration(model, format!("`{name}` expects a string, got {value}")))
}
