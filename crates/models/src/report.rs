use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::params::Hyperparameters;

/// Outcome of evaluating one candidate model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelEvaluation {
    pub model_name: String,
    /// R² on the held-out test split. This is the score models are compared on.
    pub test_score: f64,
    /// R² on the training split, kept for diagnostics only.
    pub train_score: f64,
    /// Mean cross-validated R² of the selected configuration.
    pub cv_score: f64,
    pub best_params: Hyperparameters,
}

/// Per-model scores, in the order the candidates were evaluated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    entries: Vec<ModelEvaluation>,
}

impl EvaluationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an evaluation, replacing any earlier entry for the same model.
    pub fn push(&mut self, evaluation: ModelEvaluation) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.model_name == evaluation.model_name)
        {
            *existing = evaluation;
        } else {
            self.entries.push(evaluation);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, model_name: &str) -> Option<&ModelEvaluation> {
        self.entries.iter().find(|e| e.model_name == model_name)
    }

    /// Test-split R² for `model_name`.
    pub fn test_score(&self, model_name: &str) -> Option<f64> {
        self.get(model_name).map(|e| e.test_score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEvaluation> {
        self.entries.iter()
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.model_name.as_str())
    }

    /// Model name to test-split R².
    pub fn test_scores(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.model_name.clone(), e.test_score))
            .collect()
    }

    /// Entry with the highest test score; on ties the earliest one wins.
    pub fn best(&self) -> Option<&ModelEvaluation> {
        self.entries.iter().fold(None, |best, e| match best {
            Some(b) if b.test_score >= e.test_score => Some(b),
            _ => Some(e),
        })
    }
}

impl IntoIterator for EvaluationReport {
    type Item = ModelEvaluation;
    type IntoIter = std::vec::IntoIter<ModelEvaluation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
