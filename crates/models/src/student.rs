use serde::{Deserialize, Serialize};
use crate::error::{Result, ScorecastError};

/// Names of the categorical inputs, in encoding order.
pub const CATEGORICAL_FEATURES: [&str; 5] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
];

/// Names of the numeric inputs, in encoding order.
pub const NUMERIC_FEATURES: [&str; 2] = ["reading_score", "writing_score"];

/// Target column of the training data.
pub const TARGET_COLUMN: &str = "math_score";

/// Feature values for one student, as submitted for prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    pub gender: String,
    pub race_ethnicity: String,
    pub parental_level_of_education: String,
    pub lunch: String,
    pub test_preparation_course: String,
    pub reading_score: f64,
    pub writing_score: f64,
}

impl StudentRecord {
    pub fn categorical_values(&self) -> [&str; 5] {
        [
            &self.gender,
            &self.race_ethnicity,
            &self.parental_level_of_education,
            &self.lunch,
            &self.test_preparation_course,
        ]
    }

    pub const fn numeric_values(&self) -> [f64; 2] {
        [self.reading_score, self.writing_score]
    }

    /// Rejects blank categories and non-finite scores.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in CATEGORICAL_FEATURES.iter().zip(self.categorical_values()) {
            if value.trim().is_empty() {
                return Err(ScorecastError::data(format!("{name} must not be empty")));
            }
        }
        for (name, value) in NUMERIC_FEATURES.iter().zip(self.numeric_values()) {
            if !value.is_finite() {
                return Err(ScorecastError::data(format!("{name} must be a finite number, got {value}")));
            }
        }
        Ok(())
    }
}

/// Student features plus the observed math score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingRecord {
    pub student: StudentRecord,
    pub math_score: f64,
}
