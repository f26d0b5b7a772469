// Feature engineering: student records to a dense design matrix

use ndarray::{Array2, Axis};
use scorecast_models::{Result, ScorecastError, StudentRecord, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use serde::{Deserialize, Serialize};

/// One-hot encodes the categorical columns and standardises the numeric ones.
///
/// The first (alphabetical) category of every column is dropped so that the
/// encoded columns stay linearly independent of the intercept. Categories not
/// seen during `fit` encode as all zeros, the same as the dropped one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preprocessor {
    categories: Vec<Vec<String>>,
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Preprocessor {
    pub fn fit(records: &[StudentRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(ScorecastError::data("cannot fit a preprocessor on zero records"));
        }
        for record in records {
            record.validate()?;
        }

        let categories = (0..CATEGORICAL_FEATURES.len())
            .map(|col| {
                let mut values: Vec<String> = records
                    .iter()
                    .map(|r| r.categorical_values()[col].to_string())
                    .collect();
                values.sort_unstable();
                values.dedup();
                values
            })
            .collect();

        let numeric = Array2::from_shape_fn((records.len(), NUMERIC_FEATURES.len()), |(i, j)| {
            records[i].numeric_values()[j]
        });
        let means = numeric
            .mean_axis(Axis(0))
            .ok_or_else(|| ScorecastError::data("cannot compute means of an empty table"))?;
        let scales = numeric
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        Ok(Self {
            categories,
            means: means.to_vec(),
            scales: scales.to_vec(),
        })
    }

    /// Width of the matrix `transform` produces.
    pub fn n_features(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.len().saturating_sub(1))
            .sum::<usize>()
            + self.means.len()
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.n_features());
        for (col, values) in CATEGORICAL_FEATURES.iter().zip(&self.categories) {
            names.extend(values.iter().skip(1).map(|v| format!("{col}_{v}")));
        }
        names.extend(NUMERIC_FEATURES.iter().map(|n| (*n).to_string()));
        names
    }

    pub fn transform(&self, records: &[StudentRecord]) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((records.len(), self.n_features()));
        for (mut row, record) in out.outer_iter_mut().zip(records) {
            record.validate()?;
            let mut offset = 0;
            for (values, value) in self.categories.iter().zip(record.categorical_values()) {
                if let Some(pos) = values.iter().skip(1).position(|v| v == value) {
                    row[offset + pos] = 1.0;
                }
                offset += values.len().saturating_sub(1);
            }
            for (j, value) in record.numeric_values().into_iter().enumerate() {
                row[offset + j] = (value - self.means[j]) / self.scales[j];
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str, lunch: &str, reading: f64, writing: f64) -> StudentRecord {
        StudentRecord {
            gender: gender.to_string(),
            race_ethnicity: "group A".to_string(),
            parental_level_of_education: "high school".to_string(),
            lunch: lunch.to_string(),
            test_preparation_course: "none".to_string(),
            reading_score: reading,
            writing_score: writing,
        }
    }

    #[test]
    fn encodes_categories_with_first_dropped() {
        let records = vec![
            record("female", "standard", 60.0, 70.0),
            record("male", "free/reduced", 80.0, 70.0),
        ];
        let pre = Preprocessor::fit(&records).unwrap();

        // gender: female|male, lunch: free/reduced|standard, three single-valued columns
        assert_eq!(pre.n_features(), 4);
        assert_eq!(
            pre.feature_names(),
            vec!["gender_male", "lunch_standard", "reading_score", "writing_score"]
        );

        let x = pre.transform(&records).unwrap();
        assert_eq!(x.row(0).to_vec(), vec![0.0, 1.0, -1.0, 0.0]);
        assert_eq!(x.row(1).to_vec(), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn unseen_category_encodes_as_zeros() {
        let pre = Preprocessor::fit(&[
            record("female", "standard", 50.0, 50.0),
            record("male", "standard", 70.0, 90.0),
        ])
        .unwrap();

        let x = pre.transform(&[record("other", "standard", 60.0, 70.0)]).unwrap();
        assert_eq!(x.row(0).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn fit_rejects_empty_and_invalid_input() {
        assert!(Preprocessor::fit(&[]).is_err());
        assert!(Preprocessor::fit(&[record("", "standard", 1.0, 1.0)]).is_err());
    }
}
