// Training data loading and splitting

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use scorecast_models::{
    Result, ScorecastError, StudentRecord, TrainingRecord, CATEGORICAL_FEATURES, NUMERIC_FEATURES,
    TARGET_COLUMN,
};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvRow {
    gender: String,
    race_ethnicity: String,
    parental_level_of_education: String,
    lunch: String,
    test_preparation_course: String,
    math_score: f64,
    reading_score: f64,
    writing_score: f64,
}

impl From<CsvRow> for TrainingRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            student: StudentRecord {
                gender: row.gender,
                race_ethnicity: row.race_ethnicity,
                parental_level_of_education: row.parental_level_of_education,
                lunch: row.lunch,
                test_preparation_course: row.test_preparation_course,
                reading_score: row.reading_score,
                writing_score: row.writing_score,
            },
            math_score: row.math_score,
        }
    }
}

/// Reads the student performance CSV. Columns are matched by header name.
pub fn load_training_csv(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScorecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_training_csv(file)?;
    info!("📥 Loaded {} training records from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_training_csv<R: Read>(reader: R) -> Result<Vec<TrainingRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = CATEGORICAL_FEATURES
        .iter()
        .chain(&NUMERIC_FEATURES)
        .chain(std::iter::once(&TARGET_COLUMN))
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(ScorecastError::data(format!(
            "training data is missing column(s): {}",
            missing.join(", ")
        )));
    }
    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        records.push(TrainingRecord::from(row?));
    }
    Ok(records)
}

/// Shuffles with `seed` and moves `test_ratio` of the records to the test side.
///
/// Both sides get at least one record when there are two or more.
pub fn train_test_split(
    records: &[TrainingRecord],
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<TrainingRecord>, Vec<TrainingRecord>)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ScorecastError::Config(format!(
            "test_ratio must be within (0, 1), got {test_ratio}"
        )));
    }
    if records.len() < 2 {
        return Err(ScorecastError::data(format!(
            "need at least 2 records to split, got {}",
            records.len()
        )));
    }

    let mut shuffled = records.to_vec();
    shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_test = ((records.len() as f64 * test_ratio).round() as usize).clamp(1, records.len() - 1);
    let train = shuffled.split_off(n_test);
    Ok((train, shuffled))
}

pub fn students(records: &[TrainingRecord]) -> Vec<StudentRecord> {
    records.iter().map(|r| r.student.clone()).collect()
}

pub fn targets(records: &[TrainingRecord]) -> Array1<f64> {
    records.iter().map(|r| r.math_score).collect()
}
