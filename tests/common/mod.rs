// Shared fixtures for the integration tests
#![allow(dead_code)]

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scorecast_models::{StudentRecord, TrainingRecord};

/// `y = 2x + noise` with `x` uniform in [0, 10) and noise uniform in [-noise, noise).
pub fn noisy_line(n: usize, noise: f64, seed: u64) -> (Array2<f64>, Array1<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let xs: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..10.0)).collect();
    let ys: Array1<f64> = xs
        .iter()
        .map(|x| 2.0 * x + rng.gen_range(-noise..noise))
        .collect();
    let x = Array2::from_shape_vec((n, 1), xs).unwrap();
    (x, ys)
}

/// Train/test halves of [`noisy_line`] drawn with different seeds.
pub fn line_split(noise: f64) -> (Array2<f64>, Array1<f64>, Array2<f64>, Array1<f64>) {
    let (x_train, y_train) = noisy_line(60, noise, 1);
    let (x_test, y_test) = noisy_line(20, noise, 2);
    (x_train, y_train, x_test, y_test)
}

pub fn student(gender: &str, lunch: &str, reading: f64, writing: f64) -> StudentRecord {
    StudentRecord {
        gender: gender.to_string(),
        race_ethnicity: "group B".to_string(),
        parental_level_of_education: "some college".to_string(),
        lunch: lunch.to_string(),
        test_preparation_course: "none".to_string(),
        reading_score: reading,
        writing_score: writing,
    }
}

/// Students whose math score is a noisy linear function of their other features.
pub fn synthetic_students(n: usize, seed: u64) -> Vec<TrainingRecord> {
    const ETHNICITIES: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
    const EDUCATION: [&str; 4] = ["high school", "some college", "bachelor's degree", "master's degree"];

    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let female = rng.gen_bool(0.5);
            let standard_lunch = rng.gen_bool(0.6);
            let prepared = rng.gen_bool(0.35);
            let reading: f64 = rng.gen_range(30.0..100.0);
            let writing: f64 = (reading + rng.gen_range(-10.0..10.0)).clamp(0.0, 100.0);
            let math = 0.6 * reading + 0.3 * writing
                + if female { -5.0 } else { 5.0 }
                + if standard_lunch { 4.0 } else { -4.0 }
                + if prepared { 2.0 } else { 0.0 }
                + rng.gen_range(-2.0..2.0);

            TrainingRecord {
                student: StudentRecord {
                    gender: if female { "female" } else { "male" }.to_string(),
                    race_ethnicity: ETHNICITIES[rng.gen_range(0..ETHNICITIES.len())].to_string(),
                    parental_level_of_education: EDUCATION[rng.gen_range(0..EDUCATION.len())].to_string(),
                    lunch: if standard_lunch { "standard" } else { "free/reduced" }.to_string(),
                    test_preparation_course: if prepared { "completed" } else { "none" }.to_string(),
                    reading_score: reading,
                    writing_score: writing,
                },
                math_score: math,
            }
        })
        .collect()
}
