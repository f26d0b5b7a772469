// Regression metrics

use ndarray::Array1;
use scorecast_models::{Result, ScorecastError};

fn check_pair(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<()> {
    if y_true.is_empty() {
        return Err(ScorecastError::data("cannot score an empty target"));
    }
    if y_true.len() != y_pred.len() {
        return Err(ScorecastError::data(format!(
            "target has {} values but prediction has {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

/// Coefficient of determination.
///
/// A constant target scores 1.0 when predicted exactly and 0.0 otherwise,
/// so the result is always finite for finite inputs and never above 1.0.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_pair(y_true, y_pred)?;
    let mean = y_true.mean().unwrap_or_default();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_pair(y_true, y_pred)?;
    Ok((y_true - y_pred).mapv(|e| e * e).mean().unwrap_or_default())
}

pub fn root_mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    mean_squared_error(y_true, y_pred).map(f64::sqrt)
}

pub fn mean_absolute_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_pair(y_true, y_pred)?;
    Ok((y_true - y_pred).mapv(f64::abs).mean().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn perfect_prediction_scores_one() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(r2_score(&y, &y).unwrap(), 1.0);
    }

    #[test]
    fn mean_prediction_scores_zero() {
        let y = array![1.0, 2.0, 3.0];
        let mean = array![2.0, 2.0, 2.0];
        assert!(r2_score(&y, &mean).unwrap().abs() < 1e-12);
    }

    #[test]
    fn poor_prediction_is_negative() {
        let y = array![1.0, 2.0, 3.0];
        let bad = array![3.0, 2.0, 1.0];
        assert!((r2_score(&y, &bad).unwrap() + 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_target_is_finite() {
        let y = array![4.0, 4.0];
        assert_eq!(r2_score(&y, &array![4.0, 4.0]).unwrap(), 1.0);
        assert_eq!(r2_score(&y, &array![3.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn length_mismatch_is_a_data_error() {
        let err = r2_score(&array![1.0, 2.0], &array![1.0]).unwrap_err();
        assert!(matches!(err, ScorecastError::Data { .. }));
        let empty = Array1::<f64>::zeros(0);
        assert!(r2_score(&empty, &empty).is_err());
    }

    #[test]
    fn error_metrics() {
        let y = array![1.0, 2.0, 3.0, 4.0];
        let p = array![2.0, 2.0, 2.0, 4.0];
        assert!((mean_absolute_error(&y, &p).unwrap() - 0.5).abs() < 1e-12);
        assert!((mean_squared_error(&y, &p).unwrap() - 0.5).abs() < 1e-12);
        assert!((root_mean_squared_error(&y, &p).unwrap() - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn r2_never_exceeds_one(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..50)
        ) {
            let y_true: Array1<f64> = pairs.iter().map(|p| p.0).collect();
            let y_pred: Array1<f64> = pairs.iter().map(|p| p.1).collect();
            let score = r2_score(&y_true, &y_pred).unwrap();
            prop_assert!(score.is_finite());
            prop_assert!(score <= 1.0);
        }
    }
}
