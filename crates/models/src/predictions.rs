use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A predicted math score returned to API clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScorePrediction {
    pub id: Uuid,
    pub model_name: String,
    pub score: f64,
    pub predicted_at: DateTime<Utc>,
}

impl ScorePrediction {
    pub fn new(model_name: impl Into<String>, score: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            model_name: model_name.into(),
            score,
            predicted_at: Utc::now(),
        }
    }

    /// Score rounded to two decimals, as shown on the form page.
    pub fn rounded(&self) -> f64 {
        (self.score * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        let prediction = ScorePrediction::new("Linear Regression", 71.23456);
        assert!((prediction.rounded() - 71.23).abs() < 1e-9);
        assert!(prediction.predicted_at <= Utc::now());
    }
}
