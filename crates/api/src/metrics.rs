// Prometheus counters for the prediction endpoints

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    predictions: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let predictions = IntCounterVec::new(
            Opts::new("scorecast_predictions_total", "Prediction requests by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions.clone()))?;
        Ok(Self {
            registry,
            predictions,
        })
    }

    /// Counts one request; `outcome` is `ok`, `rejected`, `unavailable` or `failed`.
    pub fn record(&self, outcome: &str) {
        self.predictions.with_label_values(&[outcome]).inc();
    }

    pub fn count(&self, outcome: &str) -> u64 {
        self.predictions.with_label_values(&[outcome]).get()
    }

    /// Text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_outcome() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record("ok");
        metrics.record("ok");
        metrics.record("rejected");

        assert_eq!(metrics.count("ok"), 2);
        let text = metrics.render().unwrap();
        assert!(text.contains("scorecast_predictions_total{outcome=\"ok\"} 2"));
    }
}
