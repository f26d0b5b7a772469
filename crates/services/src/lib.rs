//! Training and prediction pipelines.

pub mod dataset;
pub mod predictor;
pub mod trainer;

pub use dataset::*;
pub use predictor::*;
pub use trainer::*;
