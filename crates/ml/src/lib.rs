//! Regressors, cross-validated grid search, model evaluation and persistence.

pub mod baseline;
pub mod cv;
pub mod elastic_net;
pub mod evaluation;
pub mod features;
pub mod grid_search;
pub mod knn;
pub mod linear;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod regressor;

pub use baseline::*;
pub use cv::*;
pub use elastic_net::*;
pub use evaluation::*;
pub use features::*;
pub use grid_search::*;
pub use knn::*;
pub use linear::*;
pub use metrics::*;
pub use models::*;
pub use persistence::*;
pub use regressor::*;
