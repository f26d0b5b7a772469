//! HTTP surface of the score prediction service.

pub mod error;
pub mod metrics;
pub mod pages;
pub mod routes;

pub use error::*;
pub use metrics::*;
pub use routes::*;
