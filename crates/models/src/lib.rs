//! Domain types shared by the score prediction crates.

pub mod error;
pub mod params;
pub mod predictions;
pub mod report;
pub mod student;

pub use error::*;
pub use params::*;
pub use predictions::*;
pub use report::*;
pub use student::*;
