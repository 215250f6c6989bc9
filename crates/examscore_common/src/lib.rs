//! Examscore Common - prediction core shared by the daemon and its tests
//!
//! Holds the feature table, form parsing and range validation, the fitted
//! artifact capabilities (scaler + regressor), and the orchestrator that
//! ties them together.

pub mod artifacts;
pub mod error;
pub mod features;
pub mod predictor;
pub mod request;

pub use artifacts::*;
pub use error::*;
pub use features::*;
pub use predictor::*;
pub use request::*;
