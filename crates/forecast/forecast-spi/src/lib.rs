//! Forecast Service Provider Interface
//!
//! Defines the contracts and data model of the forecasting service:
//! - [`ModelCatalog`]: ordered catalog of model specs
//! - [`ModelSelector`]: automatic champion selection
//! - [`ForecastError`]: the error taxonomy shared by every layer

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ModelCatalog, ModelSelector};
pub use error::{ForecastError, Result};
pub use model::{
    BacktestOutcome, CandidateReport, CanonicalFrame, ForecastResult, Horizon, Hyperparameters,
    ModelInstance, ModelKind, ModelSpec, Series,
};
