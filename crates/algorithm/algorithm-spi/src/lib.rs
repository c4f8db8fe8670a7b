//! Algorithm Service Provider Interface
//!
//! Defines the contract every forecasting algorithm in the catalog implements:
//!
//! - [`Predictor`]: fit on a history, then produce point forecasts
//! - [`TsError`]: standardized error type for all algorithm operations
//! - [`Result`]: convenient result type alias

pub mod contract;
pub mod error;

pub use contract::Predictor;
pub use error::{ensure_fit_data, Result, TsError};
