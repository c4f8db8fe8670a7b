//! Model module containing forecast data structures.
//!
//! - [`ModelKind`] - explicit tag for each catalog algorithm
//! - [`ModelSpec`] / [`ModelInstance`] - configuration template vs. live model
//! - [`Series`] / [`Horizon`] - request values
//! - [`CanonicalFrame`] - adapter output
//! - [`ForecastResult`] / [`BacktestOutcome`] - pipeline results

mod backtest_outcome;
mod canonical_frame;
mod forecast_result;
mod hyperparameters;
mod model_instance;
mod model_kind;
mod model_spec;
mod series;

pub use backtest_outcome::{BacktestOutcome, CandidateReport};
pub use canonical_frame::CanonicalFrame;
pub use forecast_result::ForecastResult;
pub use hyperparameters::Hyperparameters;
pub use model_instance::ModelInstance;
pub use model_kind::ModelKind;
pub use model_spec::ModelSpec;
pub use series::{Horizon, Series};
