//! Forecast Core
//!
//! Core implementations of the forecasting service:
//!
//! - [`registry`]: the ordered model catalog and predictor factory
//! - [`adapter`]: raw series to canonical frame
//! - [`forecaster`]: fit one model, predict the horizon
//! - [`backtest`]: holdout scoring of every catalog entry and champion choice
//! - [`resolver`]: model name to model instance
//! - [`service`]: the request pipeline tying them together

pub mod adapter;
pub mod backtest;
pub mod forecaster;
pub mod registry;
pub mod resolver;
pub mod service;

// Re-export SPI traits for implementations
pub use forecast_spi::{ForecastError, ModelCatalog, ModelSelector, Result};

// Re-export main types
pub use adapter::SeriesAdapter;
pub use backtest::BacktestSelector;
pub use forecaster::SingleModelForecaster;
pub use registry::{default_specs, ModelRegistry};
pub use resolver::{Resolution, Resolver};
pub use service::{ForecastOutcome, ForecastService};
