//! Forecast Facade
//!
//! High-level API for the forecasting service. Re-exports all public types
//! from the forecast stack for convenient usage.
//!
//! ```rust
//! use forecast_facade::prelude::*;
//!
//! let service = ForecastService::new(ForecastConfig::default());
//! let request = ForecastRequest::from_slice(
//!     br#"{"model": "fast", "horizon": 2, "series": [1, 2, 3, 4, 5]}"#,
//! )
//! .unwrap();
//! let outcome = service.forecast(&request).unwrap();
//! assert_eq!(outcome.result.model, "AutoARIMA");
//! assert_eq!(outcome.result.predictions.len(), 2);
//! ```

// Re-export everything from API (which includes SPI)
pub use forecast_api::*;

// Re-export core modules for direct access
pub use forecast_core::{adapter, backtest, forecaster, registry, resolver, service};

// Re-export core types at root
pub use forecast_core::{
    default_specs, BacktestSelector, ForecastOutcome, ForecastService, ModelRegistry, Resolution,
    Resolver, SeriesAdapter, SingleModelForecaster,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use forecast_api::{
        ErrorResponse, ForecastConfig, ForecastRequest, ForecastResponse, ForecastTelemetry,
        RequestRecord,
    };
    pub use forecast_core::{BacktestSelector, ForecastService, ModelRegistry, Resolver};
    pub use forecast_spi::{
        BacktestOutcome, ForecastError, ForecastResult, Horizon, ModelCatalog, ModelKind,
        ModelSelector, ModelSpec, Series,
    };
}
