//! Forecast Consumer API
//!
//! Consumer configuration and boundary types for the forecasting service.
//!
//! This crate provides:
//! - [`ForecastConfig`]: model-name aliases and backtest options
//! - [`ForecastRequest`] parsing and the [`ForecastResponse`] / [`ErrorResponse`]
//!   payloads
//! - [`telemetry`]: per-request log records and their parser
//! - Re-exports from SPI for convenience

pub mod request;
pub mod response;
pub mod telemetry;

pub use request::ForecastRequest;
pub use response::{ErrorResponse, ForecastResponse};
pub use telemetry::{ForecastTelemetry, RequestRecord};

// Re-export SPI types
pub use forecast_spi::{
    BacktestOutcome, CandidateReport, CanonicalFrame, ForecastError, ForecastResult, Horizon,
    Hyperparameters, ModelCatalog, ModelInstance, ModelKind, ModelSelector, ModelSpec, Result,
    Series,
};

use serde::{Deserialize, Serialize};

/// Model names that trigger automatic selection, compared after lowercasing.
pub const DEFAULT_AUTO_ALIASES: [&str; 5] = [
    "cv",
    "cross_validation",
    "cross validation",
    "cross-validation",
    "",
];

/// Model name that selects the catalog's fast default.
pub const DEFAULT_FAST_ALIAS: &str = "fast";

/// Largest horizon accepted from a request.
pub const MAX_HORIZON: usize = 10_000;

/// Identifier given to every canonical frame.
pub const DEFAULT_SERIES_ID: &str = "unique_id";

/// Configuration for model resolution and backtesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Lowercase names that run automatic selection
    pub auto_aliases: Vec<String>,
    /// Lowercase name that returns the fast default model
    pub fast_alias: String,
    /// Score backtest candidates in parallel
    pub parallel_backtest: bool,
    /// Identifier assigned by the series adapter
    pub series_id: String,
    /// Requests with a longer horizon are rejected
    #[serde(default = "default_max_horizon")]
    pub max_horizon: usize,
}

fn default_max_horizon() -> usize {
    MAX_HORIZON
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            auto_aliases: DEFAULT_AUTO_ALIASES.iter().map(|s| s.to_string()).collect(),
            fast_alias: DEFAULT_FAST_ALIAS.to_string(),
            parallel_backtest: false,
            series_id: DEFAULT_SERIES_ID.to_string(),
            max_horizon: MAX_HORIZON,
        }
    }
}

impl ForecastConfig {
    /// Defaults, with `FORECAST_PARALLEL_BACKTEST` read from the environment.
    pub fn from_env() -> Self {
        let parallel_backtest = std::env::var("FORECAST_PARALLEL_BACKTEST")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::default().parallel_backtest(parallel_backtest)
    }

    /// Enable or disable the parallel backtest
    pub fn parallel_backtest(mut self, enabled: bool) -> Self {
        self.parallel_backtest = enabled;
        self
    }

    /// Replace the fast alias
    pub fn fast_alias(mut self, alias: impl Into<String>) -> Self {
        self.fast_alias = alias.into().to_lowercase();
        self
    }

    /// Replace the horizon limit
    pub fn max_horizon(mut self, max_horizon: usize) -> Self {
        self.max_horizon = max_horizon;
        self
    }

    /// Reject horizons above [`ForecastConfig::max_horizon`].
    pub fn check_horizon(&self, horizon: Horizon) -> Result<()> {
        if horizon.get() > self.max_horizon {
            return Err(ForecastError::InvalidInput(format!(
                "horizon {} exceeds the limit of {}",
                horizon, self.max_horizon
            )));
        }
        Ok(())
    }

    /// Whether an already-lowercased name requests automatic selection.
    pub fn is_auto_alias(&self, normalized: &str) -> bool {
        self.auto_aliases.iter().any(|a| a == normalized)
    }

    /// Whether an already-lowercased name requests the fast default.
    pub fn is_fast_alias(&self, normalized: &str) -> bool {
        self.fast_alias == normalized
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
