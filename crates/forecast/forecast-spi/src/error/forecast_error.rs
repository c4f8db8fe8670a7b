//! Forecast error types

use algorithm_spi::TsError;
use thiserror::Error;

use crate::model::ModelKind;

/// Errors that can occur while resolving a model or producing a forecast
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Malformed, missing or wrong-typed request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No registered model matches the requested name
    #[error("Unknown model: '{0}'")]
    UnknownModel(String),

    /// Series too short to hold out `horizon` points
    #[error("Insufficient data: series of length {series_len} cannot be backtested with horizon {horizon}")]
    InsufficientData { series_len: usize, horizon: usize },

    /// A specific model's fit or predict step failed
    #[error("Model '{model}' failed: {reason}")]
    ForecastFailed { model: String, reason: String },

    /// Invariant violation; always a defect
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ForecastError {
    /// Wrap an algorithm failure with the model it came from.
    pub fn forecast_failed(kind: ModelKind, cause: TsError) -> Self {
        Self::ForecastFailed {
            model: kind.name().to_string(),
            reason: cause.to_string(),
        }
    }

    /// Stable snake_case code for wire payloads and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::UnknownModel(_) => "unknown_model",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::ForecastFailed { .. } => "forecast_failed",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the same request could succeed by picking another model.
    ///
    /// Only model failures qualify; every other kind needs corrected input
    /// or is a defect.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ForecastFailed { .. })
    }

    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::UnknownModel(_) | Self::InsufficientData { .. }
        )
    }
}
