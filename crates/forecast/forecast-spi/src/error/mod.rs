//! Error module containing the forecast error taxonomy and result alias

mod forecast_error;

pub use forecast_error::ForecastError;

/// Result type for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;
