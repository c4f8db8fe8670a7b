//! Time series error types
//!
//! Defines the standardized error type for all algorithm operations.

use thiserror::Error;

/// Result type alias for algorithm operations
pub type Result<T> = std::result::Result<T, TsError>;

/// Errors that can occur while fitting or predicting with an algorithm
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TsError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model has not been fitted yet
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Parameter search found no admissible configuration
    #[error("Optimization failed to converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid time series data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TsError {
    /// Shorthand for an [`TsError::InvalidParameter`] error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Reject histories that are too short or contain non-finite values.
pub fn ensure_fit_data(data: &[f64], required: usize) -> Result<()> {
    if data.len() < required {
        return Err(TsError::InsufficientData {
            required,
            actual: data.len(),
        });
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(TsError::InvalidData(
            "Data contains NaN or infinite values".to_string(),
        ));
    }
    Ok(())
}
