//! Outbound payloads.

use serde::{Deserialize, Serialize};

use forecast_spi::{ForecastError, ForecastResult};

/// Successful forecast payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub model: String,
    pub predictions: Vec<f64>,
}

impl From<ForecastResult> for ForecastResponse {
    fn from(result: ForecastResult) -> Self {
        Self {
            model: result.model,
            predictions: result.predictions,
        }
    }
}

/// Failure payload; `kind` is the stable error code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&ForecastError> for ErrorResponse {
    fn from(error: &ForecastError) -> Self {
        Self {
            error: error.to_string(),
            kind: error.code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_response_json() {
        let response = ForecastResponse::from(ForecastResult {
            model: "Naive".to_string(),
            predictions: vec![1.0, 1.0],
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "Naive", "predictions": [1.0, 1.0]})
        );
    }

    #[test]
    fn test_error_response_carries_code() {
        let response = ErrorResponse::from(&ForecastError::UnknownModel("nope".to_string()));
        assert_eq!(response.kind, "unknown_model");
        assert_eq!(response.error, "Unknown model: 'nope'");
    }
}
