//! Forecast errors as HTTP responses

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use forecast_facade::{ErrorResponse, ForecastError};

/// Error code of a request that ran out of time.
pub const TIMEOUT_CODE: &str = "timeout";

/// A failed request leaving through the HTTP boundary
#[derive(Debug)]
pub enum ApiError {
    Forecast(ForecastError),
    /// The forecast did not finish within the request timeout
    Timeout(Duration),
}

impl ApiError {
    /// Client mistakes are 400, timeouts 408, everything else is 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forecast(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Forecast(e) => e.code(),
            ApiError::Timeout(_) => TIMEOUT_CODE,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Forecast(e) => ErrorResponse::from(e),
            ApiError::Timeout(limit) => ErrorResponse {
                error: format!("forecast did not finish within {:?}", limit),
                kind: TIMEOUT_CODE.to_string(),
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Forecast(e) => write!(f, "{}", e),
            ApiError::Timeout(limit) => write!(f, "forecast timed out after {:?}", limit),
        }
    }
}

impl From<ForecastError> for ApiError {
    fn from(error: ForecastError) -> Self {
        Self::Forecast(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
