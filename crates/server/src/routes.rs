//! API route handlers

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use forecast_facade::{
    ForecastError, ForecastRequest, ForecastResponse, ForecastResult, ForecastTelemetry,
    RequestRecord,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

pub const FORECAST_PATH: &str = "/forecast";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Catalog kind names in registry order
    pub models: Vec<String>,
}

pub async fn index() -> &'static str {
    "Hello, World!"
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = state
        .service
        .catalog()
        .list_specs()
        .iter()
        .map(|spec| spec.kind.name().to_string())
        .collect();

    Json(HealthResponse {
        status: "alive",
        version: env!("CARGO_PKG_VERSION"),
        models,
    })
}

/// `POST /forecast`: every request, good, bad or timed out, leaves one access record.
pub async fn forecast(State(state): State<AppState>, body: Bytes) -> Response {
    let timestamp = chrono::Local::now().naive_local();
    let started = Instant::now();

    let (result, telemetry) = match ForecastRequest::from_slice(&body) {
        Ok(request) => compute(&state, request).await,
        Err(err) => (Err(err.into()), ForecastTelemetry::rejected()),
    };

    let record = RequestRecord::forecast(
        timestamp,
        "POST",
        FORECAST_PATH,
        started.elapsed().as_secs_f64(),
        &telemetry,
    );
    state.record(&record);

    match result {
        Ok(result) => Json(ForecastResponse::from(result)).into_response(),
        Err(err) => {
            warn!(code = err.code(), "forecast request failed: {}", err);
            err.into_response()
        }
    }
}

/// Run the pipeline on the blocking pool under a worker permit, giving up
/// after the state's timeout. A timed-out computation keeps its permit until
/// the blocking task returns.
async fn compute(
    state: &AppState,
    request: ForecastRequest,
) -> (Result<ForecastResult, ApiError>, ForecastTelemetry) {
    let failed = ForecastTelemetry::for_request(&request);
    let limit = state.timeout;

    let run = async {
        let permit = Arc::clone(&state.permits)
            .acquire_owned()
            .await
            .map_err(|_| ForecastError::Internal("worker pool is closed".to_string()))?;

        let service = Arc::clone(&state.service);
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            service.forecast(&request)
        })
        .await
        .map_err(|join| ForecastError::Internal(format!("forecast task failed: {}", join)))?
    };

    match tokio::time::timeout(limit, run).await {
        Ok(Ok(outcome)) => (Ok(outcome.result), outcome.telemetry),
        Ok(Err(err)) => (Err(err.into()), failed),
        Err(_) => {
            warn!(?limit, "forecast timed out, computation continues in the background");
            (Err(ApiError::Timeout(limit)), failed)
        }
    }
}

impl AppState {
    fn record(&self, record: &RequestRecord) {
        info!(target: "access", "{}", record);
        if let Some(log) = &self.access_log {
            if let Err(e) = log.write(record) {
                warn!(path = %log.path().display(), "failed to write access log: {}", e);
            }
        }
    }
}
