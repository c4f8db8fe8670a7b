//! # server
//!
//! HTTP serving layer for the forecasting service.
//!
//! | Route | |
//! |---|---|
//! | `GET /` | liveness text |
//! | `GET /health` | version and model catalog |
//! | `POST /forecast` | `{model, horizon, series}` in, `{model, predictions}` out |
//!
//! Forecasts run on the blocking pool, at most [`ServerConfig::workers`] at a
//! time. Each forecast request writes one record to the optional access log.

pub mod access_log;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use forecast_facade::{ForecastConfig, ForecastService};
use tokio::sync::Semaphore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use access_log::AccessLog;
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    service: Arc<ForecastService<'static>>,
    permits: Arc<Semaphore>,
    access_log: Option<Arc<AccessLog>>,
    /// Limit on queueing plus computing one forecast
    timeout: Duration,
}

impl AppState {
    pub fn new(service: ForecastService<'static>, workers: usize) -> Self {
        Self {
            service: Arc::new(service),
            permits: Arc::new(Semaphore::new(workers.max(1))),
            access_log: None,
            timeout: ServerConfig::default().timeout,
        }
    }

    pub fn with_access_log(mut self, log: AccessLog) -> Self {
        self.access_log = Some(Arc::new(log));
        self
    }
}

/// Build the router with tracing and CORS middleware; forecasts that exceed
/// `timeout` answer 408.
pub fn router(mut state: AppState, timeout: Duration) -> Router {
    state.timeout = timeout;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route(routes::FORECAST_PATH, post(routes::forecast))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn run(config: ServerConfig) -> io::Result<()> {
    let service = ForecastService::new(ForecastConfig::from_env());
    let mut state = AppState::new(service, config.workers);
    if let Some(path) = &config.access_log {
        let log = AccessLog::open(path)?;
        info!(path = %log.path().display(), "writing access log");
        state = state.with_access_log(log);
    }

    let app = router(state, config.timeout);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "forecast server v{} listening on {} ({} workers)",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?,
        config.workers
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
