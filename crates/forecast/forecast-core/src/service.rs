//! Request pipeline: validate, resolve, forecast.

use std::time::Instant;

use forecast_api::{ForecastConfig, ForecastRequest, ForecastTelemetry};
use forecast_spi::{ForecastError, ForecastResult, ModelCatalog, Result};
use tracing::{info, instrument};

use crate::adapter::SeriesAdapter;
use crate::forecaster::SingleModelForecaster;
use crate::registry::ModelRegistry;
use crate::resolver::Resolver;

/// A successful forecast with the fields surfaced for telemetry
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub result: ForecastResult,
    pub telemetry: ForecastTelemetry,
}

/// End-to-end forecasting over a model catalog
pub struct ForecastService<'a> {
    catalog: &'a dyn ModelCatalog,
    config: ForecastConfig,
    forecaster: SingleModelForecaster,
}

impl ForecastService<'static> {
    /// Service over the process-wide default catalog.
    pub fn new(config: ForecastConfig) -> Self {
        Self::with_catalog(ModelRegistry::global(), config)
    }
}

impl<'a> ForecastService<'a> {
    pub fn with_catalog(catalog: &'a dyn ModelCatalog, config: ForecastConfig) -> Self {
        let forecaster = SingleModelForecaster::new(SeriesAdapter::new(config.series_id.clone()));
        Self {
            catalog,
            config,
            forecaster,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn ModelCatalog {
        self.catalog
    }

    /// Run one request start to finish.
    ///
    /// Input problems, including a horizon above the configured limit, are
    /// reported before any model is fitted.
    #[instrument(skip_all, fields(model = %request.model, horizon = request.horizon.get(), series_len = request.series.len()))]
    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastOutcome> {
        let started = Instant::now();

        if request.series.is_empty() {
            return Err(ForecastError::InvalidInput(
                "series must contain at least one observation".to_string(),
            ));
        }
        self.config.check_horizon(request.horizon)?;

        let resolution = Resolver::new(self.catalog, &self.config)
            .with_forecaster(self.forecaster.clone())
            .resolve_detailed(&request.model, &request.series, request.horizon)?;
        let mut instance = resolution.instance;

        let predictions =
            self.forecaster
                .forecast(request.series.values(), request.horizon, &mut instance)?;
        let model = instance.kind().name().to_string();

        info!(
            response_model = %model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "forecast complete"
        );

        Ok(ForecastOutcome {
            telemetry: ForecastTelemetry {
                series_len: request.series.len(),
                horizon: request.horizon.get(),
                requested_model: request.model.clone(),
                response_model: Some(model.clone()),
                backtest: resolution.backtest,
            },
            result: ForecastResult { model, predictions },
        })
    }
}
