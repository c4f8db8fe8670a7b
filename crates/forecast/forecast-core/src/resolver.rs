//! Model Resolver
//!
//! Maps a requested model name to a fresh model instance:
//!
//! - automatic-selection aliases run the backtest; the champion's spec is
//!   then instantiated again, unfitted, so the final forecast refits it on
//!   the full series
//! - the fast alias returns the catalog's fast default
//! - anything else is looked up by kind name

use forecast_api::ForecastConfig;
use forecast_spi::{
    BacktestOutcome, Horizon, ModelCatalog, ModelInstance, ModelSelector, Result, Series,
};
use tracing::debug;

use crate::backtest::BacktestSelector;
use crate::forecaster::SingleModelForecaster;

/// How a name was resolved
#[derive(Debug)]
pub struct Resolution {
    /// Unfitted instance to forecast with
    pub instance: ModelInstance,
    /// Scoring table, when automatic selection ran
    pub backtest: Option<BacktestOutcome>,
}

/// Resolves model names against a catalog
pub struct Resolver<'a> {
    catalog: &'a dyn ModelCatalog,
    config: &'a ForecastConfig,
    forecaster: SingleModelForecaster,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a dyn ModelCatalog, config: &'a ForecastConfig) -> Self {
        Self {
            catalog,
            config,
            forecaster: SingleModelForecaster::default(),
        }
    }

    /// Forecaster used by the backtest
    pub fn with_forecaster(mut self, forecaster: SingleModelForecaster) -> Self {
        self.forecaster = forecaster;
        self
    }

    /// Resolve `name` to a model instance.
    pub fn resolve(&self, name: &str, series: &Series, horizon: Horizon) -> Result<ModelInstance> {
        Ok(self.resolve_detailed(name, series, horizon)?.instance)
    }

    /// Resolve `name`, keeping the backtest outcome when one ran.
    pub fn resolve_detailed(
        &self,
        name: &str,
        series: &Series,
        horizon: Horizon,
    ) -> Result<Resolution> {
        let normalized = name.to_lowercase();

        if self.config.is_auto_alias(&normalized) {
            debug!(requested = name, "running automatic model selection");
            let selector = BacktestSelector::new(self.catalog)
                .with_forecaster(self.forecaster.clone())
                .parallel(self.config.parallel_backtest);
            let (champion, outcome) = selector.select_best(series, horizon)?;

            let instance = self.catalog.instantiate(champion.spec())?;
            return Ok(Resolution {
                instance,
                backtest: Some(outcome),
            });
        }

        let spec = if self.config.is_fast_alias(&normalized) {
            self.catalog.fast_default()
        } else {
            self.catalog.lookup_by_name(&normalized)?
        };
        debug!(requested = name, model = %spec.kind, "model resolved by name");

        Ok(Resolution {
            instance: self.catalog.instantiate(spec)?,
            backtest: None,
        })
    }
}
