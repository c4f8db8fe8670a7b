//! Single-Model Forecaster

use forecast_spi::{ForecastError, Horizon, ModelInstance, Result};
use tracing::debug;

use crate::adapter::SeriesAdapter;

/// Fits one model on a series and returns its point forecast.
#[derive(Debug, Clone, Default)]
pub struct SingleModelForecaster {
    adapter: SeriesAdapter,
}

impl SingleModelForecaster {
    pub fn new(adapter: SeriesAdapter) -> Self {
        Self { adapter }
    }

    /// Fit `model` on the whole series and predict exactly `horizon` points.
    ///
    /// Fit and predict failures surface as `ForecastFailed`; a model that
    /// returns the wrong number of points is an internal error.
    pub fn forecast(
        &self,
        series: &[f64],
        horizon: Horizon,
        model: &mut ModelInstance,
    ) -> Result<Vec<f64>> {
        let frame = self.adapter.to_canonical(series)?;
        let kind = model.kind();

        model
            .fit(frame.values())
            .map_err(|e| ForecastError::forecast_failed(kind, e))?;
        let predictions = model
            .predict(horizon.get())
            .map_err(|e| ForecastError::forecast_failed(kind, e))?;

        if predictions.len() != horizon.get() {
            return Err(ForecastError::Internal(format!(
                "{} returned {} predictions for horizon {}",
                kind,
                predictions.len(),
                horizon
            )));
        }

        debug!(model = %kind, series_len = frame.len(), horizon = horizon.get(), "forecast produced");
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ModelRegistry;
    use forecast_spi::{ModelCatalog, ModelKind, ModelSpec};

    fn instance(name: &str) -> ModelInstance {
        let registry = ModelRegistry::global();
        registry
            .instantiate(registry.lookup_by_name(name).unwrap())
            .unwrap()
    }

    #[test]
    fn test_forecast_length_matches_horizon() {
        let forecaster = SingleModelForecaster::default();
        let series: Vec<f64> = (1..=30).map(|x| x as f64).collect();

        for h in [1, 5, 40] {
            let mut model = instance("autoarima");
            let predictions = forecaster
                .forecast(&series, Horizon::new(h).unwrap(), &mut model)
                .unwrap();
            assert_eq!(predictions.len(), h);
            assert!(model.is_fitted());
        }
    }

    #[test]
    fn test_single_observation_series() {
        let forecaster = SingleModelForecaster::default();
        let mut model = instance("naive");
        let predictions = forecaster
            .forecast(&[42.0], Horizon::new(3).unwrap(), &mut model)
            .unwrap();
        assert_eq!(predictions, vec![42.0; 3]);
    }

    #[test]
    fn test_model_failure_is_forecast_failed() {
        let forecaster = SingleModelForecaster::default();
        let mut model = instance("seasonalnaive");
        let err = forecaster
            .forecast(&[1.0, 2.0, 3.0], Horizon::new(2).unwrap(), &mut model)
            .unwrap_err();

        assert_eq!(
            err,
            ForecastError::ForecastFailed {
                model: "SeasonalNaive".to_string(),
                reason: "Insufficient data: need at least 7 points, got 3".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_series_is_invalid_input() {
        let forecaster = SingleModelForecaster::default();
        let registry = ModelRegistry::global();
        let mut model = registry
            .instantiate(&ModelSpec::new(ModelKind::Naive))
            .unwrap();
        let err = forecaster
            .forecast(&[], Horizon::new(1).unwrap(), &mut model)
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }
}
