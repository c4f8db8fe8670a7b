//! Backtest Selector
//!
//! Holds out the last `horizon` points, forecasts them with every catalog
//! entry fitted on the rest, and keeps the entry with the lowest MSE.
//! A candidate that fails is recorded and skipped; ties go to the entry
//! registered first.

use algorithm_core::utils::metrics::mse;
use forecast_spi::{
    BacktestOutcome, CandidateReport, ForecastError, Horizon, ModelCatalog, ModelInstance,
    ModelSelector, ModelSpec, Result, Series,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::forecaster::SingleModelForecaster;

/// One candidate's result; the instance is kept only when it scored.
struct Evaluation {
    report: CandidateReport,
    instance: Option<ModelInstance>,
}

/// Holdout backtest over an ordered model catalog
pub struct BacktestSelector<'a> {
    catalog: &'a dyn ModelCatalog,
    forecaster: SingleModelForecaster,
    parallel: bool,
}

impl<'a> BacktestSelector<'a> {
    pub fn new(catalog: &'a dyn ModelCatalog) -> Self {
        Self {
            catalog,
            forecaster: SingleModelForecaster::default(),
            parallel: false,
        }
    }

    /// Use a specific forecaster (and with it, its series adapter)
    pub fn with_forecaster(mut self, forecaster: SingleModelForecaster) -> Self {
        self.forecaster = forecaster;
        self
    }

    /// Score candidates on the rayon pool instead of sequentially
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Fit one candidate on `train` and score it against `holdout`.
    ///
    /// Model failures are isolated into the report; internal errors are not.
    fn evaluate(
        &self,
        spec: &ModelSpec,
        train: &[f64],
        holdout: &[f64],
        horizon: Horizon,
    ) -> Result<Evaluation> {
        let attempt = self.catalog.instantiate(spec).and_then(|mut instance| {
            let predictions = self.forecaster.forecast(train, horizon, &mut instance)?;
            Ok((instance, predictions))
        });

        let (instance, predictions) = match attempt {
            Ok(fitted) => fitted,
            Err(e @ ForecastError::ForecastFailed { .. }) => {
                warn!(model = %spec.kind, error = %e, "candidate failed, excluded from selection");
                return Ok(Evaluation {
                    report: CandidateReport::failed(spec.kind, e.to_string()),
                    instance: None,
                });
            }
            Err(e) => return Err(e),
        };

        if predictions.len() != holdout.len() {
            return Err(ForecastError::Internal(format!(
                "{} produced {} predictions for a holdout of {}",
                spec.kind,
                predictions.len(),
                holdout.len()
            )));
        }

        let score = mse(holdout, &predictions);
        if !score.is_finite() {
            warn!(model = %spec.kind, "candidate produced a non-finite holdout error");
            return Ok(Evaluation {
                report: CandidateReport::failed(spec.kind, "non-finite holdout error"),
                instance: None,
            });
        }

        debug!(model = %spec.kind, mse = score, "candidate scored");
        Ok(Evaluation {
            report: CandidateReport::scored(spec.kind, score),
            instance: Some(instance),
        })
    }

    fn evaluate_all(
        &self,
        train: &[f64],
        holdout: &[f64],
        horizon: Horizon,
    ) -> Result<Vec<Evaluation>> {
        let specs = self.catalog.list_specs();
        // Results stay in catalog order either way; selection happens after.
        if self.parallel {
            specs
                .par_iter()
                .map(|spec| self.evaluate(spec, train, holdout, horizon))
                .collect()
        } else {
            specs
                .iter()
                .map(|spec| self.evaluate(spec, train, holdout, horizon))
                .collect()
        }
    }
}

/// Index of the first candidate with the strictly lowest score.
fn champion_index(reports: &[CandidateReport]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, report) in reports.iter().enumerate() {
        if let Some(score) = report.mse {
            if best.map_or(true, |(_, b)| score < b) {
                best = Some((i, score));
            }
        }
    }
    best.map(|(i, _)| i)
}

impl ModelSelector for BacktestSelector<'_> {
    fn select_best(
        &self,
        series: &Series,
        horizon: Horizon,
    ) -> Result<(ModelInstance, BacktestOutcome)> {
        let (train, holdout) = series.split_holdout(horizon)?;
        debug!(
            train_len = train.len(),
            holdout_len = holdout.len(),
            candidates = self.catalog.list_specs().len(),
            parallel = self.parallel,
            "running backtest"
        );

        let mut evaluations = self.evaluate_all(train, holdout, horizon)?;
        let reports: Vec<CandidateReport> =
            evaluations.iter().map(|e| e.report.clone()).collect();

        let index = champion_index(&reports).ok_or_else(|| ForecastError::ForecastFailed {
            model: "backtest".to_string(),
            reason: format!("all {} candidates failed", reports.len()),
        })?;

        let champion = evaluations
            .swap_remove(index)
            .instance
            .ok_or_else(|| ForecastError::Internal("scored candidate lost its instance".to_string()))?;
        let champion_mse = reports[index].score();

        info!(model = %champion.kind(), mse = champion_mse, "champion selected");

        let outcome = BacktestOutcome {
            train_len: train.len(),
            holdout_len: holdout.len(),
            candidates: reports,
            champion: champion.kind(),
            champion_mse,
        };
        Ok((champion, outcome))
    }
}
