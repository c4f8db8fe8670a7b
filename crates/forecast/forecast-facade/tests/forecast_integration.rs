//! Integration tests for the forecast stack
//!
//! Component contracts exercised through the facade.

use algorithm_core::utils::metrics::mse;
use forecast_facade::prelude::*;
use forecast_facade::SingleModelForecaster;

fn noisy_trend() -> Vec<f64> {
    (0..48)
        .map(|i| {
            let t = i as f64;
            30.0 + 0.7 * t + 4.0 * (t * 0.8).sin() + if i % 5 == 0 { 2.0 } else { -0.5 }
        })
        .collect()
}

/// Reference argmin over the catalog, computed without the selector.
fn independent_champion(registry: &ModelRegistry, values: &[f64], horizon: usize) -> ModelKind {
    let (train, holdout) = values.split_at(values.len() - horizon);
    let mut best: Option<(ModelKind, f64)> = None;

    for spec in registry.list_specs() {
        let mut instance = registry.instantiate(spec).unwrap();
        if instance.fit(train).is_err() {
            continue;
        }
        let Ok(predictions) = instance.predict(horizon) else {
            continue;
        };
        let score = mse(holdout, &predictions);
        if best.map_or(true, |(_, b)| score < b) {
            best = Some((spec.kind, score));
        }
    }

    best.unwrap().0
}

#[test]
fn test_resolve_by_kind_name_matches_kind() {
    let config = ForecastConfig::default();
    let resolver = Resolver::new(ModelRegistry::global(), &config);
    let series = Series::from(noisy_trend());
    let horizon = Horizon::new(4).unwrap();

    for kind in ModelKind::ALL {
        let upper = kind.name().to_uppercase();
        let instance = resolver.resolve(&upper, &series, horizon).unwrap();
        assert_eq!(instance.kind(), kind);
        assert!(instance.kind().name().eq_ignore_ascii_case(&upper));
    }
}

#[test]
fn test_every_auto_alias_runs_backtest_selection() {
    let config = ForecastConfig::default();
    let registry = ModelRegistry::global();
    let resolver = Resolver::new(registry, &config);
    let values = noisy_trend();
    let expected = independent_champion(registry, &values, 6);

    for alias in ["cv", "CV", "cross_validation", "cross validation", "Cross-Validation", ""] {
        let resolution = resolver
            .resolve_detailed(alias, &Series::from(values.clone()), Horizon::new(6).unwrap())
            .unwrap();
        let outcome = resolution.backtest.expect("automatic selection ran");

        assert_eq!(outcome.champion, expected, "alias {:?}", alias);
        assert_eq!(resolution.instance.kind(), expected);
    }
}

#[test]
fn test_selection_survives_failing_candidates() {
    // Training split of 5 is shorter than the 7-point season and window
    let values = vec![3.0, 5.0, 4.0, 6.0, 5.0, 7.0, 6.0, 8.0];
    let (champion, outcome) = BacktestSelector::new(ModelRegistry::global())
        .select_best(&Series::from(values), Horizon::new(3).unwrap())
        .unwrap();

    assert_eq!(outcome.failures().count(), 2);
    assert!(outcome.report(champion.kind()).unwrap().mse.is_some());
}

#[test]
fn test_holdout_and_train_lengths() {
    let registry = ModelRegistry::global();
    for (len, horizon) in [(2, 1), (10, 3), (48, 12), (48, 47)] {
        let values: Vec<f64> = noisy_trend().into_iter().take(len).collect();
        let (_, outcome) = BacktestSelector::new(registry)
            .select_best(&Series::from(values), Horizon::new(horizon).unwrap())
            .unwrap();

        assert_eq!(outcome.holdout_len, horizon);
        assert_eq!(outcome.train_len, len - horizon);
    }
}

#[test]
fn test_tie_break_by_registry_order() {
    let specs = vec![
        ModelSpec::new(ModelKind::WindowAverage).with_param("window_size", 1.0),
        ModelSpec::new(ModelKind::Naive),
        ModelSpec::new(ModelKind::SeasonalNaive).with_param("season_length", 1.0),
    ];
    let registry = ModelRegistry::new(specs, ModelKind::Naive).unwrap();
    let (champion, outcome) = BacktestSelector::new(&registry)
        .select_best(&Series::from(noisy_trend()), Horizon::new(5).unwrap())
        .unwrap();

    let scores: Vec<Option<f64>> = outcome.candidates.iter().map(|c| c.mse).collect();
    assert!(scores.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(champion.kind(), ModelKind::WindowAverage);
}

#[test]
fn test_forecast_length_for_any_series_length() {
    let forecaster = SingleModelForecaster::default();
    let registry = ModelRegistry::global();

    for len in [1, 2, 3, 10] {
        let values: Vec<f64> = noisy_trend().into_iter().take(len).collect();
        for horizon in [1, 4, 25] {
            let spec = registry.lookup_by_name("autoets").unwrap();
            let mut model = registry.instantiate(spec).unwrap();
            let predictions = forecaster
                .forecast(&values, Horizon::new(horizon).unwrap(), &mut model)
                .unwrap();
            assert_eq!(predictions.len(), horizon);
        }
    }
}

#[test]
fn test_unknown_model_is_not_a_fallback() {
    let service = ForecastService::new(ForecastConfig::default());
    let request = ForecastRequest::new("not_a_real_model", Horizon::new(3).unwrap(), noisy_trend());

    let err = service.forecast(&request).unwrap_err();
    assert_eq!(err, ForecastError::UnknownModel("not_a_real_model".to_string()));
    assert_eq!(ErrorResponse::from(&err).kind, "unknown_model");
}

#[test]
fn test_custom_series_id_flows_through_service() {
    let mut config = ForecastConfig::default();
    config.series_id = "sensor-1".to_string();
    let service = ForecastService::new(config);

    let request = ForecastRequest::new("theta", Horizon::new(2).unwrap(), noisy_trend());
    let outcome = service.forecast(&request).unwrap();
    assert_eq!(outcome.result.model, "Theta");
    assert_eq!(service.config().series_id, "sensor-1");
}
