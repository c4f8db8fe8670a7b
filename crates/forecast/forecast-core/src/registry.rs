//! Model Registry
//!
//! The ordered catalog of model specs and the factory that turns a spec into
//! a live predictor.

use std::collections::HashSet;
use std::sync::OnceLock;

use algorithm_core::prelude::*;
use algorithm_spi::TsError;
use forecast_spi::{
    ForecastError, Hyperparameters, ModelCatalog, ModelInstance, ModelKind, ModelSpec, Result,
};

/// Default SES smoothing parameter.
const DEFAULT_ALPHA: f64 = 0.5;
/// Default season for the seasonal naive model.
const DEFAULT_SEASON_LENGTH: usize = 7;
/// Default window for the window average model.
const DEFAULT_WINDOW_SIZE: usize = 7;

/// The default catalog, in tie-break order.
pub fn default_specs() -> Vec<ModelSpec> {
    vec![
        ModelSpec::new(ModelKind::AutoArima),
        ModelSpec::new(ModelKind::SimpleExponentialSmoothing).with_param("alpha", DEFAULT_ALPHA),
        ModelSpec::new(ModelKind::Theta),
        ModelSpec::new(ModelKind::AutoEts),
        ModelSpec::new(ModelKind::AutoCes),
        ModelSpec::new(ModelKind::AutoTheta),
        ModelSpec::new(ModelKind::Naive),
        ModelSpec::new(ModelKind::SeasonalNaive)
            .with_param("season_length", DEFAULT_SEASON_LENGTH as f64),
        ModelSpec::new(ModelKind::WindowAverage)
            .with_param("window_size", DEFAULT_WINDOW_SIZE as f64),
        ModelSpec::new(ModelKind::Adida),
    ]
}

/// Ordered, immutable model catalog
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    specs: Vec<ModelSpec>,
    fast_default: usize,
}

impl Default for ModelRegistry {
    /// The default catalog with AutoARIMA as the fast default.
    fn default() -> Self {
        Self {
            specs: default_specs(),
            fast_default: 0,
        }
    }
}

impl ModelRegistry {
    /// Build a custom catalog.
    ///
    /// Every spec is instantiated once up front, so a constructed registry
    /// never fails to instantiate later. Duplicate kinds and a fast default
    /// missing from the catalog are rejected.
    pub fn new(specs: Vec<ModelSpec>, fast_default: ModelKind) -> Result<Self> {
        if specs.is_empty() {
            return Err(ForecastError::Internal(
                "model catalog must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.kind) {
                return Err(ForecastError::Internal(format!(
                    "model kind {} registered twice",
                    spec.kind
                )));
            }
            build_predictor(spec).map_err(|e| ForecastError::forecast_failed(spec.kind, e))?;
        }

        let fast_default = specs
            .iter()
            .position(|s| s.kind == fast_default)
            .ok_or_else(|| {
                ForecastError::Internal(format!(
                    "fast default {} is not in the catalog",
                    fast_default
                ))
            })?;

        Ok(Self {
            specs,
            fast_default,
        })
    }

    /// Process-wide default catalog, built on first use.
    pub fn global() -> &'static ModelRegistry {
        static REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();
        REGISTRY.get_or_init(ModelRegistry::default)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl ModelCatalog for ModelRegistry {
    fn list_specs(&self) -> &[ModelSpec] {
        &self.specs
    }

    fn instantiate(&self, spec: &ModelSpec) -> Result<ModelInstance> {
        let predictor =
            build_predictor(spec).map_err(|e| ForecastError::forecast_failed(spec.kind, e))?;
        Ok(ModelInstance::new(spec.clone(), predictor))
    }

    fn lookup_by_name(&self, name: &str) -> Result<&ModelSpec> {
        self.specs
            .iter()
            .find(|s| s.kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ForecastError::UnknownModel(name.to_string()))
    }

    fn fast_default(&self) -> &ModelSpec {
        &self.specs[self.fast_default]
    }
}

/// Create the predictor for a spec, applying its hyperparameters.
fn build_predictor(spec: &ModelSpec) -> std::result::Result<Box<dyn Predictor>, TsError> {
    let accepted = spec.kind.parameter_names();
    if let Some((name, _)) = spec.params.iter().find(|(name, _)| !accepted.contains(name)) {
        return Err(TsError::invalid_parameter(
            name,
            format!("not accepted by {}", spec.kind),
        ));
    }

    let predictor: Box<dyn Predictor> = match spec.kind {
        ModelKind::AutoArima => Box::new(AutoArima::new()),
        ModelKind::SimpleExponentialSmoothing => {
            let alpha = spec.params.get("alpha").unwrap_or(DEFAULT_ALPHA);
            Box::new(SimpleExponentialSmoothing::new(alpha)?)
        }
        ModelKind::Theta => Box::new(Theta::new()),
        ModelKind::AutoEts => Box::new(AutoEts::new()),
        ModelKind::AutoCes => Box::new(AutoCes::new()),
        ModelKind::AutoTheta => Box::new(AutoTheta::new()),
        ModelKind::Naive => Box::new(Naive::new()),
        ModelKind::SeasonalNaive => {
            let season = integer_param(&spec.params, "season_length", DEFAULT_SEASON_LENGTH)?;
            Box::new(SeasonalNaive::new(season)?)
        }
        ModelKind::WindowAverage => {
            let window = integer_param(&spec.params, "window_size", DEFAULT_WINDOW_SIZE)?;
            Box::new(WindowAverage::new(window)?)
        }
        ModelKind::Adida => Box::new(Adida::new()),
    };

    Ok(predictor)
}

fn integer_param(
    params: &Hyperparameters,
    name: &str,
    default: usize,
) -> std::result::Result<usize, TsError> {
    match params.get(name) {
        None => Ok(default),
        Some(value) if value.is_finite() && value >= 1.0 && value.fract() == 0.0 => {
            Ok(value as usize)
        }
        Some(value) => Err(TsError::invalid_parameter(
            name,
            format!("must be a positive integer, got {}", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let kinds: Vec<ModelKind> = ModelRegistry::global()
            .list_specs()
            .iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds, ModelKind::ALL.to_vec());
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let registry = ModelRegistry::default();
        assert!(ModelRegistry::new(default_specs(), ModelKind::AutoArima).is_ok());
        for spec in registry.list_specs() {
            let instance = registry.instantiate(spec).unwrap();
            assert_eq!(instance.kind(), spec.kind);
            assert!(!instance.is_fitted());
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = ModelRegistry::global();
        assert_eq!(registry.lookup_by_name("autoarima").unwrap().kind, ModelKind::AutoArima);
        assert_eq!(registry.lookup_by_name("ADIDA").unwrap().kind, ModelKind::Adida);
        assert_eq!(
            registry.lookup_by_name("seasonalnaive").unwrap().params.get("season_length"),
            Some(7.0)
        );
    }

    #[test]
    fn test_lookup_unknown() {
        let err = ModelRegistry::global()
            .lookup_by_name("not_a_real_model")
            .unwrap_err();
        assert_eq!(err, ForecastError::UnknownModel("not_a_real_model".to_string()));
    }

    #[test]
    fn test_fast_default() {
        assert_eq!(ModelRegistry::global().fast_default().kind, ModelKind::AutoArima);

        let registry = ModelRegistry::new(
            vec![ModelSpec::new(ModelKind::Naive), ModelSpec::new(ModelKind::Theta)],
            ModelKind::Theta,
        )
        .unwrap();
        assert_eq!(registry.fast_default().kind, ModelKind::Theta);
    }

    #[test]
    fn test_rejects_bad_catalogs() {
        assert!(matches!(
            ModelRegistry::new(vec![], ModelKind::Naive),
            Err(ForecastError::Internal(_))
        ));
        assert!(matches!(
            ModelRegistry::new(
                vec![ModelSpec::new(ModelKind::Naive), ModelSpec::new(ModelKind::Naive)],
                ModelKind::Naive
            ),
            Err(ForecastError::Internal(_))
        ));
        assert!(matches!(
            ModelRegistry::new(vec![ModelSpec::new(ModelKind::Naive)], ModelKind::AutoArima),
            Err(ForecastError::Internal(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_hyperparameters() {
        let cases = [
            ModelSpec::new(ModelKind::SimpleExponentialSmoothing).with_param("alpha", 1.5),
            ModelSpec::new(ModelKind::SeasonalNaive).with_param("season_length", 2.5),
            ModelSpec::new(ModelKind::WindowAverage).with_param("window_size", 0.0),
            ModelSpec::new(ModelKind::Naive).with_param("window_size", 3.0),
        ];
        for spec in cases {
            let kind = spec.kind;
            let err = ModelRegistry::new(vec![spec], kind).unwrap_err();
            assert!(
                matches!(&err, ForecastError::ForecastFailed { model, .. } if model == kind.name()),
                "unexpected error {:?}",
                err
            );
        }
    }

    #[test]
    fn test_instances_are_independent() {
        let registry = ModelRegistry::global();
        let spec = registry.lookup_by_name("naive").unwrap();

        let mut first = registry.instantiate(spec).unwrap();
        first.fit(&[1.0, 2.0]).unwrap();
        let second = registry.instantiate(spec).unwrap();

        assert!(first.is_fitted());
        assert!(!second.is_fitted());
    }
}
