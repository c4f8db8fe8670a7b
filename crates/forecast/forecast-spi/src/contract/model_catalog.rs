//! Trait for the ordered model catalog.

use crate::error::Result;
use crate::model::{ModelInstance, ModelSpec};

/// Ordered, immutable set of model specs.
///
/// Order is significant: it breaks ties between equally scored backtest
/// candidates.
pub trait ModelCatalog: Send + Sync {
    /// Specs in catalog order.
    fn list_specs(&self) -> &[ModelSpec];

    /// Create a fresh, unfitted instance with the spec's hyperparameters.
    fn instantiate(&self, spec: &ModelSpec) -> Result<ModelInstance>;

    /// Case-insensitive exact match on the kind identifier.
    ///
    /// Fails with `UnknownModel` when nothing matches.
    fn lookup_by_name(&self, name: &str) -> Result<&ModelSpec>;

    /// Spec returned for the "fast" alias.
    fn fast_default(&self) -> &ModelSpec;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use crate::model::ModelKind;
    use algorithm_spi::{Predictor, TsError};

    struct Constant(Option<f64>);

    impl Predictor for Constant {
        fn fit(&mut self, _data: &[f64]) -> algorithm_spi::Result<()> {
            self.0 = Some(1.0);
            Ok(())
        }

        fn predict(&self, steps: usize) -> algorithm_spi::Result<Vec<f64>> {
            self.0.map(|v| vec![v; steps]).ok_or(TsError::NotFitted)
        }

        fn is_fitted(&self) -> bool {
            self.0.is_some()
        }
    }

    struct SingleEntryCatalog {
        specs: Vec<ModelSpec>,
    }

    impl ModelCatalog for SingleEntryCatalog {
        fn list_specs(&self) -> &[ModelSpec] {
            &self.specs
        }

        fn instantiate(&self, spec: &ModelSpec) -> Result<ModelInstance> {
            Ok(ModelInstance::new(spec.clone(), Box::new(Constant(None))))
        }

        fn lookup_by_name(&self, name: &str) -> Result<&ModelSpec> {
            self.specs
                .iter()
                .find(|s| s.kind.name().eq_ignore_ascii_case(name))
                .ok_or_else(|| ForecastError::UnknownModel(name.to_string()))
        }

        fn fast_default(&self) -> &ModelSpec {
            &self.specs[0]
        }
    }

    #[test]
    fn test_catalog_as_trait_object() {
        let catalog: Box<dyn ModelCatalog> = Box::new(SingleEntryCatalog {
            specs: vec![ModelSpec::new(ModelKind::Naive)],
        });

        let spec = catalog.lookup_by_name("NAIVE").unwrap();
        let mut instance = catalog.instantiate(spec).unwrap();
        instance.fit(&[3.0]).unwrap();
        assert_eq!(instance.predict(2).unwrap(), vec![1.0, 1.0]);
        assert_eq!(catalog.fast_default().kind, ModelKind::Naive);
    }

    #[test]
    fn test_catalog_unknown_name() {
        let catalog = SingleEntryCatalog {
            specs: vec![ModelSpec::new(ModelKind::Naive)],
        };
        assert_eq!(
            catalog.lookup_by_name("theta").unwrap_err(),
            ForecastError::UnknownModel("theta".to_string())
        );
    }
}
