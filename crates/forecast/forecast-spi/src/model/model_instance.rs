//! Live, fittable model created from a spec.

use algorithm_spi::{Predictor, Result};

use super::{ModelKind, ModelSpec};

/// A predictor tagged with the spec it was built from.
///
/// Instances are created per request (or per backtest candidate), fitted
/// once and discarded; they are never shared.
pub struct ModelInstance {
    spec: ModelSpec,
    predictor: Box<dyn Predictor>,
}

impl ModelInstance {
    pub fn new(spec: ModelSpec, predictor: Box<dyn Predictor>) -> Self {
        Self { spec, predictor }
    }

    /// The kind tag reported as the response model.
    pub fn kind(&self) -> ModelKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    pub fn fit(&mut self, data: &[f64]) -> Result<()> {
        self.predictor.fit(data)
    }

    pub fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        self.predictor.predict(steps)
    }

    pub fn is_fitted(&self) -> bool {
        self.predictor.is_fitted()
    }
}

impl std::fmt::Debug for ModelInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInstance")
            .field("spec", &self.spec)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}
