//! Canonical long-format representation consumed by the forecaster.

use serde::{Deserialize, Serialize};

/// One series in `(unique_id, ds, y)` form.
///
/// `ds` is a synthetic, strictly increasing time index aligned with `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFrame {
    pub unique_id: String,
    pub ds: Vec<usize>,
    pub y: Vec<f64>,
}

impl CanonicalFrame {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Observations in time order.
    pub fn values(&self) -> &[f64] {
        &self.y
    }
}
