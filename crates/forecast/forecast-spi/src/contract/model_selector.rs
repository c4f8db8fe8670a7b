//! Trait for automatic model selection.

use crate::error::Result;
use crate::model::{BacktestOutcome, Horizon, ModelInstance, Series};

/// Strategy that picks a champion model for a series.
pub trait ModelSelector {
    /// Score the candidates and return the champion with the scoring table.
    ///
    /// The returned instance is fitted on the training split only.
    fn select_best(&self, series: &Series, horizon: Horizon)
        -> Result<(ModelInstance, BacktestOutcome)>;
}
