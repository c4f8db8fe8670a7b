//! Complex Exponential Smoothing (CES)
//!
//! CES carries a level `l` and an information potential `c` and smooths
//! them with a complex parameter `a0 + i*a1`:
//!
//! ```text
//! e_t = y_t - l_{t-1}
//! l_t = l_{t-1} - (1 - a1) * c_{t-1} + (a0 - a1) * e_t
//! c_t = l_{t-1} + (1 - a0) * c_{t-1} + (a0 + a1) * e_t
//! ```
//!
//! The parameter pair is chosen from a grid by in-sample SSE.

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

const A0_GRID: [f64; 10] = [1.05, 1.15, 1.25, 1.35, 1.45, 1.55, 1.65, 1.75, 1.85, 1.95];
const A1_GRID: [f64; 5] = [1.0, 0.95, 1.05, 0.9, 1.1];

/// Levels above this multiple of the data scale are treated as divergent.
const DIVERGENCE_FACTOR: f64 = 1e6;

/// Complex exponential smoothing with automatic parameter selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoCes {
    a0: f64,
    a1: f64,
    level: f64,
    potential: f64,
    fitted: bool,
}

impl AutoCes {
    /// Create an unfitted AutoCES model
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected complex smoothing parameter as `(a0, a1)`
    pub fn parameters(&self) -> Option<(f64, f64)> {
        self.fitted.then_some((self.a0, self.a1))
    }

    fn step(level: f64, potential: f64, error: f64, a0: f64, a1: f64) -> (f64, f64) {
        let next_level = level - (1.0 - a1) * potential + (a0 - a1) * error;
        let next_potential = level + (1.0 - a0) * potential + (a0 + a1) * error;
        (next_level, next_potential)
    }

    /// Returns `(sse, level, potential)` or `None` when the recursion diverges.
    fn evaluate(data: &[f64], a0: f64, a1: f64) -> Option<(f64, f64, f64)> {
        let scale = data.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        let mut level = data[0];
        let mut potential = data[0];
        let mut sse = 0.0;

        for &value in &data[1..] {
            let error = value - level;
            sse += error * error;
            (level, potential) = Self::step(level, potential, error, a0, a1);
            if !level.is_finite() || level.abs() > DIVERGENCE_FACTOR * scale {
                return None;
            }
        }

        Some((sse, level, potential))
    }
}

impl Predictor for AutoCes {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;

        let mut best: Option<(f64, f64, f64, f64, f64)> = None;
        for &a1 in &A1_GRID {
            for &a0 in &A0_GRID {
                if let Some((sse, level, potential)) = Self::evaluate(data, a0, a1) {
                    if best.map_or(true, |b| sse < b.0) {
                        best = Some((sse, a0, a1, level, potential));
                    }
                }
            }
        }

        let (_, a0, a1, level, potential) = best.ok_or(TsError::ConvergenceFailure {
            iterations: A0_GRID.len() * A1_GRID.len(),
        })?;

        self.a0 = a0;
        self.a1 = a1;
        self.level = level;
        self.potential = potential;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        let mut level = self.level;
        let mut potential = self.potential;
        let mut forecasts = Vec::with_capacity(steps);
        for _ in 0..steps {
            forecasts.push(level);
            (level, potential) = Self::step(level, potential, 0.0, self.a0, self.a1);
        }

        if forecasts.iter().any(|v| !v.is_finite()) {
            return Err(TsError::NumericalError(
                "CES forecast diverged".to_string(),
            ));
        }

        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
