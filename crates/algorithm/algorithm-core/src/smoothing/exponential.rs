//! Simple Exponential Smoothing and the level recursions shared by the
//! smoothing-based algorithms.
//!
//! Formula: `S_t = α * Y_t + (1 - α) * S_{t-1}`, initialised with the first
//! observation. Forecasts are flat at the final level.

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

/// Alpha values tried when an algorithm optimizes its smoothing parameter.
pub(crate) const ALPHA_GRID: [f64; 19] = [
    0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60, 0.65, 0.70, 0.75,
    0.80, 0.85, 0.90, 0.95,
];

/// Run the SES recursion, returning the final level and the sum of squared
/// one-step-ahead errors.
pub(crate) fn ses_pass(data: &[f64], alpha: f64) -> (f64, f64) {
    let mut level = data[0];
    let mut sse = 0.0;

    for &value in &data[1..] {
        let error = value - level;
        sse += error * error;
        level += alpha * error;
    }

    (level, sse)
}

/// Pick the alpha from [`ALPHA_GRID`] with the lowest in-sample SSE.
///
/// The first grid value wins ties; histories shorter than two points carry
/// no error information and get `0.5`.
pub(crate) fn optimize_alpha(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.5;
    }

    let mut best_alpha = ALPHA_GRID[0];
    let mut best_sse = f64::INFINITY;
    for &alpha in &ALPHA_GRID {
        let (_, sse) = ses_pass(data, alpha);
        if sse < best_sse {
            best_sse = sse;
            best_alpha = alpha;
        }
    }
    best_alpha
}

/// Least-squares slope and intercept of `data` against `t = 0..n-1`.
///
/// A single observation has zero slope.
pub(crate) fn linear_trend(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    if data.len() < 2 {
        return (data.first().copied().unwrap_or(0.0), 0.0);
    }

    let t_mean = (n - 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (t, &y) in data.iter().enumerate() {
        let dt = t as f64 - t_mean;
        num += dt * (y - y_mean);
        den += dt * dt;
    }

    let slope = num / den;
    (y_mean - slope * t_mean, slope)
}

/// Simple Exponential Smoothing for series without trend or seasonality
///
/// # Example
///
/// ```rust
/// use algorithm_core::smoothing::SimpleExponentialSmoothing;
/// use algorithm_core::Predictor;
///
/// let data = vec![10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0, 15.0];
/// let mut model = SimpleExponentialSmoothing::new(0.5).unwrap();
/// model.fit(&data).unwrap();
/// let forecast = model.predict(3).unwrap();
/// assert_eq!(forecast.len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleExponentialSmoothing {
    /// Smoothing parameter (0 < alpha < 1)
    alpha: f64,
    /// Current level estimate
    level: f64,
    /// Whether model has been fitted
    fitted: bool,
}

impl SimpleExponentialSmoothing {
    /// Create a new SES model
    ///
    /// # Arguments
    ///
    /// * `alpha` - Smoothing parameter (0 < alpha < 1)
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.0 < alpha && alpha < 1.0) {
            return Err(TsError::invalid_parameter(
                "alpha",
                "must be between 0 and 1 (exclusive)",
            ));
        }

        Ok(Self {
            alpha,
            level: 0.0,
            fitted: false,
        })
    }

    /// Get the current level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Get alpha parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Predictor for SimpleExponentialSmoothing {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;

        let (level, _) = ses_pass(data, self.alpha);
        self.level = level;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        Ok(vec![self.level; steps])
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
