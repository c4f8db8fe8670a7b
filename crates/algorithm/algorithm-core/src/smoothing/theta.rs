//! Theta method
//!
//! The theta forecast is simple exponential smoothing of the series plus a
//! drift taken from its least-squares trend line:
//!
//! ```text
//! ŷ_{n+h} = l_n + w * b * ((h - 1) + 1/α - (1 - α)^n / α),   w = 1 - 1/θ
//! ```
//!
//! [`Theta`] is the standard model (θ = 2). [`AutoTheta`] picks θ from a
//! grid by in-sample one-step error.

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

use super::exponential::{linear_trend, optimize_alpha, ses_pass};

/// θ values searched by [`AutoTheta`]; the standard model comes first so it
/// wins ties.
const THETA_GRID: [f64; 6] = [2.0, 1.0, 1.5, 2.5, 3.0, 4.0];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ThetaState {
    theta: f64,
    alpha: f64,
    level: f64,
    slope: f64,
    n: usize,
}

impl ThetaState {
    fn fit(data: &[f64], theta: f64) -> Self {
        let alpha = optimize_alpha(data);
        let (level, _) = ses_pass(data, alpha);
        let (_, slope) = linear_trend(data);
        Self {
            theta,
            alpha,
            level,
            slope,
            n: data.len(),
        }
    }

    fn drift_weight(theta: f64) -> f64 {
        1.0 - 1.0 / theta
    }

    fn forecast_at(level: f64, slope: f64, alpha: f64, theta: f64, n: usize, h: usize) -> f64 {
        let decay = (1.0 - alpha).powf(n as f64) / alpha;
        let drift = (h as f64 - 1.0) + 1.0 / alpha - decay;
        level + Self::drift_weight(theta) * slope * drift
    }

    fn predict(&self, steps: usize) -> Vec<f64> {
        (1..=steps)
            .map(|h| Self::forecast_at(self.level, self.slope, self.alpha, self.theta, self.n, h))
            .collect()
    }
}

/// Standard Theta model (θ = 2)
///
/// # Example
///
/// ```rust
/// use algorithm_core::smoothing::Theta;
/// use algorithm_core::Predictor;
///
/// let data: Vec<f64> = (0..24).map(|i| 10.0 + 0.5 * i as f64).collect();
/// let mut model = Theta::new();
/// model.fit(&data).unwrap();
/// assert_eq!(model.predict(4).unwrap().len(), 4);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theta {
    state: Option<ThetaState>,
}

impl Theta {
    /// Create an unfitted standard Theta model
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Smoothing parameter chosen during fitting
    pub fn alpha(&self) -> Option<f64> {
        self.state.map(|s| s.alpha)
    }
}

impl Predictor for Theta {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;
        self.state = Some(ThetaState::fit(data, 2.0));
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let state = self.state.ok_or(TsError::NotFitted)?;
        Ok(state.predict(steps))
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}

/// Theta model with θ selected by in-sample one-step MSE
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoTheta {
    state: Option<ThetaState>,
}

impl AutoTheta {
    /// Create an unfitted AutoTheta model
    pub fn new() -> Self {
        Self { state: None }
    }

    /// The selected θ, once fitted
    pub fn selected_theta(&self) -> Option<f64> {
        self.state.map(|s| s.theta)
    }

    /// One-step-ahead MSE for a given θ, walking the history forward.
    ///
    /// Alpha is fixed to the full-history optimum; the trend slope is
    /// recomputed on each prefix from running sums.
    fn one_step_mse(data: &[f64], alpha: f64, theta: f64) -> f64 {
        let mut level = data[0];
        let (mut st, mut sy, mut stt, mut sty) = (0.0, data[0], 0.0, 0.0);
        let mut sse = 0.0;
        let mut count = 0usize;

        for t in 1..data.len() {
            if t >= 2 {
                let n = t as f64;
                let den = n * stt - st * st;
                let slope = if den.abs() > 1e-12 {
                    (n * sty - st * sy) / den
                } else {
                    0.0
                };
                let forecast = ThetaState::forecast_at(level, slope, alpha, theta, t, 1);
                let error = data[t] - forecast;
                sse += error * error;
                count += 1;
            }

            let x = t as f64;
            st += x;
            sy += data[t];
            stt += x * x;
            sty += x * data[t];
            level += alpha * (data[t] - level);
        }

        if count == 0 {
            0.0
        } else {
            sse / count as f64
        }
    }
}

impl Predictor for AutoTheta {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;

        let alpha = optimize_alpha(data);
        let mut best_theta = THETA_GRID[0];
        let mut best_mse = f64::INFINITY;
        for &theta in &THETA_GRID {
            let mse = Self::one_step_mse(data, alpha, theta);
            if mse < best_mse {
                best_mse = mse;
                best_theta = theta;
            }
        }

        self.state = Some(ThetaState::fit(data, best_theta));
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let state = self.state.ok_or(TsError::NotFitted)?;
        Ok(state.predict(steps))
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
