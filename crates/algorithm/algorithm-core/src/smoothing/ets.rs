//! Automatic ETS (error, trend, seasonality) model selection
//!
//! Restricted to additive errors and no seasonality. Three trend variants
//! are searched over a parameter grid and the lowest-AIC fit is kept:
//!
//! - ETS(A,N,N): level only
//! - ETS(A,A,N): additive trend (Holt)
//! - ETS(A,Ad,N): damped additive trend

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

const ALPHAS: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
const BETAS: [f64; 4] = [0.01, 0.05, 0.1, 0.2];
const PHIS: [f64; 3] = [0.8, 0.9, 0.98];

/// Trend component of an ETS model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EtsTrend {
    /// No trend
    None,
    /// Additive trend
    Additive,
    /// Damped additive trend
    Damped,
}

impl std::fmt::Display for EtsTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EtsTrend::None => write!(f, "N"),
            EtsTrend::Additive => write!(f, "A"),
            EtsTrend::Damped => write!(f, "Ad"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct EtsFit {
    trend: EtsTrend,
    alpha: f64,
    beta: f64,
    phi: f64,
    level: f64,
    slope: f64,
    aic: f64,
}

/// ETS with automatic trend and parameter selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoEts {
    fit: Option<EtsFit>,
}

impl AutoEts {
    /// Create an unfitted AutoETS model
    pub fn new() -> Self {
        Self { fit: None }
    }

    /// The selected trend component, once fitted
    pub fn selected_trend(&self) -> Option<EtsTrend> {
        self.fit.map(|f| f.trend)
    }

    /// Short ETS label of the selected model, e.g. `ETS(A,Ad,N)`
    pub fn selected_label(&self) -> Option<String> {
        self.fit.map(|f| format!("ETS(A,{},N)", f.trend))
    }

    /// Selected `(alpha, beta, phi)`, once fitted
    pub fn parameters(&self) -> Option<(f64, f64, f64)> {
        self.fit.map(|f| (f.alpha, f.beta, f.phi))
    }

    /// Run the state recursion for one parameter set.
    fn evaluate(
        data: &[f64],
        trend: EtsTrend,
        alpha: f64,
        beta: f64,
        phi: f64,
    ) -> Option<EtsFit> {
        let mut level = data[0];
        let mut slope = match trend {
            EtsTrend::None => 0.0,
            _ => data[1] - data[0],
        };
        let mut sse = 0.0;

        for &value in &data[1..] {
            let damped = phi * slope;
            let error = value - (level + damped);
            sse += error * error;
            level = level + damped + alpha * error;
            slope = match trend {
                EtsTrend::None => 0.0,
                _ => damped + beta * error,
            };
        }

        if !sse.is_finite() || !level.is_finite() {
            return None;
        }

        let m = (data.len() - 1) as f64;
        let k = match trend {
            EtsTrend::None => 2.0,
            EtsTrend::Additive => 4.0,
            EtsTrend::Damped => 5.0,
        };
        let aic = m * (sse / m).max(1e-12).ln() + 2.0 * k;

        Some(EtsFit {
            trend,
            alpha,
            beta,
            phi,
            level,
            slope,
            aic,
        })
    }

    fn candidates(n: usize) -> Vec<(EtsTrend, f64, f64, f64)> {
        let mut grid = Vec::new();
        for &alpha in &ALPHAS {
            grid.push((EtsTrend::None, alpha, 0.0, 1.0));
        }
        if n >= 3 {
            for &alpha in &ALPHAS {
                for &beta in BETAS.iter().filter(|&&b| b <= alpha) {
                    grid.push((EtsTrend::Additive, alpha, beta, 1.0));
                }
            }
            for &alpha in &ALPHAS {
                for &beta in BETAS.iter().filter(|&&b| b <= alpha) {
                    for &phi in &PHIS {
                        grid.push((EtsTrend::Damped, alpha, beta, phi));
                    }
                }
            }
        }
        grid
    }
}

impl Predictor for AutoEts {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;

        if data.len() == 1 {
            self.fit = Some(EtsFit {
                trend: EtsTrend::None,
                alpha: 0.5,
                beta: 0.0,
                phi: 1.0,
                level: data[0],
                slope: 0.0,
                aic: 0.0,
            });
            return Ok(());
        }

        let grid = Self::candidates(data.len());
        let iterations = grid.len();
        let best = grid
            .into_iter()
            .filter_map(|(trend, alpha, beta, phi)| Self::evaluate(data, trend, alpha, beta, phi))
            .fold(None::<EtsFit>, |best, fit| match best {
                Some(b) if b.aic <= fit.aic => Some(b),
                _ => Some(fit),
            });

        self.fit = Some(best.ok_or(TsError::ConvergenceFailure { iterations })?);
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let fit = self.fit.ok_or(TsError::NotFitted)?;

        let mut forecasts = Vec::with_capacity(steps);
        let mut cumulative = 0.0;
        let mut damping = 1.0;
        for _ in 0..steps {
            damping *= fit.phi;
            cumulative += damping;
            let value = match fit.trend {
                EtsTrend::None => fit.level,
                _ => fit.level + cumulative * fit.slope,
            };
            forecasts.push(value);
        }

        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fit.is_some()
    }
}
