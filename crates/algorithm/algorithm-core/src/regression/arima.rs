//! ARIMA with automatic order selection
//!
//! The model combines three components:
//!
//! - **AR (AutoRegressive)**: past values, estimated with Yule-Walker
//!   equations solved by Levinson-Durbin
//! - **I (Integrated)**: first differencing when it reduces variance
//! - **MA (Moving Average)**: past errors, estimated from the residual
//!   autocorrelation
//!
//! [`AutoArima`] decides the differencing order first, then fits every
//! `(p, q)` with `p <= 2`, `q <= 1` that the history can support and keeps
//! the lowest AIC. Very short histories fall back to ARIMA(0,0,0), whose
//! forecast is the mean.

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

const MAX_P: usize = 2;
const MAX_Q: usize = 1;

/// A fitted ARIMA(p, d, q), with `d <= 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArimaFit {
    p: usize,
    d: usize,
    q: usize,
    ar_coeffs: Vec<f64>,
    ma_coeffs: Vec<f64>,
    /// Mean of the (differenced) series
    constant: f64,
    /// Last observation on the original scale, for undifferencing
    last_value: f64,
    differenced_data: Vec<f64>,
    residuals: Vec<f64>,
    aic: f64,
}

impl ArimaFit {
    /// Observations of the differenced series needed to fit an order.
    fn required(p: usize, q: usize) -> usize {
        if p + q == 0 {
            1
        } else {
            p + q + 3
        }
    }

    fn fit(data: &[f64], p: usize, d: usize, q: usize) -> Self {
        let differenced_data = difference(data, d);
        let n = differenced_data.len();
        let constant = differenced_data.iter().sum::<f64>() / n as f64;

        let ar_coeffs = estimate_ar_coefficients(&differenced_data, p);

        let mut residuals = vec![0.0; n];
        for i in p..n {
            let mut prediction = constant;
            for j in 0..p {
                prediction += ar_coeffs[j] * (differenced_data[i - j - 1] - constant);
            }
            residuals[i] = differenced_data[i] - prediction;
        }

        let ma_coeffs = estimate_ma_coefficients(&residuals, q);

        let m = (n - p) as f64;
        let sigma2 = residuals[p..].iter().map(|r| r * r).sum::<f64>() / m;
        let k = (p + q + 1) as f64;
        let aic = m * sigma2.max(1e-12).ln() + 2.0 * k;

        Self {
            p,
            d,
            q,
            ar_coeffs,
            ma_coeffs,
            constant,
            last_value: data[data.len() - 1],
            differenced_data,
            residuals,
            aic,
        }
    }

    fn predict(&self, steps: usize) -> Vec<f64> {
        let mut extended = self.differenced_data.clone();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..steps {
            let mut forecast = self.constant;

            for j in 0..self.p {
                let idx = extended.len() - j - 1;
                forecast += self.ar_coeffs[j] * (extended[idx] - self.constant);
            }

            for j in 0..self.q {
                if extended_residuals.len() > j {
                    let idx = extended_residuals.len() - j - 1;
                    forecast += self.ma_coeffs[j] * extended_residuals[idx];
                }
            }

            extended.push(forecast);
            // Future innovations have zero expectation
            extended_residuals.push(0.0);
        }

        let forecasts = &extended[self.differenced_data.len()..];
        if self.d == 0 {
            return forecasts.to_vec();
        }

        let mut level = self.last_value;
        forecasts
            .iter()
            .map(|delta| {
                level += delta;
                level
            })
            .collect()
    }
}

fn difference(data: &[f64], order: usize) -> Vec<f64> {
    let mut result = data.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

fn variance(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n
}

/// Yule-Walker AR coefficients via Levinson-Durbin.
fn estimate_ar_coefficients(data: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return Vec::new();
    }

    let n = data.len();
    let mean: f64 = data.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = data.iter().map(|x| x - mean).collect();

    let mut autocorr = vec![0.0; p + 1];
    for (k, slot) in autocorr.iter_mut().enumerate() {
        let mut sum = 0.0;
        for i in k..n {
            sum += centered[i] * centered[i - k];
        }
        *slot = sum / n as f64;
    }

    let mut coeffs = vec![0.0; p];
    if autocorr[0].abs() > 1e-10 {
        coeffs[0] = autocorr[1] / autocorr[0];

        for k in 1..p {
            let mut sum = autocorr[k + 1];
            for j in 0..k {
                sum -= coeffs[j] * autocorr[k - j];
            }

            let mut denom = autocorr[0];
            for j in 0..k {
                denom -= coeffs[j] * autocorr[j + 1];
            }

            if denom.abs() > 1e-10 {
                let new_coeff = sum / denom;
                let old_coeffs = coeffs.clone();
                coeffs[k] = new_coeff;
                for j in 0..k {
                    coeffs[j] = old_coeffs[j] - new_coeff * old_coeffs[k - 1 - j];
                }
            }
        }
    }

    coeffs
}

/// MA coefficients from the residual autocorrelation, bounded for stability.
fn estimate_ma_coefficients(residuals: &[f64], q: usize) -> Vec<f64> {
    if q == 0 || residuals.is_empty() {
        return vec![0.0; q];
    }

    let n = residuals.len();
    let mean: f64 = residuals.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
    let var: f64 = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

    let mut coeffs = vec![0.0; q];
    if var.abs() > 1e-10 {
        for (k, coeff) in coeffs.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in (k + 1)..n {
                sum += centered[i] * centered[i - k - 1];
            }
            *coeff = ((sum / n as f64) / var).clamp(-0.99, 0.99);
        }
    }

    coeffs
}

/// ARIMA with automatic differencing and order selection
///
/// # Example
///
/// ```rust
/// use algorithm_core::regression::AutoArima;
/// use algorithm_core::Predictor;
///
/// let data: Vec<f64> = (1..=30).map(|x| x as f64).collect();
/// let mut model = AutoArima::new();
/// model.fit(&data).unwrap();
/// assert_eq!(model.order(), Some((0, 1, 0)));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoArima {
    fit: Option<ArimaFit>,
}

impl AutoArima {
    /// Create an unfitted AutoARIMA model
    pub fn new() -> Self {
        Self { fit: None }
    }

    /// Selected `(p, d, q)`, once fitted
    pub fn order(&self) -> Option<(usize, usize, usize)> {
        self.fit.as_ref().map(|f| (f.p, f.d, f.q))
    }

    /// AR coefficients of the selected model
    pub fn ar_coefficients(&self) -> &[f64] {
        self.fit
            .as_ref()
            .map(|f| f.ar_coeffs.as_slice())
            .unwrap_or(&[])
    }

    /// MA coefficients of the selected model
    pub fn ma_coefficients(&self) -> &[f64] {
        self.fit
            .as_ref()
            .map(|f| f.ma_coeffs.as_slice())
            .unwrap_or(&[])
    }

    /// Difference once when that lowers the variance of the series.
    fn select_differencing(data: &[f64]) -> usize {
        if data.len() < 3 {
            return 0;
        }
        let differenced = difference(data, 1);
        if variance(&differenced) < variance(data) {
            1
        } else {
            0
        }
    }
}

impl Predictor for AutoArima {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;

        let d = Self::select_differencing(data);
        let available = data.len() - d;

        let mut best: Option<ArimaFit> = None;
        for p in 0..=MAX_P {
            for q in 0..=MAX_Q {
                if available < ArimaFit::required(p, q) {
                    continue;
                }
                let candidate = ArimaFit::fit(data, p, d, q);
                if !candidate.aic.is_finite() {
                    continue;
                }
                if best.as_ref().map_or(true, |b| candidate.aic < b.aic) {
                    best = Some(candidate);
                }
            }
        }

        self.fit = Some(best.ok_or(TsError::ConvergenceFailure {
            iterations: (MAX_P + 1) * (MAX_Q + 1),
        })?);
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let fit = self.fit.as_ref().ok_or(TsError::NotFitted)?;
        Ok(fit.predict(steps))
    }

    fn is_fitted(&self) -> bool {
        self.fit.is_some()
    }
}
